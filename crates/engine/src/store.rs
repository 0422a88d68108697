//! Per-user document persistence.
//!
//! One row per user in the `user_data` table, the whole document stored as
//! a JSON string. A save is a single upsert, so replacing a document is
//! atomic per key: concurrent saves for the same user serialize at the
//! database instead of racing over a shared file.

use chrono::Utc;
use sea_orm::{ActiveValue, DatabaseConnection, entity::prelude::*, sea_query::OnConflict};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::EngineError;

/// The single persisted entity: application state one user owns.
///
/// The four collections are opaque to the server. A save replaces the whole
/// document; there is no field-level merge and no delete operation.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserDocument {
    pub accounts: Vec<Value>,
    pub cards: Vec<Value>,
    pub events: Vec<Value>,
    pub settings: Map<String, Value>,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "user_data")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: String,
    pub document: String,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Load the document for `user_id`, or the default-shaped empty document
/// when the user has never saved anything.
pub(crate) async fn load(
    db: &DatabaseConnection,
    user_id: &str,
) -> Result<UserDocument, EngineError> {
    match Entity::find_by_id(user_id).one(db).await? {
        Some(row) => Ok(serde_json::from_str(&row.document)?),
        None => Ok(UserDocument::default()),
    }
}

/// Replace the document for `user_id` wholesale.
pub(crate) async fn save(
    db: &DatabaseConnection,
    user_id: &str,
    document: &UserDocument,
) -> Result<(), EngineError> {
    let row = ActiveModel {
        user_id: ActiveValue::Set(user_id.to_string()),
        document: ActiveValue::Set(serde_json::to_string(document)?),
        updated_at: ActiveValue::Set(Utc::now()),
    };

    Entity::insert(row)
        .on_conflict(
            OnConflict::column(Column::UserId)
                .update_columns([Column::Document, Column::UpdatedAt])
                .to_owned(),
        )
        .exec(db)
        .await?;

    Ok(())
}
