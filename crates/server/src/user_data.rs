//! Per-user document endpoints

use api_types::Confirmation;
use api_types::user_data::{UserDataQuery, UserDataSave, UserDocument};
use axum::{
    Json,
    extract::{Query, State},
};

use crate::{ServerError, server::ServerState};

fn map_document(document: engine::UserDocument) -> UserDocument {
    UserDocument {
        accounts: document.accounts,
        cards: document.cards,
        events: document.events,
        settings: document.settings,
    }
}

pub async fn get(
    State(state): State<ServerState>,
    Query(params): Query<UserDataQuery>,
) -> Result<Json<UserDocument>, ServerError> {
    let document = state.engine.user_data(params.user_id.as_deref()).await?;

    Ok(Json(map_document(document)))
}

pub async fn save(
    State(state): State<ServerState>,
    Json(payload): Json<UserDataSave>,
) -> Result<Json<Confirmation>, ServerError> {
    let document = engine::UserDocument {
        accounts: payload.accounts,
        cards: payload.cards,
        events: payload.events,
        settings: payload.settings,
    };

    state
        .engine
        .save_user_data(payload.user_id.as_deref(), document)
        .await?;

    Ok(Json(Confirmation { success: true }))
}
