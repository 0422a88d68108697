//! Transactional-email endpoint

use api_types::Confirmation;
use api_types::email::SendEmail;
use axum::{Json, extract::State};

use crate::{ServerError, server::ServerState};

pub async fn send(
    State(state): State<ServerState>,
    Json(payload): Json<SendEmail>,
) -> Result<Json<Confirmation>, ServerError> {
    state
        .engine
        .send_email(
            payload.to.as_deref(),
            payload.subject.as_deref(),
            payload.message.as_deref(),
        )
        .await?;

    Ok(Json(Confirmation { success: true }))
}
