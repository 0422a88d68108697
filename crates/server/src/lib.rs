use axum::{Json, http::StatusCode, response::IntoResponse};
use engine::EngineError;

use serde::Serialize;
pub use server::{router, run, run_with_listener, spawn_with_listener};

mod email;
mod plaid;
mod server;
mod user_data;

pub mod types {
    pub use api_types::Confirmation;

    pub mod plaid {
        pub use api_types::plaid::{
            AccessTokenCreated, AccountView, ExchangePublicToken, LinkTokenCreated, TokenQuery,
            TransactionView,
        };
    }

    pub mod summary {
        pub use api_types::summary::SummaryResponse;
    }

    pub mod user_data {
        pub use api_types::user_data::{UserDataQuery, UserDataSave, UserDocument};
    }

    pub mod email {
        pub use api_types::email::SendEmail;
    }
}

pub struct ServerError(EngineError);

#[derive(Serialize)]
struct Error {
    error: String,
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        // The only client error this surface distinguishes.
        EngineError::MissingField(_) => StatusCode::BAD_REQUEST,
        EngineError::Upstream(_)
        | EngineError::Transport(_)
        | EngineError::Configuration(_)
        | EngineError::Database(_)
        | EngineError::Document(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn message_for_engine_error(err: EngineError) -> String {
    match err {
        EngineError::Database(db_err) => {
            tracing::error!("database error: {db_err}");
            "internal server error".to_string()
        }
        EngineError::Transport(req_err) => {
            tracing::error!("upstream transport error: {req_err}");
            req_err.to_string()
        }
        other => other.to_string(),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let status = status_for_engine_error(&self.0);
        let error = message_for_engine_error(self.0);

        (status, Json(Error { error })).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self(value)
    }
}
