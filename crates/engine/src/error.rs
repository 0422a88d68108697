//! The module contains the errors the engine can throw.
//!
//! The taxonomy is deliberately flat: a caller either forgot a required
//! field ([`MissingField`]) or something downstream failed. The server maps
//! the former to a bad request and everything else to a server error.
//!
//! [`MissingField`]: EngineError::MissingField
use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    /// A required request field is absent or empty.
    #[error("Missing {0}")]
    MissingField(String),
    /// The upstream provider answered with an error payload.
    #[error("{0}")]
    Upstream(String),
    /// The upstream provider could not be reached or its answer could not
    /// be read.
    #[error("upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// The engine was built without a required collaborator.
    #[error("engine misconfigured: {0}")]
    Configuration(String),
    #[error(transparent)]
    Database(#[from] DbErr),
    /// A stored document could not be serialized or parsed back.
    #[error("malformed user document: {0}")]
    Document(#[from] serde_json::Error),
}
