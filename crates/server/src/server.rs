use axum::{
    Router,
    routing::{get, post},
};

use std::sync::Arc;

use crate::{email, plaid, user_data};
use engine::Engine;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
}

/// Build the public router. Exposed so tests can drive it without a
/// listener.
pub fn router(engine: Arc<Engine>) -> Router {
    let state = ServerState { engine };

    Router::new()
        .route("/api/create-link-token", get(plaid::create_link_token))
        .route(
            "/api/exchange-public-token",
            post(plaid::exchange_public_token),
        )
        .route("/api/plaid/transactions", get(plaid::transactions))
        .route("/api/plaid/accounts", get(plaid::accounts))
        .route("/api/plaid/summary", get(plaid::summary))
        .route("/api/userData", get(user_data::get).post(user_data::save))
        .route("/send-email", post(email::send))
        .with_state(state)
}

pub async fn run(engine: Engine) {
    let listener = match tokio::net::TcpListener::bind("127.0.0.1:3000").await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind server listener: {err}");
            return;
        }
    };
    if let Err(err) = run_with_listener(engine, listener).await {
        tracing::error!("server failed: {err}");
    }
}

pub async fn run_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router(Arc::new(engine))).await
}

pub fn spawn_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(engine, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}
