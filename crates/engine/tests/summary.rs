use std::sync::{Arc, Mutex};

use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
use chrono::{Days, Utc};
use rust_decimal_macros::dec;
use sea_orm::Database;
use serde_json::{Value, json};

use engine::{EmailConfig, Engine, EngineError, PlaidConfig, PlaidEnvironment};
use migration::MigratorTrait;

type Captured = Arc<Mutex<Option<Value>>>;

async fn mock_transactions(
    State((captured, reply)): State<(Captured, Value)>,
    Json(body): Json<Value>,
) -> Json<Value> {
    *captured.lock().unwrap() = Some(body);
    Json(json!({ "transactions": reply }))
}

async fn engine_with_mock_upstream(transactions: Value) -> (Engine, Captured) {
    let captured: Captured = Arc::new(Mutex::new(None));

    let app = Router::new()
        .route("/transactions/get", post(mock_transactions))
        .with_state((captured.clone(), transactions));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (engine_for(format!("http://{addr}")).await, captured)
}

async fn engine_for(base_url: String) -> Engine {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();

    Engine::builder()
        .plaid(PlaidConfig {
            client_id: "client".to_string(),
            secret: "secret".to_string(),
            environment: PlaidEnvironment::Sandbox,
            client_name: "Ledgerlink Test".to_string(),
            base_url: Some(base_url),
        })
        .email(EmailConfig {
            api_key: "key".to_string(),
            from: "test@example.com".to_string(),
            base_url: None,
        })
        .database(db)
        .build()
        .unwrap()
}

#[tokio::test]
async fn summary_folds_the_fetched_window() {
    let today = Utc::now().date_naive();
    let six_days_ago = today.checked_sub_days(Days::new(6)).unwrap();
    let (engine, _captured) = engine_with_mock_upstream(json!([
        { "name": "Groceries", "amount": 10, "date": today },
        { "name": "Refund", "amount": -5, "date": today },
        { "name": "Utilities", "amount": 20, "date": six_days_ago },
    ]))
    .await;

    let summary = engine.summary(Some("access-token")).await.unwrap();
    assert_eq!(summary.today_total, dec!(-5));
    assert_eq!(summary.week_total, dec!(-25));
}

#[tokio::test]
async fn summary_requests_a_seven_day_civil_window() {
    let (engine, captured) = engine_with_mock_upstream(json!([])).await;

    let summary = engine.summary(Some("access-token")).await.unwrap();
    assert_eq!(summary.today_total, dec!(0));
    assert_eq!(summary.week_total, dec!(0));

    let body = captured.lock().unwrap().clone().unwrap();
    let today = Utc::now().date_naive();
    let week_start = today.checked_sub_days(Days::new(7)).unwrap();
    assert_eq!(body["start_date"], json!(week_start));
    assert_eq!(body["end_date"], json!(today));
    assert_eq!(body["access_token"], json!("access-token"));
}

#[tokio::test]
async fn missing_token_fails_without_touching_upstream() {
    let (engine, captured) = engine_with_mock_upstream(json!([])).await;

    let err = engine.summary(None).await.unwrap_err();
    assert!(matches!(err, EngineError::MissingField(field) if field == "accessToken"));

    let err = engine.summary(Some("  ")).await.unwrap_err();
    assert!(matches!(err, EngineError::MissingField(_)));

    assert!(captured.lock().unwrap().is_none());
}

#[tokio::test]
async fn upstream_error_message_is_propagated() {
    let app = Router::new().route(
        "/transactions/get",
        post(|| async {
            (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error_message": "ITEM_LOGIN_REQUIRED" })),
            )
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let engine = engine_for(format!("http://{addr}")).await;
    let err = engine.summary(Some("revoked-token")).await.unwrap_err();
    assert!(matches!(err, EngineError::Upstream(message) if message == "ITEM_LOGIN_REQUIRED"));
}

#[tokio::test]
async fn listing_requests_a_thirty_day_window() {
    let today = Utc::now().date_naive();
    let (engine, captured) = engine_with_mock_upstream(json!([
        { "name": "Groceries", "amount": 12.34, "date": today },
    ]))
    .await;

    let transactions = engine.transactions(Some("access-token")).await.unwrap();
    assert_eq!(transactions.len(), 1);
    assert_eq!(transactions[0].name, "Groceries");
    assert_eq!(transactions[0].amount, dec!(12.34));
    assert!(transactions[0].category.is_empty());

    let body = captured.lock().unwrap().clone().unwrap();
    let month_start = today.checked_sub_days(Days::new(30)).unwrap();
    assert_eq!(body["start_date"], json!(month_start));
}
