//! Financial-provider API endpoints

use api_types::plaid::{
    AccessTokenCreated, AccountView, ExchangePublicToken, LinkTokenCreated, TokenQuery,
    TransactionView,
};
use api_types::summary::SummaryResponse;
use axum::{
    Json,
    extract::{Query, State},
};

use crate::{ServerError, server::ServerState};

fn map_transaction(tx: engine::Transaction) -> TransactionView {
    TransactionView {
        name: tx.name,
        amount: tx.amount,
        date: tx.date,
        category: tx.category,
    }
}

fn map_account(account: engine::Account) -> AccountView {
    AccountView {
        name: account.name,
        kind: account.kind,
        subtype: account.subtype,
        balance: account.balance,
        mask: account.mask,
    }
}

pub async fn create_link_token(
    State(state): State<ServerState>,
) -> Result<Json<LinkTokenCreated>, ServerError> {
    let link_token = state.engine.create_link_token().await?;

    Ok(Json(LinkTokenCreated { link_token }))
}

pub async fn exchange_public_token(
    State(state): State<ServerState>,
    Json(payload): Json<ExchangePublicToken>,
) -> Result<Json<AccessTokenCreated>, ServerError> {
    let access_token = state
        .engine
        .exchange_public_token(payload.public_token.as_deref())
        .await?;

    Ok(Json(AccessTokenCreated { access_token }))
}

pub async fn transactions(
    State(state): State<ServerState>,
    Query(params): Query<TokenQuery>,
) -> Result<Json<Vec<TransactionView>>, ServerError> {
    let transactions = state
        .engine
        .transactions(params.access_token.as_deref())
        .await?;

    Ok(Json(transactions.into_iter().map(map_transaction).collect()))
}

pub async fn accounts(
    State(state): State<ServerState>,
    Query(params): Query<TokenQuery>,
) -> Result<Json<Vec<AccountView>>, ServerError> {
    let accounts = state.engine.accounts(params.access_token.as_deref()).await?;

    Ok(Json(accounts.into_iter().map(map_account).collect()))
}

pub async fn summary(
    State(state): State<ServerState>,
    Query(params): Query<TokenQuery>,
) -> Result<Json<SummaryResponse>, ServerError> {
    let summary = state.engine.summary(params.access_token.as_deref()).await?;

    Ok(Json(SummaryResponse {
        today_total: summary.today_total,
        week_total: summary.week_total,
    }))
}
