//! HTTP client for the financial-data provider (Plaid wire format).
//!
//! Credentials travel in the `PLAID-CLIENT-ID` / `PLAID-SECRET` headers and
//! every call is a JSON POST. Responses are decoded into the simplified
//! records the rest of the engine works with; upstream error bodies are
//! decoded into their `error_message` and surfaced as
//! [`EngineError::Upstream`].

use chrono::NaiveDate;
use reqwest::Url;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{Account, EngineError, Transaction};

/// Which Plaid environment the server-held credentials belong to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaidEnvironment {
    #[default]
    Sandbox,
    Development,
    Production,
}

impl PlaidEnvironment {
    fn base_url(self) -> &'static str {
        match self {
            Self::Sandbox => "https://sandbox.plaid.com",
            Self::Development => "https://development.plaid.com",
            Self::Production => "https://production.plaid.com",
        }
    }
}

/// Server-held Plaid configuration.
#[derive(Clone, Debug)]
pub struct PlaidConfig {
    pub client_id: String,
    pub secret: String,
    pub environment: PlaidEnvironment,
    /// Name shown to the user inside the Link flow.
    pub client_name: String,
    /// Overrides the environment base URL. Tests point this at a local
    /// mock provider.
    pub base_url: Option<String>,
}

#[derive(Debug)]
pub(crate) struct PlaidClient {
    base_url: Url,
    client_id: String,
    secret: String,
    client_name: String,
    http: reqwest::Client,
}

const LINK_USER_ID: &str = "ledgerlink-user";

#[derive(Serialize)]
struct LinkTokenUser<'a> {
    client_user_id: &'a str,
}

#[derive(Serialize)]
struct LinkTokenCreateRequest<'a> {
    client_name: &'a str,
    user: LinkTokenUser<'a>,
    products: [&'a str; 1],
    country_codes: [&'a str; 1],
    language: &'a str,
}

#[derive(Deserialize)]
struct LinkTokenCreateResponse {
    link_token: String,
}

#[derive(Serialize)]
struct PublicTokenExchangeRequest<'a> {
    public_token: &'a str,
}

#[derive(Deserialize)]
struct PublicTokenExchangeResponse {
    access_token: String,
}

#[derive(Serialize)]
struct TransactionsGetRequest<'a> {
    access_token: &'a str,
    start_date: NaiveDate,
    end_date: NaiveDate,
}

#[derive(Deserialize)]
struct TransactionsGetResponse {
    transactions: Vec<WireTransaction>,
}

#[derive(Deserialize)]
struct WireTransaction {
    name: String,
    amount: Decimal,
    date: NaiveDate,
    category: Option<Vec<String>>,
}

#[derive(Serialize)]
struct AccountsGetRequest<'a> {
    access_token: &'a str,
}

#[derive(Deserialize)]
struct AccountsGetResponse {
    accounts: Vec<WireAccount>,
}

#[derive(Deserialize)]
struct WireAccount {
    name: String,
    #[serde(rename = "type")]
    kind: String,
    subtype: Option<String>,
    mask: Option<String>,
    balances: WireBalances,
}

#[derive(Deserialize)]
struct WireBalances {
    current: Option<Decimal>,
}

#[derive(Deserialize)]
struct WireError {
    error_message: String,
}

impl PlaidClient {
    pub(crate) fn new(config: PlaidConfig) -> Result<Self, EngineError> {
        let base = config
            .base_url
            .unwrap_or_else(|| config.environment.base_url().to_string());
        let base_url = Url::parse(&base)
            .map_err(|err| EngineError::Configuration(format!("invalid plaid base url: {err}")))?;

        Ok(Self {
            base_url,
            client_id: config.client_id,
            secret: config.secret,
            client_name: config.client_name,
            http: reqwest::Client::new(),
        })
    }

    async fn post<Req, Res>(&self, path: &str, payload: &Req) -> Result<Res, EngineError>
    where
        Req: Serialize,
        Res: serde::de::DeserializeOwned,
    {
        let endpoint = self
            .base_url
            .join(path)
            .map_err(|err| EngineError::Configuration(format!("invalid plaid url: {err}")))?;

        let res = self
            .http
            .post(endpoint)
            .header("PLAID-CLIENT-ID", &self.client_id)
            .header("PLAID-SECRET", &self.secret)
            .json(payload)
            .send()
            .await?;

        if res.status().is_success() {
            return Ok(res.json::<Res>().await?);
        }

        let message = res
            .json::<WireError>()
            .await
            .map(|err| err.error_message)
            .unwrap_or_else(|_| "unknown upstream error".to_string());
        Err(EngineError::Upstream(message))
    }

    pub(crate) async fn create_link_token(&self) -> Result<String, EngineError> {
        let payload = LinkTokenCreateRequest {
            client_name: &self.client_name,
            user: LinkTokenUser {
                client_user_id: LINK_USER_ID,
            },
            products: ["transactions"],
            country_codes: ["US"],
            language: "en",
        };

        let res: LinkTokenCreateResponse = self.post("/link/token/create", &payload).await?;
        Ok(res.link_token)
    }

    pub(crate) async fn exchange_public_token(
        &self,
        public_token: &str,
    ) -> Result<String, EngineError> {
        let payload = PublicTokenExchangeRequest { public_token };
        let res: PublicTokenExchangeResponse =
            self.post("/item/public_token/exchange", &payload).await?;
        Ok(res.access_token)
    }

    pub(crate) async fn transactions_get(
        &self,
        access_token: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<Transaction>, EngineError> {
        let payload = TransactionsGetRequest {
            access_token,
            start_date,
            end_date,
        };

        let res: TransactionsGetResponse = self.post("/transactions/get", &payload).await?;
        Ok(res
            .transactions
            .into_iter()
            .map(|tx| Transaction {
                name: tx.name,
                amount: tx.amount,
                date: tx.date,
                category: tx.category.unwrap_or_default(),
            })
            .collect())
    }

    pub(crate) async fn accounts_get(
        &self,
        access_token: &str,
    ) -> Result<Vec<Account>, EngineError> {
        let payload = AccountsGetRequest { access_token };

        let res: AccountsGetResponse = self.post("/accounts/get", &payload).await?;
        Ok(res
            .accounts
            .into_iter()
            .map(|account| Account {
                name: account.name,
                kind: account.kind,
                subtype: account.subtype.unwrap_or_default(),
                balance: account.balances.current.unwrap_or_default(),
                mask: account.mask.unwrap_or_default(),
            })
            .collect())
    }
}
