use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Plain success marker returned by write-style endpoints.
#[derive(Debug, Serialize, Deserialize)]
pub struct Confirmation {
    pub success: bool,
}

pub mod plaid {
    use super::*;

    /// Query string shared by the transaction, account and summary routes.
    ///
    /// The token is optional at the serde level so a missing parameter can be
    /// reported as a bad request instead of a deserialization failure.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct TokenQuery {
        #[serde(rename = "accessToken")]
        pub access_token: Option<String>,
    }

    /// Response for `GET /api/create-link-token`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct LinkTokenCreated {
        pub link_token: String,
    }

    /// Request body for `POST /api/exchange-public-token`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExchangePublicToken {
        #[serde(rename = "publicToken")]
        pub public_token: Option<String>,
    }

    /// Response for `POST /api/exchange-public-token`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct AccessTokenCreated {
        pub access_token: String,
    }

    /// A transaction stripped down to the fields the client renders.
    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    pub struct TransactionView {
        pub name: String,
        pub amount: Decimal,
        pub date: NaiveDate,
        pub category: Vec<String>,
    }

    /// A linked account stripped down to the fields the client renders.
    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    pub struct AccountView {
        pub name: String,
        #[serde(rename = "type")]
        pub kind: String,
        pub subtype: String,
        pub balance: Decimal,
        pub mask: String,
    }
}

pub mod summary {
    use super::*;

    /// Response for `GET /api/plaid/summary`.
    ///
    /// Both totals are net inflow: upstream reports money leaving the account
    /// as positive, so the aggregator negates the sums before they get here.
    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct SummaryResponse {
        pub today_total: Decimal,
        pub week_total: Decimal,
    }
}

pub mod user_data {
    use super::*;

    /// Query string for `GET /api/userData`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct UserDataQuery {
        #[serde(rename = "userId")]
        pub user_id: Option<String>,
    }

    /// The per-user document as it travels over the wire.
    ///
    /// The four collections are opaque to the server; clients own their shape.
    #[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
    #[serde(default)]
    pub struct UserDocument {
        pub accounts: Vec<Value>,
        pub cards: Vec<Value>,
        pub events: Vec<Value>,
        pub settings: Map<String, Value>,
    }

    /// Request body for `POST /api/userData`.
    ///
    /// Collections left out of the body are saved as empty: a write replaces
    /// the whole stored document, it never merges with the previous one.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct UserDataSave {
        #[serde(rename = "userId")]
        pub user_id: Option<String>,
        #[serde(default)]
        pub accounts: Vec<Value>,
        #[serde(default)]
        pub cards: Vec<Value>,
        #[serde(default)]
        pub events: Vec<Value>,
        #[serde(default)]
        pub settings: Map<String, Value>,
    }

}

pub mod email {
    use super::*;

    /// Request body for `POST /send-email`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct SendEmail {
        pub to: Option<String>,
        pub subject: Option<String>,
        pub message: Option<String>,
    }
}
