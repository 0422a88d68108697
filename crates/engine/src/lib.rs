use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use sea_orm::DatabaseConnection;

pub use accounts::Account;
pub use error::EngineError;
pub use mailer::EmailConfig;
pub use plaid::{PlaidConfig, PlaidEnvironment};
pub use store::UserDocument;
pub use summary::Summary;
pub use transactions::Transaction;

mod accounts;
mod error;
mod mailer;
mod plaid;
mod store;
mod summary;
mod transactions;

type ResultEngine<T> = Result<T, EngineError>;

/// Trailing window for the spend summary, in civil days.
const SUMMARY_WINDOW_DAYS: u64 = 7;
/// Trailing window for the raw transaction listing, in civil days.
const LISTING_WINDOW_DAYS: u64 = 30;

/// The aggregation engine: every operation the HTTP surface exposes, minus
/// the HTTP. Holds the upstream clients, the document store connection and
/// the timezone policy; owns no per-request state.
#[derive(Debug)]
pub struct Engine {
    plaid: plaid::PlaidClient,
    mailer: mailer::Mailer,
    database: DatabaseConnection,
    timezone: Tz,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    /// The current civil date under the configured timezone.
    ///
    /// Every date comparison in the engine goes through this, so "today"
    /// and the window bounds can never disagree about the zone.
    fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.timezone).date_naive()
    }

    /// Ask the provider for a fresh Link initialization token.
    pub async fn create_link_token(&self) -> ResultEngine<String> {
        self.plaid.create_link_token().await
    }

    /// Trade the public token coming back from the Link flow for the
    /// long-lived access token.
    pub async fn exchange_public_token(
        &self,
        public_token: Option<&str>,
    ) -> ResultEngine<String> {
        let public_token = required(public_token, "publicToken")?;
        self.plaid.exchange_public_token(public_token).await
    }

    /// List transactions over the trailing 30 civil days.
    pub async fn transactions(
        &self,
        access_token: Option<&str>,
    ) -> ResultEngine<Vec<Transaction>> {
        let access_token = required(access_token, "accessToken")?;
        let (start, end) = summary::trailing_window(self.today(), LISTING_WINDOW_DAYS);
        self.plaid.transactions_get(access_token, start, end).await
    }

    /// List the linked accounts.
    pub async fn accounts(&self, access_token: Option<&str>) -> ResultEngine<Vec<Account>> {
        let access_token = required(access_token, "accessToken")?;
        self.plaid.accounts_get(access_token).await
    }

    /// Compute today's and the trailing week's net totals.
    ///
    /// Fetches the inclusive `[today - 7 days, today]` window and folds it;
    /// nothing is cached, a repeated call re-fetches and re-computes.
    pub async fn summary(&self, access_token: Option<&str>) -> ResultEngine<Summary> {
        let access_token = required(access_token, "accessToken")?;
        let today = self.today();
        let (start, end) = summary::trailing_window(today, SUMMARY_WINDOW_DAYS);
        let transactions = self.plaid.transactions_get(access_token, start, end).await?;
        Ok(summary::summarize(&transactions, today))
    }

    /// Load the stored document for a user, default-shaped when absent.
    pub async fn user_data(&self, user_id: Option<&str>) -> ResultEngine<UserDocument> {
        let user_id = required(user_id, "userId")?;
        store::load(&self.database, user_id).await
    }

    /// Replace the stored document for a user.
    pub async fn save_user_data(
        &self,
        user_id: Option<&str>,
        document: UserDocument,
    ) -> ResultEngine<()> {
        let user_id = required(user_id, "userId")?;
        store::save(&self.database, user_id, &document).await
    }

    /// Send a plain-text email through the configured provider.
    pub async fn send_email(
        &self,
        to: Option<&str>,
        subject: Option<&str>,
        message: Option<&str>,
    ) -> ResultEngine<()> {
        let to = required(to, "to")?;
        let subject = required(subject, "subject")?;
        let message = required(message, "message")?;
        self.mailer.send(to, subject, message).await
    }
}

/// A required field must be present and non-blank.
fn required<'a>(value: Option<&'a str>, field: &str) -> ResultEngine<&'a str> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(EngineError::MissingField(field.to_string())),
    }
}

/// Builder for [`Engine`].
#[derive(Debug, Default)]
pub struct EngineBuilder {
    plaid: Option<PlaidConfig>,
    email: Option<EmailConfig>,
    database: Option<DatabaseConnection>,
    timezone: Option<Tz>,
}

impl EngineBuilder {
    /// Pass the financial-provider credentials.
    pub fn plaid(mut self, config: PlaidConfig) -> EngineBuilder {
        self.plaid = Some(config);
        self
    }

    /// Pass the email-provider credentials.
    pub fn email(mut self, config: EmailConfig) -> EngineBuilder {
        self.email = Some(config);
        self
    }

    /// Pass the required database.
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = Some(db);
        self
    }

    /// Pick the timezone "today" is evaluated in. Defaults to UTC.
    pub fn timezone(mut self, timezone: Tz) -> EngineBuilder {
        self.timezone = Some(timezone);
        self
    }

    /// Construct `Engine`.
    pub fn build(self) -> ResultEngine<Engine> {
        let plaid = self
            .plaid
            .ok_or_else(|| EngineError::Configuration("plaid config is required".to_string()))?;
        let email = self
            .email
            .ok_or_else(|| EngineError::Configuration("email config is required".to_string()))?;
        let database = self
            .database
            .ok_or_else(|| EngineError::Configuration("database is required".to_string()))?;

        Ok(Engine {
            plaid: plaid::PlaidClient::new(plaid)?,
            mailer: mailer::Mailer::new(email)?,
            database,
            timezone: self.timezone.unwrap_or(chrono_tz::UTC),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_rejects_missing_and_blank() {
        assert!(matches!(
            required(None, "accessToken"),
            Err(EngineError::MissingField(field)) if field == "accessToken"
        ));
        assert!(matches!(
            required(Some(""), "userId"),
            Err(EngineError::MissingField(_))
        ));
        assert!(matches!(
            required(Some("   "), "userId"),
            Err(EngineError::MissingField(_))
        ));
    }

    #[test]
    fn required_passes_values_through() {
        assert_eq!(required(Some("tok-1"), "accessToken").unwrap(), "tok-1");
    }

    #[test]
    fn missing_field_message_matches_wire_format() {
        let err = EngineError::MissingField("accessToken".to_string());
        assert_eq!(err.to_string(), "Missing accessToken");
    }
}
