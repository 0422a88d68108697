//! HTTP client for the transactional-email provider.
//!
//! The provider takes a bearer API key and a flat JSON body; the engine
//! only ever needs fire-and-forget plain-text sends.

use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::EngineError;

const DEFAULT_BASE_URL: &str = "https://api.resend.com";

/// Server-held email-provider configuration.
#[derive(Clone, Debug)]
pub struct EmailConfig {
    pub api_key: String,
    /// Sender address, e.g. `"Ledgerlink <noreply@ledgerlink.dev>"`.
    pub from: String,
    /// Overrides the provider base URL. Tests point this at a local mock.
    pub base_url: Option<String>,
}

#[derive(Debug)]
pub(crate) struct Mailer {
    endpoint: Url,
    api_key: String,
    from: String,
    http: reqwest::Client,
}

#[derive(Serialize)]
struct SendRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    text: &'a str,
}

#[derive(Deserialize)]
struct SendError {
    message: String,
}

impl Mailer {
    pub(crate) fn new(config: EmailConfig) -> Result<Self, EngineError> {
        let base = config
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let endpoint = Url::parse(&base)
            .and_then(|url| url.join("/emails"))
            .map_err(|err| EngineError::Configuration(format!("invalid email base url: {err}")))?;

        Ok(Self {
            endpoint,
            api_key: config.api_key,
            from: config.from,
            http: reqwest::Client::new(),
        })
    }

    pub(crate) async fn send(
        &self,
        to: &str,
        subject: &str,
        message: &str,
    ) -> Result<(), EngineError> {
        let payload = SendRequest {
            from: &self.from,
            to: [to],
            subject,
            text: message,
        };

        let res = self
            .http
            .post(self.endpoint.clone())
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await?;

        if res.status().is_success() {
            return Ok(());
        }

        let message = res
            .json::<SendError>()
            .await
            .map(|err| err.message)
            .unwrap_or_else(|_| "unknown email provider error".to_string());
        Err(EngineError::Upstream(message))
    }
}
