//! Handles settings for the application. Configuration is written in
//! `settings.toml`; any value can be overridden through the environment
//! with a `LEDGERLINK__` prefix (e.g. `LEDGERLINK__PLAID__SECRET`).

use config::{Config, ConfigError, Environment, File};
use engine::PlaidEnvironment;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct App {
    pub level: String,
}

#[derive(Debug, Deserialize)]
pub struct Server {
    pub bind: Option<String>,
    pub port: u16,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Database {
    Memory,
    Sqlite(String),
}

#[derive(Debug, Deserialize)]
pub struct Plaid {
    pub client_id: String,
    pub secret: String,
    #[serde(default)]
    pub environment: PlaidEnvironment,
    #[serde(default = "default_client_name")]
    pub client_name: String,
}

fn default_client_name() -> String {
    "Ledgerlink".to_string()
}

#[derive(Debug, Deserialize)]
pub struct Email {
    pub api_key: String,
    pub from: String,
    pub base_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub app: App,
    pub server: Server,
    pub database: Database,
    pub plaid: Plaid,
    pub email: Email,
    /// IANA zone name the summary evaluates "today" in. Defaults to UTC.
    pub timezone: Option<String>,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("settings"))
            .add_source(Environment::with_prefix("LEDGERLINK").separator("__"))
            .build()?;

        settings.try_deserialize()
    }
}
