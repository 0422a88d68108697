use chrono_tz::Tz;
use engine::{EmailConfig, PlaidConfig};
use migration::{Migrator, MigratorTrait};
use settings::Database;

mod settings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let settings = settings::Settings::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "ledgerlink={level},server={level}",
            level = settings.app.level
        ))
        .init();

    let timezone: Tz = match &settings.timezone {
        Some(name) => name
            .parse()
            .map_err(|err| format!("invalid timezone {name:?}: {err}"))?,
        None => chrono_tz::UTC,
    };

    let db = parse_database(&settings.database).await?;
    tracing::info!("database ready, migrations applied");

    let engine = engine::Engine::builder()
        .plaid(PlaidConfig {
            client_id: settings.plaid.client_id,
            secret: settings.plaid.secret,
            environment: settings.plaid.environment,
            client_name: settings.plaid.client_name,
            base_url: None,
        })
        .email(EmailConfig {
            api_key: settings.email.api_key,
            from: settings.email.from,
            base_url: settings.email.base_url,
        })
        .database(db)
        .timezone(timezone)
        .build()?;

    let bind = settings
        .server
        .bind
        .unwrap_or_else(|| "127.0.0.1".to_string());
    let addr = format!("{}:{}", bind, settings.server.port);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    server::run_with_listener(engine, listener).await?;

    Ok(())
}

async fn parse_database(
    config: &settings::Database,
) -> Result<sea_orm::DatabaseConnection, Box<dyn std::error::Error + Send + Sync>> {
    let url = match config {
        Database::Memory => String::from("sqlite::memory:"),
        Database::Sqlite(path) => format!("sqlite:{}?mode=rwc", path),
    };

    let database = sea_orm::Database::connect(url).await?;
    Migrator::up(&database, None).await?;
    Ok(database)
}
