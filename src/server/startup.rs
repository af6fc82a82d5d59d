use std::{path::PathBuf, sync::Arc, time::Duration};

use crate::server::{
    config::Config,
    error::AppError,
    service::{
        ai::llm::{FallbackGenerator, GigaChatClient, MessageGenerator},
        moderation::ModerationService,
    },
    state::AppState,
    util::jwt::JwtKeys,
};

/// Timeout applied to every outbound language model request.
const LLM_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Connects to the Sqlite database and runs pending migrations.
///
/// Establishes a connection pool to the Sqlite database using the connection string from
/// configuration, then automatically runs all pending SeaORM migrations to ensure the database
/// schema is up-to-date. This function must complete successfully before the application can
/// access the database.
///
/// # Arguments
/// - `config` - Application configuration containing the database URL
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Connected database with migrations applied
/// - `Err(Error)` - Failed to connect to database or run migrations
pub async fn connect_to_database(config: &Config) -> Result<sea_orm::DatabaseConnection, AppError> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Builds the HTTP client used for language model calls.
///
/// Redirects are disabled so a misconfigured endpoint cannot bounce credentials to
/// another host.
pub fn setup_reqwest_client() -> Result<reqwest::Client, AppError> {
    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .timeout(LLM_REQUEST_TIMEOUT)
        .build()?;

    Ok(client)
}

/// Picks the insight message generator.
///
/// Uses the GigaChat client when an authorization key is configured and falls back to
/// canned per-kind texts otherwise.
pub fn setup_generator(
    config: &Config,
    http_client: reqwest::Client,
) -> Arc<dyn MessageGenerator> {
    match &config.llm {
        Some(llm) => {
            tracing::info!("Insight messages are phrased by model {}", llm.model);
            Arc::new(GigaChatClient::new(http_client, llm.clone()))
        }
        None => {
            tracing::warn!("LLM_AUTH_KEY is not set, insight messages use fallback texts");
            Arc::new(FallbackGenerator)
        }
    }
}

/// Creates the avatar upload directory if needed.
pub async fn prepare_upload_dir(config: &Config) -> Result<PathBuf, AppError> {
    let dir = PathBuf::from(&config.upload_dir);
    tokio::fs::create_dir_all(&dir).await?;

    Ok(dir)
}

/// Assembles the shared application state from configuration.
pub async fn build_state(
    config: &Config,
    db: sea_orm::DatabaseConnection,
) -> Result<AppState, AppError> {
    let http_client = setup_reqwest_client()?;
    let generator = setup_generator(config, http_client);
    let upload_dir = prepare_upload_dir(config).await?;

    Ok(AppState::new(
        db,
        JwtKeys::new(&config.jwt_secret, config.jwt_expires_in_days),
        ModerationService::new(config.moderation_blocklist.clone()),
        generator,
        upload_dir,
    ))
}
