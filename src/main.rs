use anilytics_admin::{
    bot::{self, BotData},
    config::{self, AppConfig},
    core::AdminService,
    errors::{Error, Result},
    storage::SeaOrmStore,
};
use dotenvy::dotenv;
use std::{env, sync::Arc};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();

    // 3. Application configuration and reference data
    let app_config = AppConfig::load_or_default(config::app::config_path())
        .inspect_err(|e| error!("Failed to load configuration: {}", e))?;
    let defaults = app_config.defaults()?;

    // 4. Durable store
    let db = config::database::create_connection()
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    config::database::create_tables(&db).await?;
    info!("Database initialized successfully.");

    // 5. Admin service, hydrated from storage
    let store = Arc::new(SeaOrmStore::new(db));
    let admin = AdminService::load(store, defaults, app_config.admin.edit_name_policy)
        .await
        .inspect_err(|e| error!("Failed to load admin data: {}", e))?;

    let admin_ids = config::admins::get_admin_ids();
    if admin_ids.is_empty() {
        warn!("ADMIN_USER_IDS is empty; admin commands are disabled");
    }

    // 6. Run the bot
    let token = env::var("DISCORD_BOT_TOKEN").map_err(|e| Error::Config {
        message: format!("DISCORD_BOT_TOKEN: {e}"),
    })?;

    bot::run_bot(token, BotData::new(Arc::new(admin), admin_ids)).await
}
