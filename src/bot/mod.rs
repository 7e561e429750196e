//! Bot layer - Discord-specific interface and command handlers
//!
//! This module provides the Discord interface for the admin service: read-only analytics
//! commands for everyone, and admin commands gated on `ADMIN_USER_IDS`.

/// Discord command implementations (general, analytics, municipalities, settings, backups)
pub mod commands;
/// Reply formatting shared by the commands
pub mod format;
/// Discord interaction handlers (autocomplete, etc.)
pub mod handlers;

use crate::{
    core::AdminService,
    errors::{Error, Result},
};
use poise::serenity_prelude as serenity;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{error, info, instrument};

/// Shared data available to all bot commands.
pub struct BotData {
    /// The admin data service
    pub admin: Arc<AdminService>,
    /// Discord user ids allowed to run admin commands
    pub admin_ids: HashSet<String>,
}

impl BotData {
    /// Creates a new `BotData` instance.
    #[must_use]
    pub const fn new(admin: Arc<AdminService>, admin_ids: HashSet<String>) -> Self {
        Self { admin, admin_ids }
    }

    /// Returns `true` if `user_id` may run admin commands.
    #[must_use]
    pub fn is_admin(&self, user_id: &str) -> bool {
        self.admin_ids.contains(user_id)
    }
}

/// Poise context used by every command.
pub type Context<'a> = poise::Context<'a, BotData, Error>;

/// Fails with `Unauthorized` unless the caller is a configured admin.
pub fn ensure_admin(ctx: Context<'_>) -> Result<()> {
    let user_id = ctx.author().id.to_string();
    if ctx.data().is_admin(&user_id) {
        Ok(())
    } else {
        Err(Error::Unauthorized {
            message: "this command is limited to admins".to_string(),
        })
    }
}

async fn on_error(error: poise::FrameworkError<'_, BotData, Error>) {
    match error {
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!("Error in command `{}`: {:?}", ctx.command().name, error);
            if let Err(e) = ctx.say(format!("❌ {error}")).await {
                error!("Failed to send error message: {}", e);
            }
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                error!("Error while handling error: {}", e);
            }
        }
    }
}

/// All commands registered with Discord.
#[must_use]
pub fn all_commands() -> Vec<poise::Command<BotData, Error>> {
    vec![
        commands::ping(),
        commands::help(),
        commands::municipalities(),
        commands::predict(),
        commands::compare(),
        commands::settings(),
        commands::set_settings(),
        commands::reset_settings(),
        commands::add_municipality(),
        commands::rename_municipality(),
        commands::delete_municipality(),
        commands::restore_municipality(),
        commands::deleted(),
        commands::import(),
        commands::export(),
        commands::backup(),
        commands::backups(),
        commands::restore_backup(),
        commands::reset_defaults(),
    ]
}

/// Connects to Discord and serves commands until the client stops.
#[instrument(skip(token, data))]
pub async fn run_bot(token: String, data: BotData) -> Result<()> {
    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: all_commands(),
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(|ctx, ready, framework| {
            Box::pin(async move {
                info!("Logged in as {}", ready.user.name);
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                Ok(data)
            })
        })
        .build();

    let intents = serenity::GatewayIntents::non_privileged();

    info!("Setting up Serenity client for Poise framework...");
    let mut client = serenity::ClientBuilder::new(token, intents)
        .framework(framework)
        .await?;

    info!("Starting bot client...");
    client.start().await?;
    Ok(())
}
