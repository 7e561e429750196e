//! General Discord commands - ping, help, and other utility commands.
//! This module contains simple commands that don't touch the admin data
//! and provide basic bot functionality and user assistance.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::BotData,
        errors::{Error, Result},
    };

    /// Responds with "Pong!" to test bot connectivity.
    #[poise::command(slash_command, prefix_command)]
    pub async fn ping(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.say("Pong!").await?;
        Ok(())
    }

    /// Displays help information about available commands.
    #[poise::command(slash_command, prefix_command)]
    pub async fn help(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "**Anilytics Help**\n\
        Rice-yield analytics and reference data management.\n\n\
        **Analytics**\n\
        • `/municipalities` - Lists the active municipalities.\n\
        • `/predict <municipality>` - Predicts next year's yield.\n\
        • `/compare <ids>` - Compares yield trends (comma-separated ids).\n\
        • `/settings` - Shows the admin settings.\n\n\
        **Admin**\n\
        • `/set_settings [max_compare] [threshold] [smoothing]` - Updates settings.\n\
        • `/reset_settings` - Restores default settings.\n\
        • `/add_municipality <id> <name> <color>` - Adds a municipality.\n\
        • `/rename_municipality <municipality> <name>` - Edits a display name.\n\
        • `/delete_municipality <municipality>` - Soft-deletes a municipality.\n\
        • `/restore_municipality <municipality>` - Restores a deleted municipality.\n\
        • `/deleted` - Lists deleted municipalities.\n\
        • `/import <file> <mode>` - Imports yield datasets from JSON.\n\
        • `/export <format>` - Exports yield datasets as CSV or JSON.\n\
        • `/backup`, `/backups`, `/restore_backup <timestamp>` - Manage backups.\n\
        • `/reset_defaults` - Restores the built-in reference data.\n\n\
        **Utility**\n\
        • `/ping` - Checks if the bot is responsive.\n\
        • `/help` - Shows this help message.";

        ctx.say(help_text).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
