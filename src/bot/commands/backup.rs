//! Backup commands - snapshot, list, restore, and factory reset.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, ensure_admin, format, handlers::autocomplete},
        core::OperationOutcome,
        errors::{Error, Result},
    };

    /// Captures settings, municipalities, and yield data into a new backup.
    #[poise::command(slash_command, prefix_command)]
    pub async fn backup(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ensure_admin(ctx)?;

        let outcome = OperationOutcome::from_result(ctx.data().admin.create_backup().await);
        ctx.say(format::outcome_line(&outcome, |b| {
            format!(
                "Backup `{}` created at {}",
                b.timestamp,
                format::format_timestamp(b.timestamp)
            )
        }))
        .await?;
        Ok(())
    }

    /// Lists all backups, newest first.
    #[poise::command(slash_command, prefix_command)]
    pub async fn backups(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ensure_admin(ctx)?;

        let backups = ctx.data().admin.list_backups().await;
        ctx.say(format::format_backups(&backups)?).await?;
        Ok(())
    }

    /// Restores settings, municipalities, and yield data from a backup.
    #[poise::command(slash_command, prefix_command)]
    pub async fn restore_backup(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Backup timestamp"]
        #[autocomplete = "autocomplete::autocomplete_backup"]
        timestamp: String,
    ) -> Result<()> {
        ensure_admin(ctx)?;

        let result = timestamp
            .trim()
            .parse::<i64>()
            .map_err(|_| Error::validation("timestamp", format!("'{timestamp}' is not a backup timestamp")));
        let result = match result {
            Ok(ts) => ctx.data().admin.restore_backup(ts).await.map(|()| ts),
            Err(e) => Err(e),
        };

        let outcome = OperationOutcome::from_result(result);
        ctx.say(format::outcome_line(&outcome, |ts| {
            format!("Restored backup from {}", format::format_timestamp(*ts))
        }))
        .await?;
        Ok(())
    }

    /// Restores the built-in settings, municipalities, and yield data. Backups are kept.
    #[poise::command(slash_command, prefix_command)]
    pub async fn reset_defaults(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ensure_admin(ctx)?;

        let outcome = OperationOutcome::from_result(ctx.data().admin.reset_to_defaults().await);
        ctx.say(format::outcome_line(&outcome, |()| {
            "All admin data reset to defaults".to_string()
        }))
        .await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
