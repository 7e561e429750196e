//! Admin commands for the settings singleton.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, ensure_admin, format},
        core::OperationOutcome,
        errors::{Error, Result},
        models::SettingsPatch,
    };

    /// Updates one or more admin settings.
    #[poise::command(slash_command, prefix_command)]
    pub async fn set_settings(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Maximum municipalities per comparison (1-20)"] max_compare: Option<u32>,
        #[description = "Warn when comparing more than this many"] threshold: Option<u32>,
        #[description = "Smooth comparison series by default"] smoothing: Option<bool>,
    ) -> Result<()> {
        ensure_admin(ctx)?;

        let patch = SettingsPatch {
            max_compare_municipalities: max_compare,
            performance_threshold: threshold,
            enable_smoothing_by_default: smoothing,
        };
        if patch == SettingsPatch::default() {
            ctx.say("Nothing to update. Pass at least one setting.").await?;
            return Ok(());
        }

        let outcome = OperationOutcome::from_result(ctx.data().admin.update_settings(patch).await);
        ctx.say(format::outcome_line(&outcome, |s| {
            format!(
                "Settings updated: max compare {}, warning above {}, smoothing {}",
                s.max_compare_municipalities,
                s.performance_threshold,
                if s.enable_smoothing_by_default { "on" } else { "off" }
            )
        }))
        .await?;
        Ok(())
    }

    /// Restores the default admin settings.
    #[poise::command(slash_command, prefix_command)]
    pub async fn reset_settings(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ensure_admin(ctx)?;

        let outcome = OperationOutcome::from_result(ctx.data().admin.reset_settings().await);
        ctx.say(format::outcome_line(&outcome, |_| {
            "Settings reset to defaults".to_string()
        }))
        .await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
