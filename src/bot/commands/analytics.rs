//! Read-only analytics commands available to every user.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, format, handlers::autocomplete},
        errors::{Error, Result},
    };

    /// Lists the active municipalities.
    #[poise::command(slash_command, prefix_command)]
    pub async fn municipalities(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let municipalities = ctx.data().admin.list_municipalities().await;
        ctx.say(format::format_municipalities(&municipalities)?).await?;
        Ok(())
    }

    /// Predicts next year's yield for a municipality from its history.
    #[poise::command(slash_command, prefix_command)]
    pub async fn predict(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Municipality id"]
        #[autocomplete = "autocomplete::autocomplete_municipality"]
        municipality: String,
    ) -> Result<()> {
        let admin = &ctx.data().admin;
        let prediction = admin.predict(&municipality).await?;
        let display_name = admin
            .list_municipalities()
            .await
            .into_iter()
            .find(|m| m.id == municipality)
            .map_or(municipality, |m| m.display_name);

        ctx.say(format::format_prediction(&prediction, &display_name))
            .await?;
        Ok(())
    }

    /// Compares yield trends of several municipalities.
    #[poise::command(slash_command, prefix_command)]
    pub async fn compare(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Comma-separated municipality ids (e.g. abucay,iba)"] municipalities: String,
    ) -> Result<()> {
        let ids: Vec<String> = municipalities
            .split(',')
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .collect();

        let comparison = ctx.data().admin.compare(&ids).await?;
        ctx.say(format::format_comparison(&comparison)?).await?;
        Ok(())
    }

    /// Shows the current admin settings.
    #[poise::command(slash_command, prefix_command)]
    pub async fn settings(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let settings = ctx.data().admin.get_settings().await;
        ctx.say(format::format_settings(&settings)?).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
