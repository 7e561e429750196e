//! Municipality management commands - add, rename, soft-delete, and restore.
//!
//! All commands here are admin-only and report their result as a single line built from
//! the service's [`OperationOutcome`](crate::core::OperationOutcome).

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, ensure_admin, format, handlers::autocomplete},
        core::OperationOutcome,
        errors::{Error, Result},
        models::Municipality,
    };

    /// Adds a new municipality to the active set.
    #[poise::command(slash_command, prefix_command)]
    pub async fn add_municipality(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Unique id (e.g. tarlac)"] id: String,
        #[description = "Display name"] name: String,
        #[description = "Chart color, e.g. #4CAF50"] color: String,
    ) -> Result<()> {
        ensure_admin(ctx)?;

        let municipality = Municipality::new(id.trim(), name.trim(), color.trim());
        let result = ctx
            .data()
            .admin
            .add_municipality(municipality.clone())
            .await
            .map(|()| municipality);
        let outcome = OperationOutcome::from_result(result);
        ctx.say(format::outcome_line(&outcome, |m| {
            format!("Added **{}** (`{}`)", m.display_name, m.id)
        }))
        .await?;
        Ok(())
    }

    /// Changes the display name of a municipality.
    #[poise::command(slash_command, prefix_command)]
    pub async fn rename_municipality(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Municipality id"]
        #[autocomplete = "autocomplete::autocomplete_municipality"]
        municipality: String,
        #[description = "New display name"] name: String,
    ) -> Result<()> {
        ensure_admin(ctx)?;

        let outcome = OperationOutcome::from_result(
            ctx.data()
                .admin
                .edit_municipality_name(&municipality, &name)
                .await,
        );
        ctx.say(format::outcome_line(&outcome, |m| {
            format!("`{}` is now shown as **{}**", m.id, m.display_name)
        }))
        .await?;
        Ok(())
    }

    /// Soft-deletes a municipality. It can be restored with `/restore_municipality`.
    #[poise::command(slash_command, prefix_command)]
    pub async fn delete_municipality(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Municipality id"]
        #[autocomplete = "autocomplete::autocomplete_municipality"]
        municipality: String,
    ) -> Result<()> {
        ensure_admin(ctx)?;

        let outcome =
            OperationOutcome::from_result(ctx.data().admin.delete_municipality(&municipality).await);
        ctx.say(format::outcome_line(&outcome, |d| {
            format!(
                "Deleted **{}**. Its yield data was removed; restore brings back the municipality only.",
                d.municipality.display_name
            )
        }))
        .await?;
        Ok(())
    }

    /// Restores a soft-deleted municipality.
    #[poise::command(slash_command, prefix_command)]
    pub async fn restore_municipality(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Deleted municipality id"]
        #[autocomplete = "autocomplete::autocomplete_deleted_municipality"]
        municipality: String,
    ) -> Result<()> {
        ensure_admin(ctx)?;

        let outcome =
            OperationOutcome::from_result(ctx.data().admin.restore_municipality(&municipality).await);
        ctx.say(format::outcome_line(&outcome, |m| {
            format!("Restored **{}** (`{}`)", m.display_name, m.id)
        }))
        .await?;
        Ok(())
    }

    /// Lists soft-deleted municipalities.
    #[poise::command(slash_command, prefix_command)]
    pub async fn deleted(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ensure_admin(ctx)?;

        let deleted = ctx.data().admin.list_deleted().await;
        ctx.say(format::format_deleted(&deleted)?).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
