//! Yield dataset import and export.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, ensure_admin, format},
        core::{ExportFormat, ImportMode, OperationOutcome},
        errors::{Error, Result},
        models::MunicipalityYieldData,
    };
    use poise::serenity_prelude as serenity;

    #[derive(Debug, Clone, Copy, poise::ChoiceParameter)]
    pub enum ImportChoice {
        #[name = "append"]
        Append,
        #[name = "replace"]
        Replace,
    }

    impl From<ImportChoice> for ImportMode {
        fn from(choice: ImportChoice) -> Self {
            match choice {
                ImportChoice::Append => Self::Append,
                ImportChoice::Replace => Self::Replace,
            }
        }
    }

    #[derive(Debug, Clone, Copy, poise::ChoiceParameter)]
    pub enum ExportChoice {
        #[name = "csv"]
        Csv,
        #[name = "json"]
        Json,
    }

    impl From<ExportChoice> for ExportFormat {
        fn from(choice: ExportChoice) -> Self {
            match choice {
                ExportChoice::Csv => Self::Csv,
                ExportChoice::Json => Self::Json,
            }
        }
    }

    /// Imports yield datasets from an attached JSON file.
    #[poise::command(slash_command)]
    pub async fn import(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "JSON array of yield datasets"] file: serenity::Attachment,
        #[description = "Append to or replace the current datasets"] mode: ImportChoice,
    ) -> Result<()> {
        ensure_admin(ctx)?;

        let bytes = file.download().await?;
        let result = match serde_json::from_slice::<Vec<MunicipalityYieldData>>(&bytes) {
            Ok(data) => ctx.data().admin.import_yield_data(data, mode.into()).await,
            Err(e) => Err(Error::validation("file", e.to_string())),
        };

        let outcome = OperationOutcome::from_result(result);
        ctx.say(format::outcome_line(&outcome, |n| {
            format!("Imported {n} dataset(s) from `{}`", file.filename)
        }))
        .await?;
        Ok(())
    }

    /// Exports all yield datasets as a file.
    #[poise::command(slash_command, prefix_command)]
    pub async fn export(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "File format"] format: ExportChoice,
    ) -> Result<()> {
        ensure_admin(ctx)?;

        let format = ExportFormat::from(format);
        let body = ctx.data().admin.export_yield_data(format).await?;
        let filename = match format {
            ExportFormat::Csv => "yield_data.csv",
            ExportFormat::Json => "yield_data.json",
        };

        ctx.send(
            poise::CreateReply::default()
                .content("📤 Yield data export")
                .attachment(serenity::CreateAttachment::bytes(body.into_bytes(), filename)),
        )
        .await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
