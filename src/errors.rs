//! Unified error types and result handling.
//!
//! Every fallible operation in the crate returns [`Result`]. UI collaborators that need a
//! flat success/failure shape can classify an [`Error`] with [`Error::kind`].

use serde::Serialize;
use thiserror::Error;

/// Coarse classification of an [`Error`], as reported to UI collaborators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    /// A referenced id or timestamp does not exist
    NotFound,
    /// Input was rejected before any state changed
    Validation,
    /// Durable storage failed or holds unreadable data
    Persistence,
    /// Anything outside the admin data model (bot, config, formatting)
    Other,
}

/// Errors produced by the admin service, its storage, and the bot layer.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{entity} not found: {key}")]
    NotFound { entity: &'static str, key: String },

    #[error("Invalid {field}: {message}")]
    Validation { field: &'static str, message: String },

    #[error("Storage error: {message}")]
    Persistence { message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Export error: {message}")]
    Export { message: String },

    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    #[error("Formatting error: {0}")]
    Fmt(#[from] std::fmt::Error),

    #[error("Serenity/Poise framework error: {0}")]
    Framework(Box<poise::serenity_prelude::Error>),
}

impl Error {
    /// Classifies the error for UI collaborators.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Validation { .. } => ErrorKind::Validation,
            Self::Persistence { .. } | Self::Serialization(_) => ErrorKind::Persistence,
            Self::Config { .. }
            | Self::Export { .. }
            | Self::Unauthorized { .. }
            | Self::Fmt(_)
            | Self::Framework(_) => ErrorKind::Other,
        }
    }

    pub(crate) fn not_found(entity: &'static str, key: impl ToString) -> Self {
        Self::NotFound {
            entity,
            key: key.to_string(),
        }
    }

    pub(crate) fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }
}

impl From<sea_orm::DbErr> for Error {
    fn from(value: sea_orm::DbErr) -> Self {
        Self::Persistence {
            message: value.to_string(),
        }
    }
}

impl From<poise::serenity_prelude::Error> for Error {
    fn from(value: poise::serenity_prelude::Error) -> Self {
        Self::Framework(Box::new(value))
    }
}

impl From<csv::Error> for Error {
    fn from(value: csv::Error) -> Self {
        Self::Export {
            message: value.to_string(),
        }
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
