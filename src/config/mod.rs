/// Application configuration from config.toml and the environment
pub mod app;

/// Database configuration and connection management
pub mod database;

/// Built-in reference data loaded from the defaults seed
pub mod defaults;

/// Admin user ids from environment variables
pub mod admins;

pub use app::{AppConfig, EditNamePolicy};
pub use defaults::Defaults;
