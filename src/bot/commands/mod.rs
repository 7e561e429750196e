//! Discord command implementations organized by category.

#![allow(clippy::too_long_first_doc_paragraph)]

/// Prediction, comparison, and listing commands
pub mod analytics;

/// Backup and reset commands
pub mod backup;

/// Yield dataset import and export
pub mod dataset;

/// General utility commands
pub mod general;

/// Municipality management commands
pub mod municipality;

/// Settings commands
pub mod settings;

// Export commands
pub use analytics::*;
pub use backup::*;
pub use dataset::*;
pub use general::*;
pub use municipality::*;
pub use settings::*;
