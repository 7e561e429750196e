//! Core business logic - framework-agnostic admin data operations.
//!
//! The four data components ([`settings`], [`municipality`], [`deleted`], [`backup`]) are pure
//! and compute next states; [`service::AdminService`] owns them and persists every change.

/// Backup Ledger - append-only snapshots
pub mod backup;
/// Trend comparison across municipalities
pub mod compare;
/// Yield dataset import and export
pub mod dataset;
/// Soft-Delete Ledger
pub mod deleted;
/// Entity Store - municipalities and yield datasets
pub mod municipality;
/// Structured success/failure results
pub mod outcome;
/// Yield prediction
pub mod prediction;
/// Admin Facade
pub mod service;
/// Settings Store - validation and merge
pub mod settings;

pub use dataset::{ExportFormat, ImportMode};
pub use outcome::OperationOutcome;
pub use service::AdminService;
