//! Discord interaction handlers
//!
//! Handlers for non-command interactions such as autocomplete.

/// Autocomplete handlers for municipality ids and backup timestamps
pub mod autocomplete;
