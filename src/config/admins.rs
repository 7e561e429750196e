//! Admin gate configuration.
//!
//! Admin commands are only available to Discord users listed in `ADMIN_USER_IDS`
//! (comma-separated user ids in the `.env` file or the environment).

use std::collections::HashSet;

/// Parses a comma-separated list of user ids, ignoring blanks and surrounding whitespace.
#[must_use]
pub fn parse_admin_ids(raw: &str) -> HashSet<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect()
}

/// Gets the set of admin user ids from `ADMIN_USER_IDS`.
///
/// Returns an empty set when the variable is not configured, which locks every admin
/// command.
#[must_use]
pub fn get_admin_ids() -> HashSet<String> {
    std::env::var("ADMIN_USER_IDS")
        .map(|raw| parse_admin_ids(&raw))
        .unwrap_or_default()
}
