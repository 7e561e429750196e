//! Autocomplete handlers for Discord slash command parameters.

use crate::bot::Context;

/// Discord shows at most 25 suggestions.
const MAX_SUGGESTIONS: usize = 25;

fn matching(candidates: impl Iterator<Item = String>, partial: &str) -> Vec<String> {
    let partial_lower = partial.to_lowercase();
    let mut matching: Vec<String> = candidates
        .filter(|c| c.to_lowercase().contains(&partial_lower))
        .take(MAX_SUGGESTIONS)
        .collect();
    matching.sort();
    matching
}

/// Suggests ids of active municipalities.
pub async fn autocomplete_municipality(ctx: Context<'_>, partial: &str) -> Vec<String> {
    let municipalities = ctx.data().admin.list_municipalities().await;
    matching(municipalities.into_iter().map(|m| m.id), partial)
}

/// Suggests ids of soft-deleted municipalities.
pub async fn autocomplete_deleted_municipality(ctx: Context<'_>, partial: &str) -> Vec<String> {
    let deleted = ctx.data().admin.list_deleted().await;
    matching(deleted.into_iter().map(|d| d.municipality.id), partial)
}

/// Suggests backup timestamps, newest first.
pub async fn autocomplete_backup(ctx: Context<'_>, partial: &str) -> Vec<String> {
    let backups = ctx.data().admin.list_backups().await;
    backups
        .iter()
        .rev()
        .map(|b| b.timestamp.to_string())
        .filter(|ts| ts.starts_with(partial))
        .take(MAX_SUGGESTIONS)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matching_is_case_insensitive_and_sorted() {
        let ids = ["laoag", "Legazpi", "iba", "clark"].map(str::to_string);
        assert_eq!(
            matching(ids.into_iter(), "L"),
            vec!["Legazpi".to_string(), "clark".to_string(), "laoag".to_string()]
        );
    }
}
