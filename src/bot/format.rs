//! Reply text for Discord messages.
//!
//! Pure functions so the layout can be tested without a Discord connection.

use crate::core::{
    OperationOutcome,
    compare::Comparison,
    prediction::{Prediction, YieldLevel},
};
use crate::models::{AdminSettings, BackupSnapshot, DeletedMunicipality, Municipality};
use std::fmt::Write;

/// Discord rejects messages longer than this.
pub const MESSAGE_LIMIT: usize = 2000;

/// Renders Unix milliseconds as a UTC date and time.
#[must_use]
pub fn format_timestamp(millis: i64) -> String {
    chrono::DateTime::from_timestamp_millis(millis).map_or_else(
        || millis.to_string(),
        |dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
    )
}

/// One-line reply for an admin operation.
pub fn outcome_line<T>(outcome: &OperationOutcome<T>, describe: impl FnOnce(&T) -> String) -> String {
    match (&outcome.data, &outcome.message) {
        (Some(data), _) if outcome.success => format!("✅ {}", describe(data)),
        (_, Some(message)) => match outcome.error_kind {
            Some(kind) => format!("❌ {message} ({kind:?})"),
            None => format!("❌ {message}"),
        },
        _ => "❌ Operation failed".to_string(),
    }
}

/// Cuts `text` to fit a single Discord message.
#[must_use]
pub fn truncate(mut text: String) -> String {
    if text.len() <= MESSAGE_LIMIT {
        return text;
    }
    let mut end = MESSAGE_LIMIT - 1;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    text.truncate(end);
    text.push('…');
    text
}

/// Lists active municipalities.
pub fn format_municipalities(municipalities: &[Municipality]) -> Result<String, std::fmt::Error> {
    if municipalities.is_empty() {
        return Ok("🗺️ No active municipalities.".to_string());
    }
    let mut out = format!("🗺️ **Municipalities** ({})\n", municipalities.len());
    for m in municipalities {
        writeln!(out, "• **{}** (`{}`) {}", m.display_name, m.id, m.color)?;
    }
    Ok(truncate(out))
}

/// Lists soft-deleted municipalities with their deletion time.
pub fn format_deleted(deleted: &[DeletedMunicipality]) -> Result<String, std::fmt::Error> {
    if deleted.is_empty() {
        return Ok("🗑️ No deleted municipalities.".to_string());
    }
    let mut out = String::from("🗑️ **Deleted municipalities**\n");
    for entry in deleted {
        writeln!(
            out,
            "• **{}** (`{}`) deleted {}",
            entry.municipality.display_name,
            entry.municipality.id,
            format_timestamp(entry.deleted_at)
        )?;
    }
    Ok(truncate(out))
}

/// Settings summary.
pub fn format_settings(settings: &AdminSettings) -> Result<String, std::fmt::Error> {
    let mut out = String::from("⚙️ **Admin settings**\n");
    writeln!(
        out,
        "• Max municipalities per comparison: {}",
        settings.max_compare_municipalities
    )?;
    writeln!(
        out,
        "• Performance warning above: {}",
        settings.performance_threshold
    )?;
    writeln!(
        out,
        "• Smoothing by default: {}",
        if settings.enable_smoothing_by_default { "on" } else { "off" }
    )?;
    Ok(out)
}

/// Prediction summary with a colored level marker.
pub fn format_prediction(prediction: &Prediction, display_name: &str) -> String {
    let icon = match prediction.level {
        YieldLevel::High => "🟢",
        YieldLevel::Medium => "🟡",
        YieldLevel::Low => "🔴",
    };
    let mut out = format!(
        "{icon} **{display_name}**: predicted yield {:.2} t/ha ({:?}), confidence {:.1}%",
        prediction.predicted_yield, prediction.level, prediction.confidence
    );
    if prediction.fallback {
        out.push_str("\n_No history for this municipality; using the average of all datasets._");
    }
    out
}

/// One line per series, with the performance warning when set.
pub fn format_comparison(comparison: &Comparison) -> Result<String, std::fmt::Error> {
    let mut out = String::from("📈 **Yield comparison**");
    if comparison.smoothed {
        out.push_str(" (smoothed)");
    }
    out.push('\n');
    for series in &comparison.series {
        let points = series
            .years
            .iter()
            .zip(&series.values)
            .map(|(year, value)| format!("{year}: {value:.2}"))
            .collect::<Vec<_>>()
            .join(", ");
        writeln!(out, "• **{}** {}", series.display_name, points)?;
    }
    if comparison.performance_warning {
        out.push_str("⚠️ Comparing this many municipalities may be slow on older devices.\n");
    }
    Ok(truncate(out))
}

/// Lists backups, newest first.
pub fn format_backups(backups: &[BackupSnapshot]) -> Result<String, std::fmt::Error> {
    if backups.is_empty() {
        return Ok("💾 No backups yet. Create one with `/backup`.".to_string());
    }
    let mut out = format!("💾 **Backups** ({})\n", backups.len());
    for backup in backups.iter().rev() {
        writeln!(
            out,
            "• `{}` {} ({} municipalities, {} datasets)",
            backup.timestamp,
            format_timestamp(backup.timestamp),
            backup.municipalities.len(),
            backup.yield_data.len()
        )?;
    }
    Ok(truncate(out))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::errors::Error;

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(0), "1970-01-01 00:00:00 UTC");
        assert_eq!(format_timestamp(1_700_000_000_000), "2023-11-14 22:13:20 UTC");
    }

    #[test]
    fn test_outcome_line() {
        let ok = OperationOutcome::from_result(Ok(3));
        assert_eq!(outcome_line(&ok, |n| format!("{n} imported")), "✅ 3 imported");

        let err: OperationOutcome<u32> =
            OperationOutcome::from_result(Err(Error::not_found("Municipality", "zeta")));
        assert_eq!(
            outcome_line(&err, |n| n.to_string()),
            "❌ Municipality not found: zeta (NotFound)"
        );
    }

    #[test]
    fn test_truncate_respects_limit() {
        let long = "é".repeat(MESSAGE_LIMIT);
        let cut = truncate(long);
        assert!(cut.len() <= MESSAGE_LIMIT + '…'.len_utf8());
        assert!(cut.ends_with('…'));
        assert_eq!(truncate("short".to_string()), "short");
    }

    #[test]
    fn test_format_settings() {
        let text = format_settings(&AdminSettings::default()).unwrap();
        assert!(text.contains("Max municipalities per comparison: 8"));
        assert!(text.contains("Smoothing by default: off"));
    }

    #[test]
    fn test_format_prediction_fallback_note() {
        let prediction = Prediction {
            municipality_id: "iba".to_string(),
            predicted_yield: 0.5,
            confidence: 85.0,
            level: YieldLevel::Medium,
            fallback: true,
        };
        let text = format_prediction(&prediction, "Iba");
        assert!(text.starts_with("🟡 **Iba**: predicted yield 0.50 t/ha (Medium), confidence 85.0%"));
        assert!(text.contains("average of all datasets"));
    }
}
