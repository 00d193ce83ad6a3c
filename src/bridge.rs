//! Bridge between vault evidence and resume-building structures
//!
//! Evidence records are vault-shaped; resume tooling consumes achievements
//! and roles. These converters sit between the two so neither side needs to
//! know about the other's format.

use crate::config::VaultConfig;
use crate::dates::DateBounds;
use crate::quality::metrics::extract_metrics_from_text;
use crate::quality::scorer::validate_achievement_metrics;
use crate::scanner::{scan_evidence, ScanFilter};
use crate::types::{Achievement, EvidenceRecord, Role};
use chrono::NaiveDate;
use tracing::debug;

/// Convert an evidence record into a resume achievement
///
/// Metrics are re-extracted from the combined title and impact text rather
/// than trusting anything stored in the record, and the validation score is
/// computed up front so callers can rank achievements immediately.
pub fn evidence_to_achievement(record: &EvidenceRecord) -> Achievement {
    let description = if record.title.is_empty() {
        "Untitled Achievement".to_string()
    } else {
        record.title.clone()
    };
    let impact = record.impact.join(" | ");

    let all_text = format!("{description} {impact}");
    let metrics = extract_metrics_from_text(&all_text);

    let mut achievement = Achievement {
        description,
        metrics,
        impact,
        skills: record.skills.clone(),
        // The timeline is left for the resume builder to fill in; the
        // record's date reflects when the evidence was captured, not the
        // achievement's span
        timeline: None,
        validation_score: 0.0,
    };
    achievement.validation_score = validate_achievement_metrics(&achievement).score;
    achievement
}

/// Find evidence records that fall within a role's tenure
///
/// Role dates are `YYYY-MM`; each is anchored to the first of its month. An
/// end date of `"present"` (case-insensitive) means `as_of`. Unparseable
/// dates yield an empty list rather than an unbounded scan.
pub fn find_role_evidence(
    config: &VaultConfig,
    role: &Role,
    as_of: NaiveDate,
) -> Vec<EvidenceRecord> {
    let Some(start) = parse_month_start(&role.start_date) else {
        debug!(
            "Unparseable role start date '{}' for {} at {}",
            role.start_date, role.title, role.company
        );
        return Vec::new();
    };

    let end = if role.end_date.eq_ignore_ascii_case("present") {
        as_of
    } else {
        match parse_month_start(&role.end_date) {
            Some(d) => d,
            None => {
                debug!(
                    "Unparseable role end date '{}' for {} at {}",
                    role.end_date, role.title, role.company
                );
                return Vec::new();
            }
        }
    };

    let date_range: DateBounds = (Some(start), Some(end));
    scan_evidence(
        config,
        &ScanFilter {
            category: None,
            date_range,
        },
    )
}

fn parse_month_start(year_month: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{year_month}-01"), "%Y-%m-%d").ok()
}
