//! Timeline, velocity, and staleness analysis
//!
//! Dated evidence is bucketed into month/quarter/year periods; velocity is
//! the mean bucket count with a simple two-half trend classification; a
//! competency is stale when its most recent qualifying evidence is older
//! than a day threshold, or when it has none at all.

use crate::analysis::matcher::match_record;
use crate::dates::quarter_label;
use crate::types::{Competency, EvidenceRecord};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Days without qualifying evidence before a competency counts as stale
pub const DEFAULT_STALE_DAYS: i64 = 90;

/// Match threshold for staleness tracking
///
/// Deliberately independent of the coverage analyzer's threshold parameter;
/// staleness always qualifies evidence at 0.5.
const STALE_MATCH_THRESHOLD: f32 = 0.5;

/// Time period granularity for evidence grouping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodGranularity {
    Month,
    Quarter,
    Year,
}

impl PeriodGranularity {
    fn label(&self, date: NaiveDate) -> String {
        match self {
            PeriodGranularity::Month => date.format("%Y-%m").to_string(),
            PeriodGranularity::Quarter => quarter_label(date),
            PeriodGranularity::Year => date.year().to_string(),
        }
    }
}

/// One time-period bucket of evidence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodBucket {
    /// Period label, e.g. `"2025-03"`, `"2025-Q1"`, or `"2025"`
    pub period: String,

    pub count: usize,

    /// Per-category subcounts; records without a category count as "Other"
    pub categories: BTreeMap<String, usize>,

    /// Constituent records
    pub files: Vec<EvidenceRecord>,
}

/// Trend classification from the two-half comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VelocityTrend {
    Accelerating,
    Decelerating,
    Stable,
    InsufficientData,
    NoData,
}

/// Evidence accumulation velocity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VelocityReport {
    /// Mean records per period, rounded to 1 decimal
    pub average: f64,

    pub trend: VelocityTrend,
}

/// A competency flagged as stale
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaleCompetency {
    pub competency: String,
    pub last_evidence_date: Option<String>,
    pub days_since: Option<i64>,
    pub note: String,
}

/// Bucket dated evidence into periods, sorted by label ascending
///
/// Records without a parseable date are skipped.
pub fn group_evidence_by_period(
    evidence: &[EvidenceRecord],
    granularity: PeriodGranularity,
) -> Vec<PeriodBucket> {
    let mut buckets: BTreeMap<String, PeriodBucket> = BTreeMap::new();

    for record in evidence {
        let Some(date) = record.parsed_date() else {
            continue;
        };
        let label = granularity.label(date);
        let bucket = buckets.entry(label.clone()).or_insert_with(|| PeriodBucket {
            period: label,
            count: 0,
            categories: BTreeMap::new(),
            files: Vec::new(),
        });

        bucket.count += 1;
        let category = record
            .category
            .as_ref()
            .map(|c| c.label().to_string())
            .unwrap_or_else(|| "Other".to_string());
        *bucket.categories.entry(category).or_default() += 1;
        bucket.files.push(record.clone());
    }

    buckets.into_values().collect()
}

/// Calculate evidence accumulation velocity over period buckets
///
/// The trend compares the first half of the period counts against the
/// second (the odd period, if any, falls in the second half): accelerating
/// above 1.2x, decelerating below 0.8x, stable between. Fewer than 4
/// periods cannot support a trend.
pub fn calculate_growth_velocity(periods: &[PeriodBucket]) -> VelocityReport {
    if periods.is_empty() {
        return VelocityReport {
            average: 0.0,
            trend: VelocityTrend::NoData,
        };
    }

    let counts: Vec<f64> = periods.iter().map(|p| p.count as f64).collect();
    let average = counts.iter().sum::<f64>() / counts.len() as f64;

    let trend = if counts.len() >= 4 {
        let mid = counts.len() / 2;
        let first_avg = counts[..mid].iter().sum::<f64>() / mid as f64;
        let second_avg = counts[mid..].iter().sum::<f64>() / (counts.len() - mid) as f64;

        if second_avg > first_avg * 1.2 {
            VelocityTrend::Accelerating
        } else if second_avg < first_avg * 0.8 {
            VelocityTrend::Decelerating
        } else {
            VelocityTrend::Stable
        }
    } else {
        VelocityTrend::InsufficientData
    };

    VelocityReport {
        average: (average * 10.0).round() / 10.0,
        trend,
    }
}

/// Find competencies with no recent qualifying evidence as of a given date
pub fn find_stale_competencies(
    evidence: &[EvidenceRecord],
    competencies: &[Competency],
    threshold_days: i64,
    as_of: NaiveDate,
) -> Vec<StaleCompetency> {
    // Latest qualifying evidence date per competency
    let mut latest: BTreeMap<&str, NaiveDate> = BTreeMap::new();

    for record in evidence {
        let Some(date) = record.parsed_date() else {
            continue;
        };
        for competency in competencies {
            let name = competency.category.as_str();
            if match_record(record, name) >= STALE_MATCH_THRESHOLD {
                let entry = latest.entry(name).or_insert(date);
                if date > *entry {
                    *entry = date;
                }
            }
        }
    }

    let mut stale = Vec::new();
    for competency in competencies {
        let name = competency.category.as_str();
        match latest.get(name) {
            None => stale.push(StaleCompetency {
                competency: name.to_string(),
                last_evidence_date: None,
                days_since: None,
                note: "No evidence found".to_string(),
            }),
            Some(last_date) => {
                let days_since = (as_of - *last_date).num_days();
                if days_since > threshold_days {
                    stale.push(StaleCompetency {
                        competency: name.to_string(),
                        last_evidence_date: Some(last_date.format("%Y-%m-%d").to_string()),
                        days_since: Some(days_since),
                        note: format!("No recent evidence in {days_since} days"),
                    });
                }
            }
        }
    }

    debug!(
        "{} of {} competencies stale at {} days",
        stale.len(),
        competencies.len(),
        threshold_days
    );
    stale
}
