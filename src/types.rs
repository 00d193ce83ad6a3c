//! Core data types for the Ergon evidence engine
//!
//! This module defines the value records passed between components: parsed
//! evidence documents, ladder competencies, extracted metrics, achievements,
//! and the analysis report shapes. All of them are owned values that are
//! cloned between components; nothing here is shared-mutable.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Evidence category, derived from folder position in the vault
///
/// The three well-known folders map to fixed variants; anything else found in
/// a document's `Category` field is carried as a free-text label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EvidenceCategory {
    #[serde(rename = "Achievements")]
    Achievements,

    #[serde(rename = "Feedback_Received")]
    FeedbackReceived,

    #[serde(rename = "Skills_Development")]
    SkillsDevelopment,

    /// Free-text label from the document's `Category` field
    #[serde(untagged)]
    Other(String),
}

impl EvidenceCategory {
    /// Map a label to a known category variant, falling back to `Other`
    pub fn from_label(label: &str) -> Self {
        match label {
            "Achievements" => EvidenceCategory::Achievements,
            "Feedback_Received" => EvidenceCategory::FeedbackReceived,
            "Skills_Development" => EvidenceCategory::SkillsDevelopment,
            other => EvidenceCategory::Other(other.to_string()),
        }
    }

    /// The vault folder name / label for this category
    pub fn label(&self) -> &str {
        match self {
            EvidenceCategory::Achievements => "Achievements",
            EvidenceCategory::FeedbackReceived => "Feedback_Received",
            EvidenceCategory::SkillsDevelopment => "Skills_Development",
            EvidenceCategory::Other(label) => label,
        }
    }
}

impl std::fmt::Display for EvidenceCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Category-specific payload for feedback records
///
/// Present only on records with `category == FeedbackReceived`; other
/// categories never carry it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeedbackDetail {
    pub positive: Vec<String>,
    pub constructive: Vec<String>,
}

/// One parsed evidence document from the vault
///
/// Recreated fresh on every scan; never persisted. A record degraded by an
/// I/O failure carries an `error` note, `date = None`, and a title derived
/// from the filename, but still participates in the scan result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvidenceRecord {
    /// Vault-relative path; serves as the record's identity
    pub filepath: String,

    /// ISO `YYYY-MM-DD` date from the filename, if present
    pub date: Option<String>,

    pub title: String,

    pub category: Option<EvidenceCategory>,

    /// Project name from the `## Project` section
    pub project: String,

    pub skills: Vec<String>,

    pub impact: Vec<String>,

    pub stakeholders: Vec<String>,

    /// `Maps to` value from the `## Ladder Alignment` section (may be empty)
    pub ladder_alignment: String,

    pub last_modified: Option<DateTime<Utc>>,

    /// Feedback payload, present only for feedback-category records
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<FeedbackDetail>,

    /// Error note for records degraded by a read failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl EvidenceRecord {
    /// Degraded record for a file that could not be read
    pub fn degraded(filepath: String, title: String, error: String) -> Self {
        Self {
            filepath,
            date: None,
            title,
            category: None,
            project: String::new(),
            skills: Vec::new(),
            impact: Vec::new(),
            stakeholders: Vec::new(),
            ladder_alignment: String::new(),
            last_modified: None,
            feedback: None,
            error: Some(error),
        }
    }

    /// The record's date as a calendar date, if present and parseable
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        self.date
            .as_deref()
            .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
    }
}

/// A named capability area from a career ladder
///
/// `target_level_requirements` is non-empty by construction: the ladder
/// parser drops candidates with zero requirement bullets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Competency {
    pub category: String,
    pub target_level_requirements: Vec<String>,
}

/// Parsed career ladder document, restricted to the target-level section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LadderDocument {
    pub filepath: String,
    pub company: String,
    pub current_level: String,
    pub target_level: String,
    pub last_updated: String,
    pub competencies: Vec<Competency>,

    /// Error note when the ladder file is missing or unreadable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Kind of quantifiable metric found in free text
///
/// `Multiple` is reserved for composite metrics; the extractor never
/// produces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricKind {
    Percentage,
    Dollar,
    Count,
    Time,
    Multiple,
}

/// A quantifiable fragment extracted from free text
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metric {
    pub kind: MetricKind,

    /// Raw matched substring, e.g. `"34%"` or `"500+ users"`
    pub value: String,

    /// Text window around the match, clipped to text bounds
    pub context: String,
}

/// A professional achievement with extracted metrics
///
/// `validation_score` is written only by the metrics validator; the rest is
/// immutable once constructed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Achievement {
    pub description: String,
    pub metrics: Vec<Metric>,
    pub impact: String,
    pub skills: Vec<String>,
    pub timeline: Option<String>,
    pub validation_score: f32,
}

/// A professional role, as consumed from the resume-building collaborator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Role {
    pub title: String,
    pub company: String,

    /// `YYYY-MM`
    pub start_date: String,

    /// `YYYY-MM` or `"present"`
    pub end_date: String,

    pub achievements: Vec<Achievement>,
}

/// Result of a validation check with actionable feedback
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationOutcome {
    pub is_valid: bool,
    pub score: f32,
    pub errors: Vec<String>,
    pub suggestions: Vec<String>,
}

/// Per-dimension quality score for a resume bullet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityScore {
    pub has_action_verb: f32,
    pub has_metrics: f32,
    pub has_impact: f32,
    pub appropriate_length: f32,
    pub overall: f32,
}

/// Qualitative coverage bucket for a competency
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum CoverageLevel {
    None,
    Weak,
    Moderate,
    Strong,
}

impl CoverageLevel {
    /// Bucket an evidence count: none=0, weak=1, moderate=2-4, strong>=5
    pub fn from_count(count: usize) -> Self {
        match count {
            0 => CoverageLevel::None,
            1 => CoverageLevel::Weak,
            2..=4 => CoverageLevel::Moderate,
            _ => CoverageLevel::Strong,
        }
    }
}

impl std::fmt::Display for CoverageLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CoverageLevel::None => write!(f, "none"),
            CoverageLevel::Weak => write!(f, "weak"),
            CoverageLevel::Moderate => write!(f, "moderate"),
            CoverageLevel::Strong => write!(f, "strong"),
        }
    }
}

/// One evidence record that matched a competency
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchedEvidence {
    pub filepath: String,
    pub title: String,
    pub date: Option<String>,

    /// Match score rounded to 2 decimals for reporting
    pub match_score: f32,
}

/// Coverage summary for one competency
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoverageEntry {
    pub competency: String,
    pub evidence_count: usize,
    pub coverage_level: CoverageLevel,

    /// Up to 3 example titles, highest score then most recent
    pub example_files: Vec<String>,

    /// Up to 5 skills contributed by matching evidence
    pub skills_mentioned: Vec<String>,

    /// Full match list, sorted by score desc then date desc
    pub all_evidence: Vec<MatchedEvidence>,
}

/// Full coverage report across a ladder's competencies
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoverageReport {
    pub coverage_by_competency: Vec<CoverageEntry>,
    pub overall_coverage: BTreeMap<CoverageLevel, usize>,
    pub under_documented: Vec<String>,
    pub well_documented: Vec<String>,
    pub total_evidence_files: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_label_roundtrip() {
        assert_eq!(
            EvidenceCategory::from_label("Feedback_Received"),
            EvidenceCategory::FeedbackReceived
        );
        assert_eq!(
            EvidenceCategory::from_label("Mentoring"),
            EvidenceCategory::Other("Mentoring".to_string())
        );
        assert_eq!(EvidenceCategory::Achievements.label(), "Achievements");
    }

    #[test]
    fn test_category_serializes_as_folder_name() {
        let json = serde_json::to_string(&EvidenceCategory::FeedbackReceived).unwrap();
        assert_eq!(json, "\"Feedback_Received\"");

        let json = serde_json::to_string(&EvidenceCategory::Other("Mentoring".into())).unwrap();
        assert_eq!(json, "\"Mentoring\"");
    }

    #[test]
    fn test_coverage_level_buckets() {
        assert_eq!(CoverageLevel::from_count(0), CoverageLevel::None);
        assert_eq!(CoverageLevel::from_count(1), CoverageLevel::Weak);
        assert_eq!(CoverageLevel::from_count(2), CoverageLevel::Moderate);
        assert_eq!(CoverageLevel::from_count(4), CoverageLevel::Moderate);
        assert_eq!(CoverageLevel::from_count(5), CoverageLevel::Strong);
        assert_eq!(CoverageLevel::from_count(17), CoverageLevel::Strong);
    }

    #[test]
    fn test_degraded_record_shape() {
        let record = EvidenceRecord::degraded(
            "Evidence/broken.md".to_string(),
            "broken".to_string(),
            "Failed to read file: permission denied".to_string(),
        );
        assert!(record.error.is_some());
        assert!(record.date.is_none());
        assert!(record.parsed_date().is_none());
        assert_eq!(record.title, "broken");
    }

    #[test]
    fn test_parsed_date() {
        let mut record = EvidenceRecord::degraded("a.md".into(), "a".into(), "x".into());
        record.error = None;
        record.date = Some("2025-03-10".to_string());
        assert_eq!(
            record.parsed_date(),
            NaiveDate::from_ymd_opt(2025, 3, 10)
        );

        record.date = Some("2025-13-99".to_string());
        assert!(record.parsed_date().is_none());
    }
}
