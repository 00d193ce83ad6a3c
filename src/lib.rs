//! Ergon - Career Evidence Analytics
//!
//! A knowledge-base analytics engine for markdown career vaults that
//! provides:
//! - Evidence file scanning with category and date-range filters
//! - Career ladder parsing into competencies
//! - Keyword-overlap matching of evidence to competencies
//! - Coverage, staleness, and growth-velocity reporting
//! - Achievement validation and resume bullet quality scoring
//!
//! # Architecture
//!
//! The crate is organized into layers:
//! - **Types**: Core data structures (EvidenceRecord, Competency, etc.)
//! - **Parsing**: Markdown field and section extraction, date expressions
//! - **Analysis**: Matching, coverage, and timeline reports
//! - **Quality**: Metric extraction and bullet scoring
//! - **Bridge**: Conversion into resume-building structures
//!
//! # Example
//!
//! ```ignore
//! use ergon::{analyze_coverage, parse_ladder, scan_evidence, ScanFilter, VaultConfig};
//!
//! fn main() -> ergon::Result<()> {
//!     let config = VaultConfig::resolve(None);
//!     let evidence = scan_evidence(&config, &ScanFilter::default());
//!     let ladder = parse_ladder(&config);
//!     let report = analyze_coverage(&evidence, &ladder.competencies, 0.5);
//!     println!("{}", serde_json::to_string_pretty(&report)?);
//!     Ok(())
//! }
//! ```

pub mod analysis;
pub mod bridge;
pub mod config;
pub mod dates;
pub mod error;
pub mod ladder;
pub mod markdown;
pub mod quality;
pub mod scanner;
pub mod types;

// Re-export commonly used types
pub use analysis::{
    analyze_coverage, calculate_growth_velocity, find_stale_competencies,
    group_evidence_by_period, match_evidence_to_competency, PeriodGranularity,
};
pub use config::VaultConfig;
pub use error::{ErgonError, Result};
pub use ladder::parse_ladder;
pub use quality::{
    calculate_bullet_quality_score, check_action_verb, extract_metrics_from_text,
    suggest_improvements, validate_achievement_metrics,
};
pub use scanner::{scan_evidence, ScanFilter};
pub use types::{
    Achievement, Competency, CoverageLevel, CoverageReport, EvidenceCategory, EvidenceRecord,
    LadderDocument, Metric, MetricKind, QualityScore, Role, ValidationOutcome,
};
