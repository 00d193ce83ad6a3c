//! Evidence-to-competency analysis
//!
//! The matcher scores affinity between one evidence record and one
//! competency name; the coverage analyzer aggregates those scores across a
//! ladder; the timeline analyzer derives period buckets, accumulation
//! velocity, and staleness flags from the same matches.

pub mod coverage;
pub mod matcher;
pub mod timeline;

pub use coverage::{analyze_coverage, DEFAULT_MATCH_THRESHOLD};
pub use matcher::{extract_keywords, match_evidence_to_competency, match_record};
pub use timeline::{
    calculate_growth_velocity, find_stale_competencies, group_evidence_by_period,
    PeriodBucket, PeriodGranularity, StaleCompetency, VelocityReport, VelocityTrend,
    DEFAULT_STALE_DAYS,
};
