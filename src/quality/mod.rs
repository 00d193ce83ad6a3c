//! Achievement and bullet quality scoring
//!
//! The metric extractor pulls typed quantifiable fragments out of free text;
//! the scorer turns those fragments plus verb/impact/length heuristics into
//! validation results and composite quality scores for resume writing.

pub mod metrics;
pub mod scorer;

pub use metrics::extract_metrics_from_text;
pub use scorer::{
    calculate_bullet_quality_score, check_action_verb, suggest_improvements,
    validate_achievement_metrics,
};
