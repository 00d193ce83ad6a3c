//! Competency matching heuristics
//!
//! Affinity between free-form evidence and a competency name is scored by a
//! strictly ordered three-tier heuristic; a higher tier always wins:
//!
//! 1. The competency name appears in the record's explicit ladder alignment
//!    → 1.0
//! 2. Any skill string contains the competency name, or vice versa → 0.8
//! 3. Keyword overlap between the competency name and the skills, scored as
//!    the matched proportion of the competency's keywords, capped at 0.6
//!
//! No semantic understanding: plain substring and keyword-set heuristics.

use crate::types::EvidenceRecord;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// Common English words dropped before keyword comparison
const STOPWORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "with", "from", "by",
    "as", "is", "was", "are", "were", "been", "be",
];

static WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w+").expect("invalid word pattern"));

/// Extract meaningful lowercase keywords from text
///
/// Word tokens are lowercased; stopwords and tokens of length <= 2 are
/// dropped.
pub fn extract_keywords(text: &str) -> HashSet<String> {
    WORD.find_iter(text)
        .map(|m| m.as_str().to_lowercase())
        .filter(|w| w.len() > 2 && !STOPWORDS.contains(&w.as_str()))
        .collect()
}

/// Score affinity between evidence and a competency name, in [0, 1]
pub fn match_evidence_to_competency(
    skills: &[String],
    ladder_alignment: &str,
    competency_name: &str,
) -> f32 {
    let competency_lower = competency_name.to_lowercase();

    // Tier 1: explicit ladder alignment short-circuits everything else
    if ladder_alignment.to_lowercase().contains(&competency_lower) {
        return 1.0;
    }

    // Tier 2: a skill mentions the competency, or the competency mentions
    // a skill
    for skill in skills {
        let skill_lower = skill.to_lowercase();
        if skill_lower.contains(&competency_lower) || competency_lower.contains(&skill_lower) {
            return 0.8;
        }
    }

    // Tier 3: keyword overlap, scored against the competency's keyword count
    let competency_keywords = extract_keywords(competency_name);
    if competency_keywords.is_empty() {
        return 0.0;
    }

    let skills_keywords = extract_keywords(&skills.join(" "));
    if skills_keywords.is_empty() {
        return 0.0;
    }

    let overlap = competency_keywords.intersection(&skills_keywords).count();
    if overlap == 0 {
        return 0.0;
    }

    (overlap as f32 / competency_keywords.len() as f32).min(0.6)
}

/// Score a full evidence record against a competency name
pub fn match_record(record: &EvidenceRecord, competency_name: &str) -> f32 {
    match_evidence_to_competency(&record.skills, &record.ladder_alignment, competency_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skills(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_keyword_extraction_drops_stopwords_and_short_tokens() {
        let keywords = extract_keywords("Led the design of an API for the team");
        assert!(keywords.contains("led"));
        assert!(keywords.contains("design"));
        assert!(keywords.contains("api"));
        assert!(keywords.contains("team"));
        assert!(!keywords.contains("the"));
        assert!(!keywords.contains("an"));
        assert!(!keywords.contains("of")); // length <= 2
    }

    #[test]
    fn test_tier1_alignment_wins_regardless_of_skills() {
        // No skills at all, but explicit alignment matches
        let score = match_evidence_to_competency(
            &[],
            "Maps to Technical Depth and Execution",
            "Technical Depth",
        );
        assert_eq!(score, 1.0);

        // Alignment match is case-insensitive
        let score =
            match_evidence_to_competency(&skills(&["unrelated"]), "technical depth", "Technical Depth");
        assert_eq!(score, 1.0);
    }

    #[test]
    fn test_tier2_skill_substring() {
        // Skill contains competency name
        let score = match_evidence_to_competency(
            &skills(&["Technical Depth in distributed systems"]),
            "",
            "Technical Depth",
        );
        assert_eq!(score, 0.8);

        // Competency name contains skill
        let score = match_evidence_to_competency(&skills(&["Execution"]), "", "Project Execution");
        assert_eq!(score, 0.8);
    }

    #[test]
    fn test_tier3_keyword_overlap_capped() {
        // "system design" vs skills mentioning design only: 1/2 = 0.5
        let score =
            match_evidence_to_competency(&skills(&["design reviews"]), "", "System Design");
        assert!((score - 0.5).abs() < 1e-6);

        // Full overlap would be 1.0 but caps at 0.6 -- a non-substring
        // arrangement so tier 2 stays out of the way
        let score = match_evidence_to_competency(
            &skills(&["design work", "system work"]),
            "",
            "System Design",
        );
        assert!((score - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_no_overlap_scores_zero() {
        let score = match_evidence_to_competency(&skills(&["gardening"]), "", "System Design");
        assert_eq!(score, 0.0);
    }

    #[test]
    fn test_empty_keyword_sets_score_zero() {
        // Competency name made only of stopwords/short tokens
        let score = match_evidence_to_competency(&skills(&["design"]), "", "of an it");
        assert_eq!(score, 0.0);

        // No skills text at all
        let score = match_evidence_to_competency(&[], "", "System Design");
        assert_eq!(score, 0.0);
    }

    #[test]
    fn test_tiers_are_strictly_ordered() {
        // Alignment present: skills that would score lower are ignored
        let score = match_evidence_to_competency(
            &skills(&["gardening"]),
            "Maps to: System Design",
            "System Design",
        );
        assert_eq!(score, 1.0);
    }
}
