//! Achievement validation and bullet quality scoring
//!
//! An achievement must carry at least one quantifiable metric to be valid;
//! more metrics and more diverse metric kinds raise the score. Bullet
//! quality is a weighted composite of action verb strength, metric count,
//! impact language, and length.

use crate::quality::metrics::extract_metrics_from_text;
use crate::types::{Achievement, MetricKind, QualityScore, ValidationOutcome};
use std::collections::HashSet;

/// Strong action verbs by category
const STRONG_ACTION_VERBS: &[(&str, &[&str])] = &[
    (
        "leadership",
        &["Led", "Directed", "Managed", "Drove", "Spearheaded", "Orchestrated", "Championed", "Guided"],
    ),
    (
        "creation",
        &["Built", "Designed", "Developed", "Launched", "Created", "Architected", "Established", "Founded"],
    ),
    (
        "improvement",
        &["Optimized", "Enhanced", "Improved", "Streamlined", "Transformed", "Revamped", "Modernized"],
    ),
    (
        "achievement",
        &["Delivered", "Achieved", "Generated", "Increased", "Reduced", "Exceeded", "Accelerated"],
    ),
    (
        "analysis",
        &["Analyzed", "Identified", "Evaluated", "Assessed", "Diagnosed", "Investigated"],
    ),
    (
        "collaboration",
        &["Partnered", "Collaborated", "Coordinated", "Aligned", "Facilitated", "Engaged"],
    ),
];

/// Weak openers that undersell the work
const WEAK_VERBS_TO_AVOID: &[&str] = &[
    "helped",
    "worked on",
    "assisted",
    "responsible for",
    "involved in",
    "participated in",
];

/// Impact language checked by the bullet quality score
const IMPACT_KEYWORDS: &[&str] = &[
    "increased",
    "reduced",
    "improved",
    "generated",
    "saved",
    "achieved",
    "delivered",
    "exceeded",
    "accelerated",
    "grew",
];

/// Validate that an achievement has sufficient quantifiable metrics
///
/// When the explicit metric list is empty, a fallback extraction runs over
/// the description and impact text. If the fallback also finds nothing the
/// achievement is invalid at 0.0 with fixed remediation suggestions. If the
/// fallback does find metrics, the score is still derived from the (empty)
/// explicit list, so the base score stays 0 and only the count/diversity
/// bonuses apply; the suggestions point out the implicit metrics instead.
pub fn validate_achievement_metrics(achievement: &Achievement) -> ValidationOutcome {
    let mut suggestions = Vec::new();

    if achievement.metrics.is_empty() {
        let all_text = format!("{} {}", achievement.description, achievement.impact);
        let found = extract_metrics_from_text(&all_text);

        if found.is_empty() {
            return ValidationOutcome {
                is_valid: false,
                score: 0.0,
                errors: vec!["No quantifiable metrics found".to_string()],
                suggestions: vec![
                    "Add specific numbers or percentages".to_string(),
                    "Include dollar amounts if applicable".to_string(),
                    "Specify team sizes or user counts".to_string(),
                    "Mention timeframes (e.g., 'within 6 months')".to_string(),
                ],
            };
        }

        suggestions.push(format!(
            "Found {} implicit metrics - consider making them more prominent",
            found.len()
        ));
    }

    let metric_kinds: HashSet<MetricKind> =
        achievement.metrics.iter().map(|m| m.kind).collect();

    let base_score = if achievement.metrics.is_empty() { 0.0 } else { 0.5 };
    let count_bonus = (achievement.metrics.len() as f32 * 0.1).min(0.3);
    let diversity_bonus = (metric_kinds.len() as f32 * 0.07).min(0.2);
    let total_score = base_score + count_bonus + diversity_bonus;

    if achievement.metrics.len() == 1 && achievement.metrics[0].kind == MetricKind::Time {
        suggestions.push(
            "Consider adding impact metrics (percentages, dollars, counts) in addition to timeframe"
                .to_string(),
        );
    }

    if total_score < 0.7 {
        suggestions
            .push("Consider adding more quantifiable outcomes for stronger impact".to_string());
    }

    ValidationOutcome {
        is_valid: total_score >= 0.5,
        score: total_score.min(1.0),
        errors: Vec::new(),
        suggestions,
    }
}

/// Check whether a bullet opens with a strong action verb
///
/// The first token (trailing punctuation stripped) is checked against the
/// weak-verb denylist before the strong-verb allowlist; an opener on
/// neither list is valid at 0.7.
pub fn check_action_verb(bullet_text: &str) -> ValidationOutcome {
    let first_word = bullet_text.split_whitespace().next().unwrap_or("");
    let first_word_lower = first_word
        .trim_end_matches(['.', ',', ';', ':'])
        .to_lowercase();

    if WEAK_VERBS_TO_AVOID.contains(&first_word_lower.as_str()) {
        let mut suggestions = Vec::new();
        if matches!(first_word_lower.as_str(), "helped" | "assisted") {
            suggestions.push("Use stronger verbs like: Led, Supported, Enabled, Drove".to_string());
        } else {
            suggestions
                .push("Use stronger verbs like: Built, Delivered, Managed, Owned".to_string());
        }
        return ValidationOutcome {
            is_valid: false,
            score: 0.3,
            errors: vec![format!("Weak action verb: '{first_word}'")],
            suggestions,
        };
    }

    let is_strong = STRONG_ACTION_VERBS
        .iter()
        .flat_map(|(_, verbs)| verbs.iter())
        .any(|verb| verb.eq_ignore_ascii_case(&first_word_lower));

    if is_strong {
        return ValidationOutcome {
            is_valid: true,
            score: 1.0,
            errors: Vec::new(),
            suggestions: Vec::new(),
        };
    }

    ValidationOutcome {
        is_valid: true,
        score: 0.7,
        errors: Vec::new(),
        suggestions: vec![
            "Consider starting with a strong action verb (Led, Built, Drove, etc.)".to_string(),
        ],
    }
}

/// Composite quality score for one resume bullet
///
/// `overall = 0.25*verb + 0.35*metrics + 0.25*impact + 0.15*length`, where
/// the metric factor saturates at 1.0 from 3 metrics, impact language is
/// worth 1.0 (0.5 otherwise), and length scores peak in the 100-180
/// character band.
pub fn calculate_bullet_quality_score(bullet: &str) -> QualityScore {
    let action_verb_score = check_action_verb(bullet).score;

    let metric_count = extract_metrics_from_text(bullet).len();
    let metrics_score = if metric_count > 0 {
        (metric_count as f32 * 0.4).min(1.0)
    } else {
        0.0
    };

    let bullet_lower = bullet.to_lowercase();
    let has_impact = IMPACT_KEYWORDS.iter().any(|kw| bullet_lower.contains(kw));
    let impact_score = if has_impact { 1.0 } else { 0.5 };

    let length = bullet.len();
    let length_score = if (100..=180).contains(&length) {
        1.0
    } else if (80..=200).contains(&length) {
        0.8
    } else if length < 80 {
        0.6
    } else {
        0.5
    };

    let overall = action_verb_score * 0.25
        + metrics_score * 0.35
        + impact_score * 0.25
        + length_score * 0.15;

    QualityScore {
        has_action_verb: action_verb_score,
        has_metrics: metrics_score,
        has_impact: impact_score,
        appropriate_length: length_score,
        overall,
    }
}

/// Actionable improvement suggestions for a bullet
pub fn suggest_improvements(bullet: &str) -> Vec<String> {
    let mut suggestions = Vec::new();

    let verb_check = check_action_verb(bullet);
    if !verb_check.is_valid {
        suggestions.extend(verb_check.suggestions);
    }

    let metric_count = extract_metrics_from_text(bullet).len();
    if metric_count == 0 {
        suggestions
            .push("Add quantifiable metrics (numbers, percentages, dollar amounts)".to_string());
    } else if metric_count == 1 {
        suggestions.push("Consider adding additional metrics to show broader impact".to_string());
    }

    let bullet_lower = bullet.to_lowercase();
    let core_impact = ["increased", "reduced", "improved", "generated", "saved"];
    if !core_impact.iter().any(|kw| bullet_lower.contains(kw)) {
        suggestions
            .push("Add an impact statement (how it helped the business/users)".to_string());
    }

    let length = bullet.len();
    if length < 80 {
        suggestions.push("Expand with more context or additional impact details".to_string());
    } else if length > 200 {
        suggestions.push("Consider shortening for better readability".to_string());
    }

    suggestions
}
