//! Quantifiable metric extraction from free text
//!
//! Four independent pattern families run over the input in a fixed declared
//! order: percentage, currency, count, duration. The families are not
//! mutually exclusive; a span can satisfy more than one and will appear as
//! separate metrics. Results are ordered by family, then left-to-right
//! within a family.

use crate::types::{Metric, MetricKind};
use once_cell::sync::Lazy;
use regex::Regex;

/// Context window radius around percentage and currency matches
const WIDE_RADIUS: usize = 20;

/// Context window radius around count and duration matches
const NARROW_RADIUS: usize = 15;

/// Percentages: `34%`, `12.5%`, `40 percent`
static PERCENTAGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\d+(?:\.\d+)?%|\d+(?:\.\d+)?\s*percent").expect("invalid percentage pattern")
});

/// Currency amounts: `$2.1M`, `£50K`, `€3 million`
static CURRENCY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)[$£€]\s*\d+(?:\.\d+)?[KMB]?(?:\s*(?:thousand|million|billion))?")
        .expect("invalid currency pattern")
});

/// Counts: a number followed by a role or entity noun, e.g. `500+ users`,
/// `12 team members`
static COUNT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\d+\+?\s*(?:users?|customers?|people|employees?|team members?|projects?|products?|companies?)",
    )
    .expect("invalid count pattern")
});

/// Durations: a number followed by a time unit, e.g. `6 months`, `2 years`
static DURATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\d+\s*(?:day|week|month|quarter|year)s?").expect("invalid duration pattern")
});

/// Extract every quantifiable metric from free text
///
/// Text without quantifiable numbers yields an empty list.
pub fn extract_metrics_from_text(text: &str) -> Vec<Metric> {
    let mut metrics = Vec::new();
    collect_family(text, &PERCENTAGE, MetricKind::Percentage, WIDE_RADIUS, &mut metrics);
    collect_family(text, &CURRENCY, MetricKind::Dollar, WIDE_RADIUS, &mut metrics);
    collect_family(text, &COUNT, MetricKind::Count, NARROW_RADIUS, &mut metrics);
    collect_family(text, &DURATION, MetricKind::Time, NARROW_RADIUS, &mut metrics);
    metrics
}

fn collect_family(
    text: &str,
    pattern: &Regex,
    kind: MetricKind,
    radius: usize,
    out: &mut Vec<Metric>,
) {
    for m in pattern.find_iter(text) {
        out.push(Metric {
            kind,
            value: m.as_str().to_string(),
            context: context_window(text, m.start(), m.end(), radius),
        });
    }
}

/// A fixed-radius window around a match, clipped to the text bounds
///
/// Window edges are nudged onto UTF-8 character boundaries so the slice
/// never splits a multi-byte character.
fn context_window(text: &str, start: usize, end: usize, radius: usize) -> String {
    let mut lo = start.saturating_sub(radius);
    while !text.is_char_boundary(lo) {
        lo -= 1;
    }
    let mut hi = (end + radius).min(text.len());
    while !text.is_char_boundary(hi) {
        hi += 1;
    }
    text[lo..hi].trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_numbers_no_metrics() {
        assert!(extract_metrics_from_text("Improved the onboarding experience").is_empty());
        assert!(extract_metrics_from_text("").is_empty());
    }

    #[test]
    fn test_percentage_and_count_sentence() {
        let metrics =
            extract_metrics_from_text("We grew revenue by 34% and added 500+ users");
        assert_eq!(metrics.len(), 2);

        assert_eq!(metrics[0].kind, MetricKind::Percentage);
        assert_eq!(metrics[0].value, "34%");

        assert_eq!(metrics[1].kind, MetricKind::Count);
        assert_eq!(metrics[1].value, "500+ users");
    }

    #[test]
    fn test_percent_spelled_out() {
        let metrics = extract_metrics_from_text("reduced costs by 12.5 percent");
        assert_eq!(metrics.len(), 1);
        assert_eq!(metrics[0].kind, MetricKind::Percentage);
        assert_eq!(metrics[0].value, "12.5 percent");
    }

    #[test]
    fn test_currency_symbols_and_suffixes() {
        let metrics = extract_metrics_from_text("saved $2.1M and later £50K, then €3 million");
        let values: Vec<&str> = metrics.iter().map(|m| m.value.as_str()).collect();
        assert_eq!(values, vec!["$2.1M", "£50K", "€3 million"]);
        assert!(metrics.iter().all(|m| m.kind == MetricKind::Dollar));
    }

    #[test]
    fn test_duration_units() {
        let metrics = extract_metrics_from_text("over 6 months and 2 years, within 1 quarter");
        let values: Vec<&str> = metrics.iter().map(|m| m.value.as_str()).collect();
        assert_eq!(values, vec!["6 months", "2 years", "1 quarter"]);
        assert!(metrics.iter().all(|m| m.kind == MetricKind::Time));
    }

    #[test]
    fn test_families_overlap_freely() {
        // "12 team members" is a count; "6 months" is a duration; the span
        // "34%" is only a percentage. A phrase like "3 quarters" can be both
        // a count-adjacent and duration family hit only via its own family.
        let metrics = extract_metrics_from_text("Led 12 team members for 6 months, up 34%");
        let kinds: Vec<MetricKind> = metrics.iter().map(|m| m.kind).collect();
        // Family order: percentage first, then count, then time
        assert_eq!(
            kinds,
            vec![MetricKind::Percentage, MetricKind::Count, MetricKind::Time]
        );
    }

    #[test]
    fn test_family_order_then_left_to_right() {
        let metrics = extract_metrics_from_text("added 10 users then 20 customers, up 5%");
        let values: Vec<&str> = metrics.iter().map(|m| m.value.as_str()).collect();
        // Percentage family reports first despite appearing last in the text
        assert_eq!(values, vec!["5%", "10 users", "20 customers"]);
    }

    #[test]
    fn test_context_window_clipped_to_bounds() {
        let metrics = extract_metrics_from_text("34% growth");
        assert_eq!(metrics[0].context, "34% growth");

        let metrics = extract_metrics_from_text(
            "after a long stretch of effort we finally grew revenue by 34% across every region",
        );
        let context = &metrics[0].context;
        assert!(context.contains("34%"));
        // Window radius is 20 on each side, plus the match itself
        assert!(context.len() <= 20 + "34%".len() + 20);
    }

    #[test]
    fn test_context_window_respects_char_boundaries() {
        // Multi-byte characters near the window edge must not split
        let text = "éééééééééééééééééééé 34% éééééééééééééééééééé";
        let metrics = extract_metrics_from_text(text);
        assert_eq!(metrics[0].value, "34%");
        assert!(metrics[0].context.contains("34%"));
    }

    #[test]
    fn test_multiple_is_never_produced() {
        let metrics = extract_metrics_from_text(
            "$1M and 40% and 6 months and 100 users in 2 quarters",
        );
        assert!(metrics.iter().all(|m| m.kind != MetricKind::Multiple));
    }
}
