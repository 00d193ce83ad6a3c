//! Competency coverage analysis
//!
//! Maps scanned evidence onto a ladder's competencies and buckets each
//! competency by how much qualifying evidence supports it.

use crate::analysis::matcher::match_record;
use crate::types::{
    Competency, CoverageEntry, CoverageLevel, CoverageReport, EvidenceRecord, MatchedEvidence,
};
use std::collections::{BTreeMap, HashSet};
use tracing::debug;

/// Minimum match score for evidence to count toward a competency
///
/// At 0.5, keyword-overlap matches (tier 3) contribute only when at least
/// half of the competency's keywords are present, since the 0.6 cap never
/// binds below that fraction.
pub const DEFAULT_MATCH_THRESHOLD: f32 = 0.5;

const MAX_EXAMPLE_FILES: usize = 3;
const MAX_SKILLS_MENTIONED: usize = 5;

/// Analyze how well the evidence covers each competency
pub fn analyze_coverage(
    evidence: &[EvidenceRecord],
    competencies: &[Competency],
    threshold: f32,
) -> CoverageReport {
    let mut coverage = Vec::with_capacity(competencies.len());

    for competency in competencies {
        let name = &competency.category;
        let mut matched: Vec<MatchedEvidence> = Vec::new();
        let mut skills_seen: HashSet<String> = HashSet::new();
        let mut skills_mentioned: Vec<String> = Vec::new();

        for record in evidence {
            let score = match_record(record, name);
            if score < threshold {
                continue;
            }

            matched.push(MatchedEvidence {
                filepath: record.filepath.clone(),
                title: record.title.clone(),
                date: record.date.clone(),
                match_score: round2(score),
            });

            for skill in &record.skills {
                if skills_seen.insert(skill.clone()) {
                    skills_mentioned.push(skill.clone());
                }
            }
        }

        // Highest score first, most recent first within a score
        matched.sort_by(|a, b| {
            b.match_score
                .total_cmp(&a.match_score)
                .then_with(|| {
                    b.date
                        .as_deref()
                        .unwrap_or("")
                        .cmp(a.date.as_deref().unwrap_or(""))
                })
        });

        let count = matched.len();
        skills_mentioned.truncate(MAX_SKILLS_MENTIONED);

        coverage.push(CoverageEntry {
            competency: name.clone(),
            evidence_count: count,
            coverage_level: CoverageLevel::from_count(count),
            example_files: matched
                .iter()
                .take(MAX_EXAMPLE_FILES)
                .map(|m| m.title.clone())
                .collect(),
            skills_mentioned,
            all_evidence: matched,
        });
    }

    let mut overall_coverage: BTreeMap<CoverageLevel, usize> = BTreeMap::new();
    for entry in &coverage {
        *overall_coverage.entry(entry.coverage_level).or_default() += 1;
    }

    let under_documented = coverage
        .iter()
        .filter(|c| matches!(c.coverage_level, CoverageLevel::Weak | CoverageLevel::None))
        .map(|c| c.competency.clone())
        .collect();
    let well_documented = coverage
        .iter()
        .filter(|c| c.coverage_level == CoverageLevel::Strong)
        .map(|c| c.competency.clone())
        .collect();

    debug!(
        "Coverage across {} competencies from {} evidence files",
        coverage.len(),
        evidence.len()
    );

    CoverageReport {
        coverage_by_competency: coverage,
        overall_coverage,
        under_documented,
        well_documented,
        total_evidence_files: evidence.len(),
    }
}

/// Round a score to 2 decimals for reporting
fn round2(score: f32) -> f32 {
    (score * 100.0).round() / 100.0
}
