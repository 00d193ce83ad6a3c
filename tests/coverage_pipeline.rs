//! End-to-end pipeline tests: vault on disk through ladder parsing,
//! coverage analysis, staleness, and the evidence timeline.

use chrono::NaiveDate;
use ergon::analysis::{
    calculate_growth_velocity, find_stale_competencies, group_evidence_by_period,
    PeriodGranularity, VelocityTrend,
};
use ergon::{
    analyze_coverage, parse_ladder, scan_evidence, CoverageLevel, ScanFilter, VaultConfig,
};
use std::fs;
use std::path::Path;

const EVIDENCE_SUBDIR: &str = "05-Areas/Career/Evidence";
const LADDER_SUBPATH: &str = "05-Areas/Career/Career_Ladder.md";

const LADDER: &str = "\
# Career Ladder

**Company:** Acme Corp
**Current Level:** Senior Engineer
**Target Level:** Staff Engineer
**Last Updated:** 2026-01-05

## Target Level: Staff Engineer

### Technical Excellence
- Designs systems spanning multiple teams
- Drives reliability improvements across the platform

### Mentorship
- Grows engineers through sustained coaching

### Business Impact
- Connects engineering work to revenue outcomes
";

fn write_evidence(root: &Path, relative: &str, date: &str, title: &str, body: &str) {
    let path = root
        .join(EVIDENCE_SUBDIR)
        .join(relative)
        .join(format!("{date} - {title}.md"));
    fs::create_dir_all(path.parent().unwrap()).expect("Failed to create evidence dirs");
    fs::write(&path, format!("# {title}\n\n{body}")).expect("Failed to write evidence file");
}

fn seed_vault(root: &Path) {
    let ladder_path = root.join(LADDER_SUBPATH);
    fs::create_dir_all(ladder_path.parent().unwrap()).unwrap();
    fs::write(&ladder_path, LADDER).unwrap();

    // Five explicit alignments with Technical Excellence make it strong
    for (date, title) in [
        ("2026-01-15", "Sharded The Primary Database"),
        ("2026-02-10", "Rolled Out Circuit Breakers"),
        ("2026-03-05", "Cross-Team Cache Design"),
        ("2026-04-12", "Latency SLO Program"),
        ("2026-04-25", "Multi-Region Failover"),
    ] {
        write_evidence(
            root,
            "Achievements",
            date,
            title,
            "\
## Skills Demonstrated

- Distributed Systems

## Ladder Alignment

**Maps to:** Technical Excellence
",
        );
    }

    // One skill-substring match with Mentorship, dated long ago
    write_evidence(
        root,
        "Skills_Development",
        "2025-09-01",
        "Onboarding Buddy Program",
        "\
## Skills Demonstrated

- Mentorship
",
    );
}

fn seeded_config() -> (tempfile::TempDir, VaultConfig) {
    let dir = tempfile::tempdir().unwrap();
    seed_vault(dir.path());
    let config = VaultConfig::new(dir.path());
    (dir, config)
}

#[test]
fn test_coverage_levels_across_the_ladder() {
    let (_dir, config) = seeded_config();

    let evidence = scan_evidence(&config, &ScanFilter::default());
    let ladder = parse_ladder(&config);
    assert!(ladder.error.is_none());
    assert_eq!(ladder.target_level, "Staff Engineer");
    assert_eq!(ladder.competencies.len(), 3);

    let report = analyze_coverage(&evidence, &ladder.competencies, 0.5);
    assert_eq!(report.total_evidence_files, 6);

    let by_name = |name: &str| {
        report
            .coverage_by_competency
            .iter()
            .find(|c| c.competency == name)
            .unwrap_or_else(|| panic!("missing competency {name}"))
    };

    let technical = by_name("Technical Excellence");
    assert_eq!(technical.evidence_count, 5);
    assert_eq!(technical.coverage_level, CoverageLevel::Strong);
    assert_eq!(technical.example_files.len(), 3);
    // Tied at 1.0, examples fall back to most recent first
    assert_eq!(technical.example_files[0], "Multi-Region Failover");
    assert_eq!(technical.all_evidence[0].match_score, 1.0);

    let mentorship = by_name("Mentorship");
    assert_eq!(mentorship.evidence_count, 1);
    assert_eq!(mentorship.coverage_level, CoverageLevel::Weak);
    assert_eq!(mentorship.all_evidence[0].match_score, 0.8);

    let business = by_name("Business Impact");
    assert_eq!(business.evidence_count, 0);
    assert_eq!(business.coverage_level, CoverageLevel::None);

    assert_eq!(report.well_documented, vec!["Technical Excellence"]);
    assert_eq!(report.under_documented, vec!["Mentorship", "Business Impact"]);
    assert_eq!(report.overall_coverage[&CoverageLevel::Strong], 1);
    assert_eq!(report.overall_coverage[&CoverageLevel::Weak], 1);
    assert_eq!(report.overall_coverage[&CoverageLevel::None], 1);
}

#[test]
fn test_staleness_flags_old_and_missing_competencies() {
    let (_dir, config) = seeded_config();

    let evidence = scan_evidence(&config, &ScanFilter::default());
    let ladder = parse_ladder(&config);
    let as_of = NaiveDate::from_ymd_opt(2026, 5, 1).unwrap();

    let stale = find_stale_competencies(&evidence, &ladder.competencies, 90, as_of);
    let names: Vec<&str> = stale.iter().map(|s| s.competency.as_str()).collect();

    // Technical Excellence has evidence 6 days before as_of and is fresh
    assert!(!names.contains(&"Technical Excellence"));

    let mentorship = stale
        .iter()
        .find(|s| s.competency == "Mentorship")
        .expect("Mentorship should be stale");
    assert_eq!(mentorship.last_evidence_date.as_deref(), Some("2025-09-01"));
    // 2025-09-01 to 2026-05-01 is 242 days
    assert_eq!(mentorship.days_since, Some(242));
    assert_eq!(mentorship.note, "No recent evidence in 242 days");

    let business = stale
        .iter()
        .find(|s| s.competency == "Business Impact")
        .expect("Business Impact should be stale");
    assert_eq!(business.last_evidence_date, None);
    assert_eq!(business.days_since, None);
    assert_eq!(business.note, "No evidence found");
}

#[test]
fn test_timeline_grouping_and_velocity() {
    let (_dir, config) = seeded_config();

    let evidence = scan_evidence(&config, &ScanFilter::default());
    let periods = group_evidence_by_period(&evidence, PeriodGranularity::Month);

    let labels: Vec<&str> = periods.iter().map(|p| p.period.as_str()).collect();
    assert_eq!(
        labels,
        vec!["2025-09", "2026-01", "2026-02", "2026-03", "2026-04"]
    );
    assert_eq!(periods.last().unwrap().count, 2);
    assert_eq!(periods[0].categories.get("Skills_Development"), Some(&1));

    // Counts [1, 1, 1, 1, 2]: first half [1, 1] vs second half [1, 1, 2]
    let velocity = calculate_growth_velocity(&periods);
    assert_eq!(velocity.average, 1.2);
    assert_eq!(velocity.trend, VelocityTrend::Accelerating);
}

#[test]
fn test_quarter_grouping() {
    let (_dir, config) = seeded_config();

    let evidence = scan_evidence(&config, &ScanFilter::default());
    let periods = group_evidence_by_period(&evidence, PeriodGranularity::Quarter);

    let labels: Vec<&str> = periods.iter().map(|p| p.period.as_str()).collect();
    assert_eq!(labels, vec!["2025-Q3", "2026-Q1", "2026-Q2"]);
    assert_eq!(periods[1].count, 3);
    assert_eq!(periods[2].count, 2);
}
