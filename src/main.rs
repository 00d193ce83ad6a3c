//! Ergon - Career Evidence Analytics CLI
//!
//! Command-line front end over the vault analytics library. Every
//! subcommand prints a JSON report to stdout; logs go to stderr.

use clap::{Parser, Subcommand};
use ergon::{
    analysis::{
        calculate_growth_velocity, find_stale_competencies, group_evidence_by_period,
        PeriodGranularity, DEFAULT_STALE_DAYS,
    },
    analyze_coverage,
    dates::parse_date_range,
    error::{ErgonError, Result},
    parse_ladder,
    quality::{calculate_bullet_quality_score, suggest_improvements, validate_achievement_metrics},
    scan_evidence,
    types::{Achievement, EvidenceCategory},
    ScanFilter, VaultConfig,
};
use serde::Serialize;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ergon", version, about = "Career evidence vault analytics")]
struct Cli {
    /// Vault root directory (defaults to ERGON_VAULT, then the current directory)
    #[arg(long, global = true, env = "ERGON_VAULT")]
    vault: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List evidence records, optionally filtered
    Scan {
        /// Category label, e.g. "Achievements" or "Feedback_Received"
        #[arg(long)]
        category: Option<String>,

        /// Date expression: last-N-days, last-N-months, YYYY-QN, or YYYY
        #[arg(long)]
        date_range: Option<String>,
    },

    /// Competency coverage report against the career ladder
    Coverage {
        /// Minimum match score for evidence to count toward a competency
        #[arg(long, default_value_t = 0.5)]
        threshold: f32,

        /// Date expression restricting which evidence is considered
        #[arg(long)]
        date_range: Option<String>,
    },

    /// Evidence accumulation timeline and growth velocity
    Timeline {
        /// Grouping granularity: month, quarter, or year
        #[arg(long, default_value = "quarter")]
        group_by: String,
    },

    /// Competencies without recent evidence
    Stale {
        /// Staleness threshold in days
        #[arg(long, default_value_t = DEFAULT_STALE_DAYS)]
        days: i64,
    },

    /// Validate an achievement's quantifiable metrics
    Validate {
        /// Achievement description
        #[arg(long)]
        description: String,

        /// Impact statement
        #[arg(long, default_value = "")]
        impact: String,
    },

    /// Score a resume bullet across quality dimensions
    ScoreBullet {
        /// The bullet text
        bullet: String,
    },

    /// Suggest improvements for a resume bullet
    Suggest {
        /// The bullet text
        bullet: String,
    },
}

#[derive(Serialize)]
struct TimelineReport {
    periods: Vec<ergon::analysis::PeriodBucket>,
    velocity: ergon::analysis::VelocityReport,
}

#[derive(Serialize)]
struct SuggestReport {
    bullet: String,
    suggestions: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = VaultConfig::resolve(cli.vault.clone());
    debug!("Vault root: {}", config.vault_root.display());

    match cli.command {
        Commands::Scan {
            category,
            date_range,
        } => {
            let filter = build_filter(category, date_range)?;
            let records = scan_evidence(&config, &filter);
            print_json(&records)?;
        }
        Commands::Coverage {
            threshold,
            date_range,
        } => {
            if !(0.0..=1.0).contains(&threshold) {
                return Err(ErgonError::InvalidFilter(format!(
                    "threshold must be between 0.0 and 1.0, got {threshold}"
                ))
                .into());
            }
            let filter = build_filter(None, date_range)?;
            let records = scan_evidence(&config, &filter);
            let ladder = parse_ladder(&config);
            let report = analyze_coverage(&records, &ladder.competencies, threshold);
            print_json(&report)?;
        }
        Commands::Timeline { group_by } => {
            let granularity = match group_by.as_str() {
                "month" => PeriodGranularity::Month,
                "quarter" => PeriodGranularity::Quarter,
                "year" => PeriodGranularity::Year,
                other => {
                    return Err(ErgonError::InvalidFilter(format!(
                        "unknown grouping '{other}' (expected month, quarter, or year)"
                    ))
                    .into());
                }
            };
            let records = scan_evidence(&config, &ScanFilter::default());
            let periods = group_evidence_by_period(&records, granularity);
            let velocity = calculate_growth_velocity(&periods);
            print_json(&TimelineReport { periods, velocity })?;
        }
        Commands::Stale { days } => {
            let records = scan_evidence(&config, &ScanFilter::default());
            let ladder = parse_ladder(&config);
            let today = chrono::Utc::now().date_naive();
            let stale = find_stale_competencies(&records, &ladder.competencies, days, today);
            print_json(&stale)?;
        }
        Commands::Validate {
            description,
            impact,
        } => {
            let all_text = format!("{description} {impact}");
            let metrics = ergon::extract_metrics_from_text(&all_text);
            let achievement = Achievement {
                description,
                metrics,
                impact,
                skills: Vec::new(),
                timeline: None,
                validation_score: 0.0,
            };
            let outcome = validate_achievement_metrics(&achievement);
            print_json(&outcome)?;
        }
        Commands::ScoreBullet { bullet } => {
            let score = calculate_bullet_quality_score(&bullet);
            print_json(&score)?;
        }
        Commands::Suggest { bullet } => {
            let suggestions = suggest_improvements(&bullet);
            print_json(&SuggestReport {
                bullet,
                suggestions,
            })?;
        }
    }

    Ok(())
}

fn build_filter(category: Option<String>, date_range: Option<String>) -> Result<ScanFilter> {
    if let Some(label) = &category {
        if matches!(
            EvidenceCategory::from_label(label),
            EvidenceCategory::Other(_)
        ) {
            return Err(ErgonError::InvalidFilter(format!(
                "unknown category '{label}' (expected Achievements, Feedback_Received, or Skills_Development)"
            )));
        }
    }
    let date_range = match date_range {
        Some(expr) => parse_date_range(&expr),
        None => (None, None),
    };
    Ok(ScanFilter {
        category,
        date_range,
    })
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
