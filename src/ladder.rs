//! Career ladder document parser
//!
//! A ladder document carries labeled metadata fields and one section per
//! level. Only the target-level section is mined for competencies: each
//! level-3 heading beneath it is a candidate, and the bullet list under the
//! heading becomes its requirements. Candidates with zero bullets are
//! dropped entirely.

use crate::config::VaultConfig;
use crate::markdown::{
    extract_bullet_list_under_heading, extract_field, extract_section, find_competency_headings,
};
use crate::types::{Competency, LadderDocument};
use std::path::Path;
use tracing::{debug, warn};

/// Parse the vault's configured ladder document
pub fn parse_ladder(config: &VaultConfig) -> LadderDocument {
    parse_ladder_file(&config.ladder_path)
}

/// Parse a career ladder document into its competency structure
///
/// A missing or unreadable file yields an empty-competency result carrying
/// an error note; it never raises.
pub fn parse_ladder_file(path: &Path) -> LadderDocument {
    let filepath = path.display().to_string();

    if !path.exists() {
        warn!("Ladder file not found: {}", filepath);
        return empty_ladder(filepath.clone(), format!("Ladder file not found: {filepath}"));
    }

    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            warn!("Failed to read ladder file {}: {}", filepath, e);
            return empty_ladder(filepath, format!("Failed to read ladder file: {e}"));
        }
    };

    let company = extract_field(&content, "Company");
    let current_level = extract_field(&content, "Current Level");
    let target_level = extract_field(&content, "Target Level");
    let last_updated = extract_field(&content, "Last Updated");

    // Only the target-level section is mined for competencies
    let target_heading = if target_level.is_empty() {
        "## Target Level".to_string()
    } else {
        format!("## Target Level: {target_level}")
    };
    let target_section = extract_section(&content, &target_heading);

    let mut competencies = Vec::new();
    for name in find_competency_headings(&target_section, 3) {
        let requirements = extract_bullet_list_under_heading(&target_section, &name);
        if requirements.is_empty() {
            // Zero-requirement candidates never appear in the result
            continue;
        }
        competencies.push(Competency {
            category: name,
            target_level_requirements: requirements,
        });
    }

    debug!(
        "Parsed ladder {}: {} competencies at target level '{}'",
        filepath,
        competencies.len(),
        target_level
    );

    LadderDocument {
        filepath,
        company,
        current_level,
        target_level,
        last_updated,
        competencies,
        error: None,
    }
}

fn empty_ladder(filepath: String, error: String) -> LadderDocument {
    LadderDocument {
        filepath,
        company: String::new(),
        current_level: String::new(),
        target_level: String::new(),
        last_updated: String::new(),
        competencies: Vec::new(),
        error: Some(error),
    }
}
