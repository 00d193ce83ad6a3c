//! Evidence repository scanner
//!
//! Walks the evidence directory, parses every markdown document into an
//! [`EvidenceRecord`], and applies optional category and date-range filters.
//! There is no persistent index: every scan re-reads and re-parses the
//! source documents.
//!
//! A read failure on one file degrades that file to a partial record with an
//! error note; it never aborts the scan. Parse-format mismatches silently
//! yield empty fields.

use crate::config::VaultConfig;
use crate::dates::{extract_date_from_filename, DateBounds};
use crate::markdown::{
    extract_field, extract_section_list, extract_section_value, extract_title, UNTITLED,
};
use crate::types::{EvidenceCategory, EvidenceRecord, FeedbackDetail};
use chrono::{DateTime, Utc};
use std::path::Path;
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Optional constraints applied during a scan
#[derive(Debug, Clone, Default)]
pub struct ScanFilter {
    /// Exact-match category label; records with a different (or absent)
    /// category are excluded
    pub category: Option<String>,

    /// Date bounds; excludes only records whose date is present, parseable,
    /// and outside the bounds. Absent or unparseable dates always pass.
    pub date_range: DateBounds,
}

impl ScanFilter {
    fn admits(&self, record: &EvidenceRecord) -> bool {
        if let Some(wanted) = &self.category {
            let label = record.category.as_ref().map(EvidenceCategory::label);
            if label != Some(wanted.as_str()) {
                return false;
            }
        }

        if let Some(date) = record.parsed_date() {
            if let Some(start) = self.date_range.0 {
                if date < start {
                    return false;
                }
            }
            if let Some(end) = self.date_range.1 {
                if date > end {
                    return false;
                }
            }
        }

        true
    }
}

/// Scan the vault's evidence directory into an ordered record list
///
/// Records are sorted by date string descending; records without a date sort
/// as the empty string and therefore land last. A missing evidence directory
/// yields an empty list.
pub fn scan_evidence(config: &VaultConfig, filter: &ScanFilter) -> Vec<EvidenceRecord> {
    if !config.evidence_dir.exists() {
        debug!(
            "Evidence directory does not exist: {}",
            config.evidence_dir.display()
        );
        return Vec::new();
    }

    let mut records = Vec::new();
    for entry in WalkDir::new(&config.evidence_dir) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable directory entry: {}", e);
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("md") {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        if name.eq_ignore_ascii_case("readme.md") {
            continue;
        }

        let record = parse_evidence_file(path, config);
        if filter.admits(&record) {
            records.push(record);
        }
    }

    debug!("Scanned {} evidence records", records.len());

    records.sort_by(|a, b| {
        b.date
            .as_deref()
            .unwrap_or("")
            .cmp(a.date.as_deref().unwrap_or(""))
    });
    records
}

/// Parse one evidence document
///
/// Handles both template-conforming files and free-form content; missing
/// sections and fields yield empty values. Only an unreadable file produces
/// a degraded record with an error note.
pub fn parse_evidence_file(path: &Path, config: &VaultConfig) -> EvidenceRecord {
    let filepath = config.relative_path(path);
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();

    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            warn!("Failed to read evidence file {}: {}", path.display(), e);
            return EvidenceRecord::degraded(filepath, stem, format!("Failed to read file: {e}"));
        }
    };

    let name = path
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    let date = extract_date_from_filename(&name);

    let mut title = extract_title(&content);
    if title == UNTITLED {
        // Fall back to the filename stem, after the date prefix if present
        title = match stem.split_once(" - ") {
            Some((_, rest)) => rest.to_string(),
            None => stem.clone(),
        };
    }

    let folder_category = category_from_path(path);
    let category = folder_category.clone().or_else(|| {
        let label = extract_field(&content, "Category");
        (!label.is_empty()).then(|| EvidenceCategory::from_label(&label))
    });

    // Feedback files carry their category-specific payload
    let feedback = (folder_category == Some(EvidenceCategory::FeedbackReceived)).then(|| {
        FeedbackDetail {
            positive: extract_section_list(&content, "Positive Feedback"),
            constructive: extract_section_list(&content, "Constructive Feedback"),
        }
    });

    let last_modified = std::fs::metadata(path)
        .and_then(|m| m.modified())
        .ok()
        .map(DateTime::<Utc>::from);

    EvidenceRecord {
        filepath,
        date,
        title,
        category,
        project: extract_section_value(&content, "Project", None),
        skills: extract_section_list(&content, "Skills Demonstrated"),
        impact: extract_section_list(&content, "Impact"),
        stakeholders: extract_section_list(&content, "Stakeholders"),
        ladder_alignment: extract_section_value(&content, "Ladder Alignment", Some("Maps to")),
        last_modified,
        feedback,
        error: None,
    }
}

/// Resolve the category from the file's folder position
fn category_from_path(path: &Path) -> Option<EvidenceCategory> {
    let path_str = path.to_string_lossy();
    if path_str.contains("Achievements") {
        Some(EvidenceCategory::Achievements)
    } else if path_str.contains("Feedback_Received") {
        Some(EvidenceCategory::FeedbackReceived)
    } else if path_str.contains("Skills_Development") {
        Some(EvidenceCategory::SkillsDevelopment)
    } else {
        None
    }
}
