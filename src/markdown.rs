//! Markdown field extraction for semi-structured evidence documents
//!
//! Evidence and ladder documents use a loose convention: `#`-style headings,
//! `**Label:** value` bold-field lines, two-column `| **Label** | value |`
//! table rows, and `- ` bullet lists. None of it is guaranteed to be present,
//! so every extractor here returns an empty or absent value on no-match and
//! never errors. Downstream parsers build partial records from whatever is
//! found.

use once_cell::sync::Lazy;
use regex::Regex;

/// Sentinel returned when a document has no `#` title heading
pub const UNTITLED: &str = "Untitled";

/// Headings at the competency level that are never competencies
const HEADING_DENYLIST: &[&str] = &["Notes", "References", "Appendix"];

/// Leading checkbox marker on a bullet item, e.g. `[ ] ` or `[x] `
static CHECKBOX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\[[ x]\]\s*").expect("invalid checkbox pattern")
});

/// Markdown link syntax, collapsed to its text
static MD_LINK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[([^\]]+)\]\([^)]+\)").expect("invalid link pattern")
});

/// Extract the document title: content of the first `# ` heading line
///
/// Returns [`UNTITLED`] when no level-1 heading exists.
pub fn extract_title(text: &str) -> String {
    for line in text.lines() {
        if let Some(rest) = line.strip_prefix("# ") {
            return rest.trim().to_string();
        }
    }
    UNTITLED.to_string()
}

/// Extract a labeled field value
///
/// Tries the inline form `**Label:** value` first (value runs to end of
/// line), then the table form `| **Label** | value |`. Label comparison is
/// case-insensitive. Returns an empty string when neither form matches.
pub fn extract_field(text: &str, label: &str) -> String {
    let inline = format!(r"(?i)\*\*{}:\*\*\s*([^\n]+)", regex::escape(label));
    if let Ok(re) = Regex::new(&inline) {
        if let Some(caps) = re.captures(text) {
            return caps[1].trim().to_string();
        }
    }

    let table = format!(r"(?i)\|\s*\*\*{}\*\*\s*\|\s*([^|\n]+?)\s*\|", regex::escape(label));
    if let Ok(re) = Regex::new(&table) {
        if let Some(caps) = re.captures(text) {
            return caps[1].trim().to_string();
        }
    }

    String::new()
}

/// Heading level of a line: the count of leading `#` characters
///
/// Returns `None` for non-heading lines and for bare runs of `#` with
/// nothing after them.
fn heading_level(line: &str) -> Option<usize> {
    let hashes = line.chars().take_while(|c| *c == '#').count();
    let has_body = line.chars().nth(hashes).is_some();
    (hashes > 0 && has_body).then_some(hashes)
}

/// Extract the body of a section
///
/// The heading's level is the count of its leading `#` characters (2 when
/// the heading text carries none). Captures every line after the heading
/// line until a heading of equal-or-lower numeric level, or document end.
/// The heading match is case-insensitive and prefix-based.
pub fn extract_section(text: &str, heading: &str) -> String {
    let level = match heading.chars().take_while(|c| *c == '#').count() {
        0 => 2,
        n => n,
    };
    let needle = heading.to_lowercase();

    let mut in_section = false;
    let mut captured: Vec<&str> = Vec::new();
    for line in text.lines() {
        if !in_section {
            if line.to_lowercase().starts_with(&needle) {
                in_section = true;
            }
            continue;
        }
        if heading_level(line).is_some_and(|l| l <= level) {
            break;
        }
        captured.push(line);
    }

    captured.join("\n").trim().to_string()
}

/// Body of a level-2 section located by exact (case-insensitive) name
///
/// Ends at the next `##` heading, a `---` rule, or document end.
fn level2_section_body(text: &str, section_name: &str) -> Option<String> {
    let wanted = section_name.to_lowercase();

    let mut in_section = false;
    let mut captured: Vec<&str> = Vec::new();
    for line in text.lines() {
        if !in_section {
            if let Some(rest) = line.strip_prefix("##") {
                // Exactly level 2: the marker must be followed by whitespace
                if rest.starts_with(char::is_whitespace)
                    && rest.trim().to_lowercase() == wanted
                {
                    in_section = true;
                }
            }
            continue;
        }
        if line.starts_with("##") || line.starts_with("---") {
            break;
        }
        captured.push(line);
    }

    in_section.then(|| captured.join("\n"))
}

/// Clean one bullet line into an item, or reject it
///
/// Strips a leading checkbox marker, collapses markdown links to their text,
/// and drops items that still begin with `[` (unresolved placeholders).
fn clean_bullet_item(line: &str) -> Option<String> {
    let item = line.trim().strip_prefix("- ")?.trim();
    let item = CHECKBOX.replace(item, "");
    let item = MD_LINK.replace_all(&item, "$1").trim().to_string();
    if item.is_empty() || item.starts_with('[') {
        return None;
    }
    Some(item)
}

/// Extract the cleaned bullet list from a level-2 section
pub fn extract_section_list(text: &str, section_name: &str) -> Vec<String> {
    let Some(body) = level2_section_body(text, section_name) else {
        return Vec::new();
    };
    body.lines().filter_map(clean_bullet_item).collect()
}

/// Extract a single value from a level-2 section
///
/// With `field` set, looks up the nested `**Field:** value` line inside the
/// section. Otherwise returns the section's first non-empty line that is
/// neither a bold-label line nor a placeholder.
pub fn extract_section_value(text: &str, section_name: &str, field: Option<&str>) -> String {
    let Some(body) = level2_section_body(text, section_name) else {
        return String::new();
    };

    if let Some(field) = field {
        let value = extract_field(&body, field);
        if !value.is_empty() {
            return value;
        }
        return String::new();
    }

    for line in body.lines() {
        let line = line.trim();
        if !line.is_empty() && !line.starts_with("**") && !line.starts_with('[') {
            return line.to_string();
        }
    }

    String::new()
}

/// Find all heading texts at exactly the given level
///
/// A fixed denylist (Notes, References, Appendix) is excluded; those appear
/// alongside competencies in ladder documents but are never competencies.
pub fn find_competency_headings(text: &str, level: usize) -> Vec<String> {
    let mut headings = Vec::new();
    for line in text.lines() {
        let hashes = line.chars().take_while(|c| *c == '#').count();
        if hashes != level {
            continue;
        }
        let rest = &line[hashes..];
        if !rest.starts_with(char::is_whitespace) {
            continue;
        }
        let heading = rest.trim();
        if !heading.is_empty() && !HEADING_DENYLIST.contains(&heading) {
            headings.push(heading.to_string());
        }
    }
    headings
}

/// Extract the cleaned bullet list under a level-3 heading
///
/// Captures until the next `###` or `##` heading (or document end).
pub fn extract_bullet_list_under_heading(text: &str, heading: &str) -> Vec<String> {
    let wanted = heading.to_lowercase();

    let mut in_section = false;
    let mut items = Vec::new();
    for line in text.lines() {
        if !in_section {
            if let Some(rest) = line.strip_prefix("###") {
                if rest.starts_with(char::is_whitespace)
                    && rest.trim().to_lowercase() == wanted
                {
                    in_section = true;
                }
            }
            continue;
        }
        if line.starts_with("##") {
            break;
        }
        if let Some(item) = clean_bullet_item(line) {
            items.push(item);
        }
    }
    items
}
