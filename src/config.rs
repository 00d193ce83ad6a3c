//! Vault configuration for the Ergon engine
//!
//! The vault root is an explicit configuration value threaded into every
//! scanner and ladder-parser call; the engine carries no ambient global
//! path state. Only the CLI consults flags and environment variables.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Conventional vault layout, relative to the vault root
const EVIDENCE_SUBDIR: &str = "05-Areas/Career/Evidence";
const LADDER_SUBPATH: &str = "05-Areas/Career/Career_Ladder.md";

/// Paths into a career-evidence vault
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VaultConfig {
    /// Vault root; evidence filepaths are reported relative to this
    pub vault_root: PathBuf,

    /// Directory scanned for evidence documents
    pub evidence_dir: PathBuf,

    /// Career ladder document
    pub ladder_path: PathBuf,
}

impl VaultConfig {
    /// Build a config from a vault root using the conventional layout
    pub fn new(vault_root: impl Into<PathBuf>) -> Self {
        let vault_root = vault_root.into();
        let evidence_dir = vault_root.join(EVIDENCE_SUBDIR);
        let ladder_path = vault_root.join(LADDER_SUBPATH);
        Self {
            vault_root,
            evidence_dir,
            ladder_path,
        }
    }

    /// Override the evidence directory
    pub fn with_evidence_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.evidence_dir = dir.into();
        self
    }

    /// Override the ladder document path
    pub fn with_ladder_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.ladder_path = path.into();
        self
    }

    /// Resolve the vault root from a CLI flag, the `ERGON_VAULT` environment
    /// variable, or the current directory, in that order
    pub fn resolve(cli_root: Option<PathBuf>) -> Self {
        let root = cli_root
            .or_else(|| std::env::var("ERGON_VAULT").ok().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from("."));
        Self::new(root)
    }

    /// Report a path relative to the vault root where possible
    pub fn relative_path(&self, path: &Path) -> String {
        path.strip_prefix(&self.vault_root)
            .unwrap_or(path)
            .display()
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conventional_layout() {
        let config = VaultConfig::new("/vault");
        assert_eq!(
            config.evidence_dir,
            PathBuf::from("/vault/05-Areas/Career/Evidence")
        );
        assert_eq!(
            config.ladder_path,
            PathBuf::from("/vault/05-Areas/Career/Career_Ladder.md")
        );
    }

    #[test]
    fn test_overrides() {
        let config = VaultConfig::new("/vault")
            .with_evidence_dir("/elsewhere/evidence")
            .with_ladder_path("/elsewhere/ladder.md");
        assert_eq!(config.evidence_dir, PathBuf::from("/elsewhere/evidence"));
        assert_eq!(config.ladder_path, PathBuf::from("/elsewhere/ladder.md"));
    }

    #[test]
    fn test_relative_path() {
        let config = VaultConfig::new("/vault");
        let inside = Path::new("/vault/05-Areas/Career/Evidence/a.md");
        assert_eq!(config.relative_path(inside), "05-Areas/Career/Evidence/a.md");

        let outside = Path::new("/tmp/other.md");
        assert_eq!(config.relative_path(outside), "/tmp/other.md");
    }

    #[test]
    fn test_resolve_prefers_cli_flag() {
        let config = VaultConfig::resolve(Some(PathBuf::from("/explicit")));
        assert_eq!(config.vault_root, PathBuf::from("/explicit"));
    }
}
