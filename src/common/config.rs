//! Tool configuration
//!
//! Backup behavior is configurable through a small TOML file. A missing
//! file means defaults; a malformed file is a startup error.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// System-wide configuration file location.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/adm/config.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub backup: BackupConfig,
}

/// Where archives go and what goes into them.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BackupConfig {
    pub destination: PathBuf,
    pub sources: Vec<PathBuf>,
}

impl Default for BackupConfig {
    fn default() -> Self {
        Self {
            destination: PathBuf::from("/var/backups/system"),
            sources: vec![PathBuf::from("/etc"), PathBuf::from("/home")],
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new(SYSTEM_CONFIG_PATH))
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)
            .with_context(|| format!("reading config at {}", path.display()))?;
        toml::from_str(&contents).with_context(|| format!("parsing config at {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let config = Config::load_from(Path::new("/nonexistent/adm/config.toml")).unwrap();
        assert_eq!(config.backup.destination, PathBuf::from("/var/backups/system"));
        assert_eq!(
            config.backup.sources,
            vec![PathBuf::from("/etc"), PathBuf::from("/home")]
        );
    }

    #[test]
    fn partial_file_keeps_defaults_for_unset_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[backup]\ndestination = \"/srv/backups\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.backup.destination, PathBuf::from("/srv/backups"));
        assert_eq!(
            config.backup.sources,
            vec![PathBuf::from("/etc"), PathBuf::from("/home")]
        );
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "backup = nonsense {").unwrap();

        assert!(Config::load_from(&path).is_err());
    }
}
