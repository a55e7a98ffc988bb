//! Timestamped archives of the critical system directories.
//!
//! Each run writes one `system_backup_<timestamp>.tar.gz` under the
//! configured destination. Archives are never modified or pruned here.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Local};

use crate::admin::{AdminError, Archiver};
use crate::common::config::BackupConfig;

pub const ARCHIVE_PREFIX: &str = "system_backup_";

/// Archive name for a given moment, at second resolution.
pub fn archive_file_name(now: DateTime<Local>) -> String {
    format!("{ARCHIVE_PREFIX}{}.tar.gz", now.format("%Y%m%d_%H%M%S"))
}

#[derive(Debug)]
pub enum BackupOutcome {
    Completed { path: PathBuf, size: String },
    /// A partially written file, if any, is left where it is.
    Failed { path: PathBuf, error: AdminError },
}

/// Archive the configured source directories into one new file.
///
/// Failing to create the destination directory aborts; a failed archive
/// delegation is reported as an outcome.
pub fn run_backup(archiver: &dyn Archiver, config: &BackupConfig) -> Result<BackupOutcome> {
    fs::create_dir_all(&config.destination).with_context(|| {
        format!(
            "creating backup destination {}",
            config.destination.display()
        )
    })?;

    let path = config.destination.join(archive_file_name(Local::now()));
    match archiver.create_archive(&path, &config.sources) {
        Ok(()) => {
            let size = archiver
                .archive_size(&path)
                .unwrap_or_else(|_| "unknown".to_string());
            Ok(BackupOutcome::Completed { path, size })
        }
        Err(error) => Ok(BackupOutcome::Failed { path, error }),
    }
}
