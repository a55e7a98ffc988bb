use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::{OpenOptions, create_dir_all};
use std::io::Write;
use std::path::PathBuf;

use crate::common::paths;
use crate::ui;

/// One delegated command, as appended to the debug log.
#[derive(Debug, Serialize)]
pub struct CommandLog {
    pub timestamp: DateTime<Utc>,
    pub command: String,
    pub args: Vec<String>,
    pub stdout: String,
    pub stderr: String,
    pub exit_code: Option<i32>,
    pub success: bool,
}

/// Appends every delegated command as a JSON line, one file per day.
/// Inactive unless debug mode is on.
#[derive(Debug, Clone)]
pub struct CommandLogger {
    log_dir: PathBuf,
}

impl CommandLogger {
    pub fn new() -> Result<Self> {
        let log_dir = paths::command_log_dir()?;

        // Only create the directory if debug is enabled
        if ui::is_debug_enabled() {
            create_dir_all(&log_dir).context("Failed to create command log directory")?;
        }

        Ok(Self { log_dir })
    }

    #[cfg(test)]
    pub fn with_dir(log_dir: PathBuf) -> Self {
        Self { log_dir }
    }

    pub fn log_command(
        &self,
        command: &str,
        args: &[&str],
        output: &std::process::Output,
    ) -> Result<()> {
        // Skip logging if debug is not enabled
        if !ui::is_debug_enabled() {
            return Ok(());
        }

        let entry = CommandLog {
            timestamp: Utc::now(),
            command: command.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            exit_code: output.status.code(),
            success: output.status.success(),
        };

        create_dir_all(&self.log_dir).context("Failed to create command log directory")?;

        let log_file = self.log_file_path();
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open command log file")?;

        let json_line = serde_json::to_string(&entry).context("Failed to serialize command log")?;

        writeln!(file, "{json_line}").context("Failed to write to command log file")?;

        Ok(())
    }

    fn log_file_path(&self) -> PathBuf {
        self.log_dir
            .join(format!("commands_{}.jsonl", Utc::now().format("%Y%m%d")))
    }
}
