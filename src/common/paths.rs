use anyhow::{Context, Result};
use std::path::PathBuf;

/// Centralized path management for adm
/// This module provides a single source of truth for all application paths

/// Get the main adm data directory
pub fn adm_data_dir() -> Result<PathBuf> {
    let data_dir = dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("/root/.local/share"))
        .join("adm");

    std::fs::create_dir_all(&data_dir)
        .with_context(|| format!("creating data directory at {}", data_dir.display()))?;

    Ok(data_dir)
}

/// Get the directory holding the delegated-command logs
pub fn command_log_dir() -> Result<PathBuf> {
    Ok(adm_data_dir()?.join("command_logs"))
}
