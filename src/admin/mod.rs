//! Delegation layer for OS account, group and archive operations.
//!
//! Every delegated operation sits behind the [`AccountAdmin`] and
//! [`Archiver`] traits so the menu logic can be exercised against fakes.
//! The production implementations in [`system`] shell out to the standard
//! utilities and interpret their exit codes.

pub mod logging;
pub mod system;

#[cfg(test)]
pub mod fake;

use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdminError {
    #[error("failed to launch {command}: {source}")]
    Spawn {
        command: String,
        source: std::io::Error,
    },

    #[error("{command} exited with status {code}: {detail}")]
    CommandFailed {
        command: String,
        code: i32,
        detail: String,
    },

    #[error("{command} terminated by a signal")]
    Killed { command: String },
}

impl AdminError {
    /// The delegated exit status, when there is one.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            AdminError::CommandFailed { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Map the well-known exit codes of the account utilities to a
    /// descriptive message, falling back to whatever stderr said.
    pub fn from_exit_code(command: &str, code: i32, stderr: &str) -> Self {
        let detail = match (command, code) {
            ("useradd", 1) => "cannot update the password file".to_string(),
            ("useradd", 4) => "UID already in use".to_string(),
            ("useradd", 6) => "specified group does not exist".to_string(),
            ("useradd", 9) => "username already in use".to_string(),
            ("useradd", 12) => "cannot create the home directory".to_string(),
            ("userdel", 8) => "user is currently logged in".to_string(),
            ("userdel", 12) => "cannot remove the home directory".to_string(),
            ("groupadd", 9) => "group name already in use".to_string(),
            ("groupdel", 8) => "cannot remove a user's primary group".to_string(),
            _ => {
                let trimmed = stderr.trim();
                if trimmed.is_empty() {
                    format!("exit status {code}")
                } else {
                    trimmed.to_string()
                }
            }
        };
        AdminError::CommandFailed {
            command: command.to_string(),
            code,
            detail,
        }
    }
}

/// Port for the OS account and group database.
///
/// Existence probes and the user listing are read-only; everything else
/// requests a mutation and reports the delegated outcome.
pub trait AccountAdmin {
    fn user_exists(&self, username: &str) -> Result<bool, AdminError>;
    fn group_exists(&self, group: &str) -> Result<bool, AdminError>;

    /// Names of the standard (non-system) accounts, in database order.
    fn list_standard_users(&self) -> Result<Vec<String>, AdminError>;

    fn create_user(&self, username: &str) -> Result<(), AdminError>;

    /// Interactive password prompt for `username`, driven by the delegated
    /// utility itself on the inherited terminal.
    fn set_password(&self, username: &str) -> Result<(), AdminError>;

    fn change_shell(&self, username: &str, shell: &str) -> Result<(), AdminError>;

    /// Disable logins for `username`. Idempotent; the reported result only
    /// distinguishes whether the delegated utility could be run at all.
    fn lock_user(&self, username: &str) -> Result<(), AdminError>;

    /// Re-enable logins for `username`. Idempotent, like [`lock_user`].
    ///
    /// [`lock_user`]: AccountAdmin::lock_user
    fn unlock_user(&self, username: &str) -> Result<(), AdminError>;

    /// Delete `username` together with its home directory.
    fn delete_user(&self, username: &str) -> Result<(), AdminError>;

    fn create_group(&self, group: &str) -> Result<(), AdminError>;
    fn delete_group(&self, group: &str) -> Result<(), AdminError>;

    /// Append `username` to the supplementary membership of `group`.
    fn add_user_to_group(&self, username: &str, group: &str) -> Result<(), AdminError>;
}

/// Port for archive creation and inspection.
pub trait Archiver {
    /// Create one compressed archive at `destination` containing every
    /// directory in `sources`.
    fn create_archive(&self, destination: &Path, sources: &[PathBuf]) -> Result<(), AdminError>;

    /// Human-readable size of the archive at `path`.
    fn archive_size(&self, path: &Path) -> Result<String, AdminError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_exit_codes_get_descriptive_messages() {
        let err = AdminError::from_exit_code("useradd", 9, "");
        assert_eq!(
            err.to_string(),
            "useradd exited with status 9: username already in use"
        );
        assert_eq!(err.exit_code(), Some(9));

        let err = AdminError::from_exit_code("groupdel", 8, "");
        assert_eq!(
            err.to_string(),
            "groupdel exited with status 8: cannot remove a user's primary group"
        );
    }

    #[test]
    fn unknown_codes_fall_back_to_stderr() {
        let err = AdminError::from_exit_code("tar", 2, "tar: /etc: Cannot open\n");
        assert_eq!(
            err.to_string(),
            "tar exited with status 2: tar: /etc: Cannot open"
        );
    }

    #[test]
    fn unknown_codes_without_stderr_report_the_status() {
        let err = AdminError::from_exit_code("tar", 2, "  ");
        assert_eq!(err.to_string(), "tar exited with status 2: exit status 2");
    }

    #[test]
    fn spawn_errors_have_no_exit_code() {
        let err = AdminError::Spawn {
            command: "useradd".to_string(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert_eq!(err.exit_code(), None);
    }
}
