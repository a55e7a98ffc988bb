//! Shell-out implementations of the delegation ports.
//!
//! Modeled as a thin wrapper over the standard account utilities: capture
//! the output, interpret the exit status, optionally log the command.
//! Interactive delegations (`passwd`, `tar`'s verbose listing) inherit the
//! terminal instead of capturing.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use anyhow::Result;

use crate::admin::logging::CommandLogger;
use crate::admin::{AccountAdmin, AdminError, Archiver};
use crate::ui;

/// Shell given to newly created accounts.
pub const DEFAULT_SHELL: &str = "/bin/bash";

/// UID boundary between system and standard accounts.
const STANDARD_UID_MIN: u32 = 1000;

pub struct SystemAdmin {
    logger: CommandLogger,
}

impl SystemAdmin {
    pub fn new() -> Result<Self> {
        Ok(Self {
            logger: CommandLogger::new()?,
        })
    }

    /// Run a command, capturing its output.
    fn run(&self, program: &str, args: &[&str]) -> Result<Output, AdminError> {
        ui::debug(&format!("running {} {}", program, args.join(" ")));

        let output = Command::new(program)
            .args(args)
            .output()
            .map_err(|source| AdminError::Spawn {
                command: program.to_string(),
                source,
            })?;

        if let Err(e) = self.logger.log_command(program, args, &output) {
            eprintln!("Warning: failed to log command: {e}");
        }

        Ok(output)
    }

    /// Run a command and turn a non-zero exit status into an error.
    fn run_checked(&self, program: &str, args: &[&str]) -> Result<(), AdminError> {
        let output = self.run(program, args)?;
        if output.status.success() {
            return Ok(());
        }
        match output.status.code() {
            Some(code) => Err(AdminError::from_exit_code(
                program,
                code,
                &String::from_utf8_lossy(&output.stderr),
            )),
            None => Err(AdminError::Killed {
                command: program.to_string(),
            }),
        }
    }

    /// Run a command on the inherited terminal. Used for delegations that
    /// talk to the operator directly.
    fn run_interactive(&self, program: &str, args: &[&str]) -> Result<(), AdminError> {
        ui::debug(&format!("running {} {}", program, args.join(" ")));

        let status = Command::new(program)
            .args(args)
            .status()
            .map_err(|source| AdminError::Spawn {
                command: program.to_string(),
                source,
            })?;

        if status.success() {
            return Ok(());
        }
        match status.code() {
            Some(code) => Err(AdminError::from_exit_code(program, code, "")),
            None => Err(AdminError::Killed {
                command: program.to_string(),
            }),
        }
    }
}

impl AccountAdmin for SystemAdmin {
    fn user_exists(&self, username: &str) -> Result<bool, AdminError> {
        let output = self.run("getent", &["passwd", username])?;
        Ok(output.status.success())
    }

    fn group_exists(&self, group: &str) -> Result<bool, AdminError> {
        let output = self.run("getent", &["group", group])?;
        Ok(output.status.success())
    }

    fn list_standard_users(&self) -> Result<Vec<String>, AdminError> {
        let output = self.run("getent", &["passwd"])?;
        Ok(standard_users(&String::from_utf8_lossy(&output.stdout)))
    }

    fn create_user(&self, username: &str) -> Result<(), AdminError> {
        self.run_checked(
            "useradd",
            &["--create-home", "--shell", DEFAULT_SHELL, username],
        )
    }

    fn set_password(&self, username: &str) -> Result<(), AdminError> {
        self.run_interactive("passwd", &[username])
    }

    fn change_shell(&self, username: &str, shell: &str) -> Result<(), AdminError> {
        self.run_checked("usermod", &["--shell", shell, username])
    }

    fn lock_user(&self, username: &str) -> Result<(), AdminError> {
        // Locking is idempotent; the exit status is not consulted.
        self.run("usermod", &["--lock", username]).map(|_| ())
    }

    fn unlock_user(&self, username: &str) -> Result<(), AdminError> {
        self.run("usermod", &["--unlock", username]).map(|_| ())
    }

    fn delete_user(&self, username: &str) -> Result<(), AdminError> {
        self.run_checked("userdel", &["--remove", username])
    }

    fn create_group(&self, group: &str) -> Result<(), AdminError> {
        self.run_checked("groupadd", &[group])
    }

    fn delete_group(&self, group: &str) -> Result<(), AdminError> {
        self.run_checked("groupdel", &[group])
    }

    fn add_user_to_group(&self, username: &str, group: &str) -> Result<(), AdminError> {
        self.run_checked("usermod", &["--append", "--groups", group, username])
    }
}

impl Archiver for SystemAdmin {
    fn create_archive(&self, destination: &Path, sources: &[PathBuf]) -> Result<(), AdminError> {
        let dest = destination.to_string_lossy();
        let mut args: Vec<&str> = vec!["-czvf", &*dest];
        let source_args: Vec<String> = sources
            .iter()
            .map(|s| s.to_string_lossy().into_owned())
            .collect();
        args.extend(source_args.iter().map(String::as_str));

        // The verbose listing streams to the terminal while tar runs.
        self.run_interactive("tar", &args)
    }

    fn archive_size(&self, path: &Path) -> Result<String, AdminError> {
        let path_arg = path.to_string_lossy();
        let output = self.run("du", &["-h", &*path_arg])?;
        if !output.status.success() {
            let code = output.status.code().unwrap_or(1);
            return Err(AdminError::from_exit_code(
                "du",
                code,
                &String::from_utf8_lossy(&output.stderr),
            ));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(stdout
            .split_whitespace()
            .next()
            .unwrap_or("unknown")
            .to_string())
    }
}

/// Filter a `getent passwd` dump down to standard account names, keeping
/// database order. Entries are `name:x:uid:gid:...`.
fn standard_users(passwd: &str) -> Vec<String> {
    passwd
        .lines()
        .filter_map(|line| {
            let mut fields = line.split(':');
            let name = fields.next()?;
            let _password = fields.next()?;
            let uid: u32 = fields.next()?.parse().ok()?;
            (uid >= STANDARD_UID_MIN).then(|| name.to_string())
        })
        .collect()
}
