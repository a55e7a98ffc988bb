//! User account management.
//!
//! The decision logic behind the user menu: validation, the deletion
//! confirmation gate, and outcome reporting. All mutation goes through the
//! [`AccountAdmin`] port; a failed delegation is an outcome, not an error,
//! so control always returns to the menu.

use crate::admin::{AccountAdmin, AdminError};

/// The reserved superuser account can never be deleted from here.
pub const PROTECTED_USER: &str = "root";

#[derive(Debug)]
pub enum CreateOutcome {
    /// No username given; nothing was delegated.
    EmptyName,
    /// An account with that name already exists; nothing was delegated.
    AlreadyExists,
    /// Account created and password set.
    Created,
    /// The creation itself failed.
    CreateFailed(AdminError),
    /// Account created, but the interactive password step failed. The
    /// account is left in place.
    PasswordFailed(AdminError),
}

/// Create `username` with a home directory and the default shell, then set
/// its password interactively.
pub fn create_user(admin: &dyn AccountAdmin, username: &str) -> Result<CreateOutcome, AdminError> {
    let username = username.trim();
    if username.is_empty() {
        return Ok(CreateOutcome::EmptyName);
    }
    if admin.user_exists(username)? {
        return Ok(CreateOutcome::AlreadyExists);
    }
    if let Err(e) = admin.create_user(username) {
        return Ok(CreateOutcome::CreateFailed(e));
    }
    if let Err(e) = admin.set_password(username) {
        return Ok(CreateOutcome::PasswordFailed(e));
    }
    Ok(CreateOutcome::Created)
}

#[derive(Debug)]
pub enum DeleteOutcome {
    EmptyName,
    /// The reserved superuser account.
    Protected,
    /// The account the invoking operator is logged in as.
    InvokerAccount,
    NotFound,
    /// Confirmation declined; nothing was delegated.
    Cancelled,
    Deleted,
    Failed(AdminError),
}

/// Only an explicit `y`/`Y` proceeds; anything else cancels.
pub fn confirmation_accepted(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("y")
}

/// Delete `username` together with its home directory.
///
/// Validation runs before the confirmation prompt is ever shown: the empty
/// name, the protected account, the invoking operator's own account
/// (`invoker` is the login identity, not the effective one) and nonexistent
/// accounts are all refused without consulting `confirm`.
pub fn delete_user(
    admin: &dyn AccountAdmin,
    username: &str,
    invoker: Option<&str>,
    confirm: impl FnOnce() -> String,
) -> Result<DeleteOutcome, AdminError> {
    let username = username.trim();
    if username.is_empty() {
        return Ok(DeleteOutcome::EmptyName);
    }
    if username == PROTECTED_USER {
        return Ok(DeleteOutcome::Protected);
    }
    if invoker == Some(username) {
        return Ok(DeleteOutcome::InvokerAccount);
    }
    if !admin.user_exists(username)? {
        return Ok(DeleteOutcome::NotFound);
    }
    if !confirmation_accepted(&confirm()) {
        return Ok(DeleteOutcome::Cancelled);
    }
    match admin.delete_user(username) {
        Ok(()) => Ok(DeleteOutcome::Deleted),
        Err(e) => Ok(DeleteOutcome::Failed(e)),
    }
}

#[derive(Debug)]
pub enum ShellChangeOutcome {
    EmptyShell,
    Changed,
    Failed(AdminError),
}

/// Point `username` at a new login shell.
pub fn change_shell(
    admin: &dyn AccountAdmin,
    username: &str,
    shell: &str,
) -> Result<ShellChangeOutcome, AdminError> {
    let shell = shell.trim();
    if shell.is_empty() {
        return Ok(ShellChangeOutcome::EmptyShell);
    }
    match admin.change_shell(username, shell) {
        Ok(()) => Ok(ShellChangeOutcome::Changed),
        Err(e) => Ok(ShellChangeOutcome::Failed(e)),
    }
}
