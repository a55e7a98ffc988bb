//! Interactive menu dispatch.
//!
//! A small state machine: each state renders a numbered menu, reads one
//! line and maps (state, choice) to an action plus the next state.
//! Unrecognized input redisplays the same menu after a short pause; only
//! the main menu's exit choice leaves the loop.

use anyhow::Result;
use dialoguer::Input;

use crate::admin::{AccountAdmin, Archiver};
use crate::backup::{self, BackupOutcome};
use crate::common::config::Config;
use crate::common::identity;
use crate::groups::{self, AddMemberOutcome, GroupOutcome};
use crate::ui;
use crate::users::{self, CreateOutcome, DeleteOutcome, ShellChangeOutcome};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuState {
    Main,
    Users,
    /// The nested modify submenu, pinned to one validated account.
    ModifyUser(String),
    Groups,
    Exit,
}

/// Run the menu loop starting from the main menu.
pub fn run(accounts: &dyn AccountAdmin, archiver: &dyn Archiver, config: &Config) -> Result<()> {
    run_from(accounts, archiver, config, MenuState::Main)
}

/// Run the menu loop from an arbitrary initial state, so subcommands can
/// jump straight into a submenu.
pub fn run_from(
    accounts: &dyn AccountAdmin,
    archiver: &dyn Archiver,
    config: &Config,
    initial: MenuState,
) -> Result<()> {
    let mut state = initial;
    loop {
        state = match state {
            MenuState::Main => main_menu(archiver, config)?,
            MenuState::Users => user_menu(accounts)?,
            MenuState::ModifyUser(username) => modify_menu(accounts, username)?,
            MenuState::Groups => group_menu(accounts)?,
            MenuState::Exit => break,
        };
    }
    Ok(())
}

fn main_menu(archiver: &dyn Archiver, config: &Config) -> Result<MenuState> {
    ui::heading("System administration");
    println!("  1) User management");
    println!("  2) Group management");
    println!("  3) Back up system directories");
    println!("  4) Exit");

    let choice = prompt_choice()?;
    match choice.as_str() {
        "1" => Ok(MenuState::Users),
        "2" => Ok(MenuState::Groups),
        "3" => {
            match backup::run_backup(archiver, &config.backup) {
                Ok(outcome) => report_backup(outcome),
                Err(e) => ui::error(&format!("Backup aborted: {e:#}")),
            }
            Ok(MenuState::Main)
        }
        "4" => Ok(MenuState::Exit),
        other => {
            invalid_choice(other);
            Ok(MenuState::Main)
        }
    }
}

fn user_menu(accounts: &dyn AccountAdmin) -> Result<MenuState> {
    ui::heading("User management");
    println!("  1) List users");
    println!("  2) Create user");
    println!("  3) Modify user");
    println!("  4) Delete user");
    println!("  5) Back");

    let choice = prompt_choice()?;
    match choice.as_str() {
        "1" => {
            list_users(accounts);
            Ok(MenuState::Users)
        }
        "2" => {
            create_user(accounts)?;
            Ok(MenuState::Users)
        }
        "3" => {
            let username = prompt_line("Username to modify")?;
            let username = username.trim().to_string();
            match accounts.user_exists(&username) {
                Ok(true) => Ok(MenuState::ModifyUser(username)),
                Ok(false) => {
                    ui::error(&format!("Account '{username}' does not exist"));
                    Ok(MenuState::Users)
                }
                Err(e) => {
                    ui::error(&format!("Unable to query accounts: {e}"));
                    Ok(MenuState::Users)
                }
            }
        }
        "4" => {
            delete_user(accounts)?;
            Ok(MenuState::Users)
        }
        "5" => Ok(MenuState::Main),
        other => {
            invalid_choice(other);
            Ok(MenuState::Users)
        }
    }
}

fn modify_menu(accounts: &dyn AccountAdmin, username: String) -> Result<MenuState> {
    ui::heading(&format!("Modify user '{username}'"));
    println!("  1) Change login shell");
    println!("  2) Lock account");
    println!("  3) Unlock account");
    println!("  4) Back");

    let choice = prompt_choice()?;
    match choice.as_str() {
        "1" => {
            let shell = prompt_line("New shell path")?;
            match users::change_shell(accounts, &username, &shell) {
                Ok(ShellChangeOutcome::EmptyShell) => ui::error("No shell given"),
                Ok(ShellChangeOutcome::Changed) => {
                    ui::success(&format!("Shell for '{username}' changed to {}", shell.trim()));
                }
                Ok(ShellChangeOutcome::Failed(e)) => {
                    ui::error(&format!("Failed to change shell: {e}"));
                }
                Err(e) => ui::error(&format!("Unable to query accounts: {e}")),
            }
            Ok(MenuState::ModifyUser(username))
        }
        "2" => {
            match accounts.lock_user(&username) {
                Ok(()) => ui::success(&format!("Account '{username}' locked")),
                Err(e) => ui::error(&format!("Failed to lock account: {e}")),
            }
            Ok(MenuState::ModifyUser(username))
        }
        "3" => {
            match accounts.unlock_user(&username) {
                Ok(()) => ui::success(&format!("Account '{username}' unlocked")),
                Err(e) => ui::error(&format!("Failed to unlock account: {e}")),
            }
            Ok(MenuState::ModifyUser(username))
        }
        "4" => Ok(MenuState::Users),
        other => {
            invalid_choice(other);
            Ok(MenuState::ModifyUser(username))
        }
    }
}

fn group_menu(accounts: &dyn AccountAdmin) -> Result<MenuState> {
    ui::heading("Group management");
    println!("  1) Create group");
    println!("  2) Delete group");
    println!("  3) Add user to group");
    println!("  4) Back");

    let choice = prompt_choice()?;
    match choice.as_str() {
        "1" => {
            let name = prompt_line("Group name")?;
            match groups::create_group(accounts, &name) {
                Ok(GroupOutcome::EmptyName) => ui::error("No group name given"),
                Ok(GroupOutcome::Done) => {
                    ui::success(&format!("Group '{}' created", name.trim()));
                }
                Ok(GroupOutcome::Failed(e)) => ui::error(&format!("Failed to create group: {e}")),
                Err(e) => ui::error(&format!("Unable to query groups: {e}")),
            }
            Ok(MenuState::Groups)
        }
        "2" => {
            let name = prompt_line("Group name")?;
            match groups::delete_group(accounts, &name) {
                Ok(GroupOutcome::EmptyName) => ui::error("No group name given"),
                Ok(GroupOutcome::Done) => {
                    ui::success(&format!("Group '{}' deleted", name.trim()));
                }
                Ok(GroupOutcome::Failed(e)) => {
                    ui::error(&format!("Failed to delete group: {e}"));
                    ui::hint("The group may still be some account's primary group");
                }
                Err(e) => ui::error(&format!("Unable to query groups: {e}")),
            }
            Ok(MenuState::Groups)
        }
        "3" => {
            let username = prompt_line("Username")?;
            let group = prompt_line("Group name")?;
            match groups::add_member(accounts, &username, &group) {
                Ok(AddMemberOutcome::UserNotFound) => {
                    ui::error(&format!("Account '{}' does not exist", username.trim()));
                }
                Ok(AddMemberOutcome::GroupNotFound) => {
                    ui::error(&format!("Group '{}' does not exist", group.trim()));
                }
                Ok(AddMemberOutcome::Added) => ui::success(&format!(
                    "Added '{}' to group '{}'",
                    username.trim(),
                    group.trim()
                )),
                Ok(AddMemberOutcome::Failed(e)) => {
                    ui::error(&format!("Failed to add user to group: {e}"));
                }
                Err(e) => ui::error(&format!("Unable to query accounts: {e}")),
            }
            Ok(MenuState::Groups)
        }
        "4" => Ok(MenuState::Main),
        other => {
            invalid_choice(other);
            Ok(MenuState::Groups)
        }
    }
}

fn list_users(accounts: &dyn AccountAdmin) {
    match accounts.list_standard_users() {
        Ok(users) if users.is_empty() => ui::info("No standard user accounts found"),
        Ok(users) => {
            ui::info("Standard user accounts:");
            for user in users {
                println!("  {user}");
            }
        }
        Err(e) => ui::error(&format!("Unable to list accounts: {e}")),
    }
}

fn create_user(accounts: &dyn AccountAdmin) -> Result<()> {
    let username = prompt_line("New username")?;
    match users::create_user(accounts, &username) {
        Ok(CreateOutcome::EmptyName) => ui::error("No username given"),
        Ok(CreateOutcome::AlreadyExists) => {
            ui::error(&format!("Account '{}' already exists", username.trim()));
        }
        Ok(CreateOutcome::Created) => {
            ui::success(&format!("Account '{}' created", username.trim()));
        }
        Ok(CreateOutcome::CreateFailed(e)) => {
            ui::error(&format!("Failed to create account: {e}"));
            ui::hint("Check that useradd is installed and the disk is not full");
        }
        Ok(CreateOutcome::PasswordFailed(e)) => {
            ui::error(&format!("Account created, but setting the password failed: {e}"));
            ui::hint(&format!("Run 'passwd {}' to set it manually", username.trim()));
        }
        Err(e) => ui::error(&format!("Unable to query accounts: {e}")),
    }
    Ok(())
}

fn delete_user(accounts: &dyn AccountAdmin) -> Result<()> {
    let username = prompt_line("Username to delete")?;
    let trimmed = username.trim().to_string();
    let invoker = identity::login_user();

    let confirm = || {
        Input::<String>::new()
            .with_prompt(format!(
                "Really delete account '{trimmed}' and its home directory? [y/N]"
            ))
            .allow_empty(true)
            .interact_text()
            .unwrap_or_default()
    };

    match users::delete_user(accounts, &username, invoker.as_deref(), confirm) {
        Ok(DeleteOutcome::EmptyName) => ui::error("No username given"),
        Ok(DeleteOutcome::Protected) => {
            ui::error("The root account cannot be deleted");
        }
        Ok(DeleteOutcome::InvokerAccount) => {
            ui::error("Refusing to delete the account you are logged in as");
        }
        Ok(DeleteOutcome::NotFound) => {
            ui::error(&format!("Account '{}' does not exist", username.trim()));
        }
        Ok(DeleteOutcome::Cancelled) => ui::info("Deletion cancelled"),
        Ok(DeleteOutcome::Deleted) => {
            ui::success(&format!("Account '{}' deleted", username.trim()));
        }
        Ok(DeleteOutcome::Failed(e)) => ui::error(&format!("Failed to delete account: {e}")),
        Err(e) => ui::error(&format!("Unable to query accounts: {e}")),
    }
    Ok(())
}

pub fn report_backup(outcome: BackupOutcome) {
    match outcome {
        BackupOutcome::Completed { path, size } => {
            ui::success(&format!("Backup written to {}", path.display()));
            ui::info(&format!("Archive size: {size}"));
        }
        BackupOutcome::Failed { path, error } => {
            ui::error(&format!("Backup failed: {error}"));
            ui::hint(&format!(
                "Check permissions and free disk space; a partial archive may remain at {}",
                path.display()
            ));
        }
    }
}

fn prompt_choice() -> Result<String> {
    prompt_line("Select an option")
}

fn prompt_line(prompt: &str) -> Result<String> {
    let line = Input::<String>::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()?;
    Ok(line)
}

fn invalid_choice(choice: &str) {
    if choice.trim().is_empty() {
        ui::error("No option selected");
    } else {
        ui::error(&format!("'{}' is not an option", choice.trim()));
    }
    ui::pause_briefly();
}
