//! In-memory fake of the delegation ports.
//!
//! Records every call and returns configurable exit statuses, so the menu
//! logic can be tested without touching the real account database.

use std::cell::RefCell;
use std::path::{Path, PathBuf};

use crate::admin::{AccountAdmin, AdminError, Archiver};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    UserExists(String),
    GroupExists(String),
    ListUsers,
    CreateUser(String),
    SetPassword(String),
    ChangeShell(String, String),
    Lock(String),
    Unlock(String),
    DeleteUser(String),
    CreateGroup(String),
    DeleteGroup(String),
    AddUserToGroup(String, String),
    CreateArchive(PathBuf, Vec<PathBuf>),
    ArchiveSize(PathBuf),
}

impl Call {
    fn is_mutation(&self) -> bool {
        !matches!(
            self,
            Call::UserExists(_) | Call::GroupExists(_) | Call::ListUsers | Call::ArchiveSize(_)
        )
    }
}

#[derive(Default)]
pub struct FakeAdmin {
    pub users: Vec<String>,
    pub groups: Vec<String>,
    /// Exit code every mutating call fails with, when set.
    pub fail_with: Option<i32>,
    calls: RefCell<Vec<Call>>,
}

impl FakeAdmin {
    pub fn with_users(users: &[&str]) -> Self {
        Self {
            users: users.iter().map(|u| u.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn with_groups(mut self, groups: &[&str]) -> Self {
        self.groups = groups.iter().map(|g| g.to_string()).collect();
        self
    }

    pub fn failing(code: i32) -> Self {
        Self {
            fail_with: Some(code),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn mutation_count(&self) -> usize {
        self.calls.borrow().iter().filter(|c| c.is_mutation()).count()
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn mutate(&self, command: &str) -> Result<(), AdminError> {
        match self.fail_with {
            Some(code) => Err(AdminError::from_exit_code(command, code, "")),
            None => Ok(()),
        }
    }
}

impl AccountAdmin for FakeAdmin {
    fn user_exists(&self, username: &str) -> Result<bool, AdminError> {
        self.record(Call::UserExists(username.to_string()));
        Ok(self.users.iter().any(|u| u == username))
    }

    fn group_exists(&self, group: &str) -> Result<bool, AdminError> {
        self.record(Call::GroupExists(group.to_string()));
        Ok(self.groups.iter().any(|g| g == group))
    }

    fn list_standard_users(&self) -> Result<Vec<String>, AdminError> {
        self.record(Call::ListUsers);
        Ok(self.users.clone())
    }

    fn create_user(&self, username: &str) -> Result<(), AdminError> {
        self.record(Call::CreateUser(username.to_string()));
        self.mutate("useradd")
    }

    fn set_password(&self, username: &str) -> Result<(), AdminError> {
        self.record(Call::SetPassword(username.to_string()));
        self.mutate("passwd")
    }

    fn change_shell(&self, username: &str, shell: &str) -> Result<(), AdminError> {
        self.record(Call::ChangeShell(username.to_string(), shell.to_string()));
        self.mutate("usermod")
    }

    fn lock_user(&self, username: &str) -> Result<(), AdminError> {
        self.record(Call::Lock(username.to_string()));
        Ok(())
    }

    fn unlock_user(&self, username: &str) -> Result<(), AdminError> {
        self.record(Call::Unlock(username.to_string()));
        Ok(())
    }

    fn delete_user(&self, username: &str) -> Result<(), AdminError> {
        self.record(Call::DeleteUser(username.to_string()));
        self.mutate("userdel")
    }

    fn create_group(&self, group: &str) -> Result<(), AdminError> {
        self.record(Call::CreateGroup(group.to_string()));
        self.mutate("groupadd")
    }

    fn delete_group(&self, group: &str) -> Result<(), AdminError> {
        self.record(Call::DeleteGroup(group.to_string()));
        self.mutate("groupdel")
    }

    fn add_user_to_group(&self, username: &str, group: &str) -> Result<(), AdminError> {
        self.record(Call::AddUserToGroup(username.to_string(), group.to_string()));
        self.mutate("usermod")
    }
}

impl Archiver for FakeAdmin {
    fn create_archive(&self, destination: &Path, sources: &[PathBuf]) -> Result<(), AdminError> {
        self.record(Call::CreateArchive(
            destination.to_path_buf(),
            sources.to_vec(),
        ));
        self.mutate("tar")
    }

    fn archive_size(&self, path: &Path) -> Result<String, AdminError> {
        self.record(Call::ArchiveSize(path.to_path_buf()));
        Ok("12M".to_string())
    }
}
