//! Group management.
//!
//! Creation and deletion go straight to the port; adding a member checks
//! that both the account and the group exist first.

use crate::admin::{AccountAdmin, AdminError};

#[derive(Debug)]
pub enum GroupOutcome {
    EmptyName,
    Done,
    Failed(AdminError),
}

pub fn create_group(admin: &dyn AccountAdmin, group: &str) -> Result<GroupOutcome, AdminError> {
    let group = group.trim();
    if group.is_empty() {
        return Ok(GroupOutcome::EmptyName);
    }
    match admin.create_group(group) {
        Ok(()) => Ok(GroupOutcome::Done),
        Err(e) => Ok(GroupOutcome::Failed(e)),
    }
}

pub fn delete_group(admin: &dyn AccountAdmin, group: &str) -> Result<GroupOutcome, AdminError> {
    let group = group.trim();
    if group.is_empty() {
        return Ok(GroupOutcome::EmptyName);
    }
    match admin.delete_group(group) {
        Ok(()) => Ok(GroupOutcome::Done),
        Err(e) => Ok(GroupOutcome::Failed(e)),
    }
}

#[derive(Debug)]
pub enum AddMemberOutcome {
    /// The account does not exist; nothing was delegated.
    UserNotFound,
    /// The group does not exist; nothing was delegated.
    GroupNotFound,
    Added,
    Failed(AdminError),
}

/// Append `username` to the supplementary membership of `group`.
pub fn add_member(
    admin: &dyn AccountAdmin,
    username: &str,
    group: &str,
) -> Result<AddMemberOutcome, AdminError> {
    let username = username.trim();
    let group = group.trim();
    if username.is_empty() || !admin.user_exists(username)? {
        return Ok(AddMemberOutcome::UserNotFound);
    }
    if group.is_empty() || !admin.group_exists(group)? {
        return Ok(AddMemberOutcome::GroupNotFound);
    }
    match admin.add_user_to_group(username, group) {
        Ok(()) => Ok(AddMemberOutcome::Added),
        Err(e) => Ok(AddMemberOutcome::Failed(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::admin::fake::{Call, FakeAdmin};

    #[test]
    fn create_and_delete_delegate_to_the_port() {
        let admin = FakeAdmin::default();
        assert!(matches!(
            create_group(&admin, "staff").unwrap(),
            GroupOutcome::Done
        ));
        assert!(matches!(
            delete_group(&admin, "staff").unwrap(),
            GroupOutcome::Done
        ));
        assert_eq!(
            admin.calls(),
            vec![
                Call::CreateGroup("staff".to_string()),
                Call::DeleteGroup("staff".to_string()),
            ]
        );
    }

    #[test]
    fn empty_group_name_delegates_nothing() {
        let admin = FakeAdmin::default();
        assert!(matches!(
            create_group(&admin, "  ").unwrap(),
            GroupOutcome::EmptyName
        ));
        assert!(matches!(
            delete_group(&admin, "").unwrap(),
            GroupOutcome::EmptyName
        ));
        assert!(admin.calls().is_empty());
    }

    #[test]
    fn delete_failure_surfaces_the_exit_code() {
        let admin = FakeAdmin::failing(8);
        match delete_group(&admin, "staff").unwrap() {
            GroupOutcome::Failed(e) => assert_eq!(e.exit_code(), Some(8)),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn add_member_requires_both_to_exist() {
        let admin = FakeAdmin::with_users(&["alice"]).with_groups(&["staff"]);
        assert!(matches!(
            add_member(&admin, "mallory", "staff").unwrap(),
            AddMemberOutcome::UserNotFound
        ));
        assert!(matches!(
            add_member(&admin, "alice", "ghosts").unwrap(),
            AddMemberOutcome::GroupNotFound
        ));
        assert_eq!(admin.mutation_count(), 0);
    }

    #[test]
    fn add_member_appends_after_both_probes() {
        let admin = FakeAdmin::with_users(&["alice"]).with_groups(&["staff"]);
        let outcome = add_member(&admin, "alice", "staff").unwrap();
        assert!(matches!(outcome, AddMemberOutcome::Added));
        assert_eq!(
            admin.calls(),
            vec![
                Call::UserExists("alice".to_string()),
                Call::GroupExists("staff".to_string()),
                Call::AddUserToGroup("alice".to_string(), "staff".to_string()),
            ]
        );
    }
}
