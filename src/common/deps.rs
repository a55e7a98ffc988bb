//! Startup probe for the external utilities the tool delegates to.
//!
//! A missing utility is a warning, not a fatal error: the affected menu
//! entries will surface the failure when they are actually used.

use crate::ui;

/// Utilities the delegation layer shells out to.
pub const REQUIRED_TOOLS: &[&str] = &[
    "getent", "useradd", "passwd", "usermod", "userdel", "groupadd", "groupdel", "tar", "du",
];

pub fn warn_missing_tools() {
    for tool in REQUIRED_TOOLS {
        if which::which(tool).is_err() {
            ui::hint(&format!(
                "warning: '{tool}' not found in PATH, related operations will fail"
            ));
        }
    }
}
