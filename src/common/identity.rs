//! Identity queries
//!
//! The privilege gate needs the effective identity; the delete
//! self-protection rule needs the login identity of the human operator,
//! which is a different thing under `sudo`.

use std::env;
use std::process::Command;

use sudo::RunningAs;

/// Whether the process has root privileges.
pub fn is_root() -> bool {
    matches!(sudo::check(), RunningAs::Root | RunningAs::Suid)
}

/// The login name of the operator who invoked the tool, looking through a
/// `sudo` elevation. `None` when no login identity can be determined.
pub fn login_user() -> Option<String> {
    let sudo_user = env::var("SUDO_USER").ok();
    let user = env::var("USER").ok();
    resolve_login(sudo_user.as_deref(), logname().as_deref(), user.as_deref())
}

/// `logname` consults the login record of the controlling terminal.
fn logname() -> Option<String> {
    let output = Command::new("logname").output().ok()?;
    if !output.status.success() {
        return None;
    }
    let name = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!name.is_empty()).then_some(name)
}

fn resolve_login(
    sudo_user: Option<&str>,
    logname: Option<&str>,
    user: Option<&str>,
) -> Option<String> {
    [sudo_user, logname, user]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|name| !name.is_empty())
        .map(str::to_string)
}
