// Current user from the login registry (`who`)

use std::process::Command;

use crate::error::ProbeError;

/// Reported when the login registry cannot be queried or lists nobody.
pub const UNKNOWN_USER: &str = "unknown";

/// Lowest login name (sorted, de-duplicated) in `who` output.
pub fn first_login(output: &str) -> Option<String> {
    let mut names: Vec<&str> = output
        .lines()
        .filter_map(|line| line.split_whitespace().next())
        .collect();
    names.sort_unstable();
    names.dedup();
    names.first().map(|name| name.to_string())
}

pub(super) fn current_user() -> String {
    let output = match Command::new("who").output() {
        Ok(output) => output,
        Err(e) => {
            let err = ProbeError::ExternalCommandFailure {
                command: "who".into(),
                detail: e.to_string(),
            };
            tracing::warn!(error = %err, "failed to query current user");
            return UNKNOWN_USER.to_string();
        }
    };
    first_login(&String::from_utf8_lossy(&output.stdout)).unwrap_or_else(|| UNKNOWN_USER.into())
}
