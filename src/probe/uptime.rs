// /proc/uptime: whole seconds since boot, rendered as a string

use std::path::Path;

/// Returned when the source opened but held no leading number.
pub const UPTIME_UNREADABLE: &str = "failed to read uptime";

/// First field of `/proc/uptime`, truncated to whole seconds.
pub fn parse_uptime(content: &str) -> Option<String> {
    let seconds: f64 = content.split_whitespace().next()?.parse().ok()?;
    if !seconds.is_finite() || seconds < 0.0 {
        return None;
    }
    Some(format!("{}", seconds.trunc() as u64))
}

pub(super) fn read_uptime(path: &Path) -> String {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            tracing::warn!(error = %e, path = %path.display(), "failed to open uptime source");
            return format!("unable to open {}", path.display());
        }
    };
    parse_uptime(&content).unwrap_or_else(|| {
        tracing::warn!(path = %path.display(), "failed to read uptime");
        UPTIME_UNREADABLE.to_string()
    })
}
