// Process lookup (/proc/<pid>/stat) and signal delivery (kill(2))

use std::io;
use std::path::Path;

use crate::error::ProbeError;
use crate::models::{ProcessRecord, ProcessState};

use super::linux;

/// Result of delivering a signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignalOutcome {
    Delivered,
    /// No process holds the pid.
    NotFound,
    Failed(String),
}

impl SignalOutcome {
    /// Failure text for the caller; `None` on success.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Delivered => None,
            Self::NotFound => Some("pid is not reserved"),
            Self::Failed(message) => Some(message),
        }
    }
}

/// Maps a `kill(2)` result to an outcome; `ESRCH` is the not-found case.
pub fn classify_kill(result: io::Result<()>) -> SignalOutcome {
    match result {
        Ok(()) => SignalOutcome::Delivered,
        Err(e) if e.raw_os_error() == Some(libc::ESRCH) => SignalOutcome::NotFound,
        Err(e) => SignalOutcome::Failed(e.to_string()),
    }
}

pub(super) fn send_signal(pid: i32, signal: i32) -> SignalOutcome {
    // 0 and negative pids address process groups or every process.
    if pid <= 0 {
        return SignalOutcome::Failed("invalid pid".into());
    }
    let outcome = classify_kill(linux::deliver_signal(pid, signal));
    tracing::debug!(pid, signal, ?outcome, "signal delivery");
    outcome
}

/// Parses `pid (comm) state ppid ...` into `(comm, state, ppid)`.
///
/// `comm` may itself contain spaces and parentheses, so it runs up to the
/// last `)` on the line.
pub fn parse_stat(content: &str) -> Option<(String, char, u32)> {
    let open = content.find('(')?;
    let close = content.rfind(')')?;
    if close < open {
        return None;
    }
    let name = &content[open + 1..close];
    let mut rest = content[close + 1..].split_whitespace();
    let mut state_field = rest.next()?.chars();
    let state = state_field.next()?;
    if state_field.next().is_some() {
        return None;
    }
    let ppid = rest.next()?.parse().ok()?;
    Some((name.to_string(), state, ppid))
}

pub(super) fn lookup(root: &Path, pid: i32) -> Result<ProcessRecord, ProbeError> {
    if pid <= 0 {
        return Err(ProbeError::TargetNotFound { pid });
    }
    let path = root.join(pid.to_string()).join("stat");
    let content = std::fs::read_to_string(&path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            ProbeError::TargetNotFound { pid }
        } else {
            ProbeError::SourceUnavailable {
                path: path.display().to_string(),
                source,
            }
        }
    })?;
    let (name, state, ppid) = parse_stat(&content).ok_or_else(|| ProbeError::ParseMismatch {
        path: path.display().to_string(),
        detail: "expected `pid (comm) state ppid`".into(),
    })?;
    Ok(ProcessRecord::new(
        &name,
        ProcessState::from_code(state),
        pid.unsigned_abs(),
        ppid,
    ))
}
