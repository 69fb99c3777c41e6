// Probe error taxonomy

/// Why a probe could not produce its record.
///
/// None of these abort a request: the snapshot manager turns them into an
/// absent section and the dispatcher reports a `<section>_msg` marker.
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    /// A kernel text source could not be opened.
    #[error("failed to open {path}: {source}")]
    SourceUnavailable {
        path: String,
        source: std::io::Error,
    },

    /// A source opened but its content did not have the expected shape.
    #[error("unexpected content in {path}: {detail}")]
    ParseMismatch { path: String, detail: String },

    /// No process exists for the requested pid.
    #[error("no process with pid {pid}")]
    TargetNotFound { pid: i32 },

    /// An external command could not be started or reported an error.
    #[error("{command} failed: {detail}")]
    ExternalCommandFailure { command: String, detail: String },
}
