// Per-process status record (transient, produced per lookup)

use serde::{Serialize, Serializer};

/// Longest process name kept, in bytes.
pub const MAX_PROCESS_NAME: usize = 255;

/// Scheduler state from the single-letter code in `/proc/<pid>/stat`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessState {
    Running,
    UninterruptibleSleep,
    InterruptibleSleep,
    Stopped,
    Zombie,
    Unknown,
}

impl ProcessState {
    pub fn from_code(code: char) -> Self {
        match code {
            'R' => Self::Running,
            'D' => Self::UninterruptibleSleep,
            'S' => Self::InterruptibleSleep,
            'T' => Self::Stopped,
            'Z' => Self::Zombie,
            _ => Self::Unknown,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::UninterruptibleSleep => "uninterruptible sleep",
            Self::InterruptibleSleep => "interruptible sleep",
            Self::Stopped => "stopped",
            Self::Zombie => "zombie",
            Self::Unknown => "unknown",
        }
    }
}

impl Serialize for ProcessState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessRecord {
    #[serde(rename = "process_name")]
    pub name: String,
    pub pid: u32,
    pub ppid: u32,
    pub state: ProcessState,
}

impl ProcessRecord {
    /// Builds a record, truncating `name` to [`MAX_PROCESS_NAME`] bytes on a char boundary.
    pub fn new(name: &str, state: ProcessState, pid: u32, ppid: u32) -> Self {
        let mut end = name.len().min(MAX_PROCESS_NAME);
        while !name.is_char_boundary(end) {
            end -= 1;
        }
        Self {
            name: name[..end].to_string(),
            pid,
            ppid,
            state,
        }
    }
}
