// Field parsers: turn kernel text sources and OS calls into typed records

mod cpu;
mod linux;
mod memory;
mod network;
mod process;
mod uptime;
mod user;

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use tracing::instrument;

use crate::error::ProbeError;
use crate::models::{CpuSnapshot, MemorySnapshot, NetworkSnapshot, ProcessRecord};

pub use cpu::parse_cpuinfo;
pub use memory::parse_meminfo;
pub use network::{InterfaceEntry, collect_interfaces};
pub use process::{SignalOutcome, classify_kill, parse_stat};
pub use uptime::{UPTIME_UNREADABLE, parse_uptime};
pub use user::{UNKNOWN_USER, first_login};

/// Default procfs mount point.
pub const PROCFS_ROOT: &str = "/proc";

/// Source of every raw host fact the agent reports.
///
/// [`ProcfsProbe`] is the production implementation; tests substitute
/// their own to control and count reads.
pub trait HostProbe: Send {
    fn cpu(&self) -> Result<CpuSnapshot, ProbeError>;
    fn memory(&self) -> Result<MemorySnapshot, ProbeError>;
    fn network(&self) -> Result<NetworkSnapshot, ProbeError>;
    /// First login name, or [`UNKNOWN_USER`].
    fn current_user(&self) -> String;
    /// Whole seconds since boot, or a placeholder describing the failure.
    fn uptime(&self) -> String;
    fn lookup(&self, pid: i32) -> Result<ProcessRecord, ProbeError>;
    fn signal(&self, pid: i32, signal: i32) -> SignalOutcome;
}

/// Reads `/proc` (or a stand-in tree rooted elsewhere) and the live OS.
#[derive(Debug, Clone)]
pub struct ProcfsProbe {
    root: PathBuf,
}

impl Default for ProcfsProbe {
    fn default() -> Self {
        Self::new(PROCFS_ROOT)
    }
}

impl ProcfsProbe {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn open(&self, name: &str) -> Result<(PathBuf, BufReader<File>), ProbeError> {
        let path = self.root.join(name);
        let file = File::open(&path).map_err(|source| ProbeError::SourceUnavailable {
            path: path.display().to_string(),
            source,
        })?;
        Ok((path, BufReader::new(file)))
    }
}

fn read_failed(path: &Path, err: std::io::Error) -> ProbeError {
    ProbeError::ParseMismatch {
        path: path.display().to_string(),
        detail: err.to_string(),
    }
}

impl HostProbe for ProcfsProbe {
    #[instrument(skip(self), fields(probe = "procfs", operation = "cpu"))]
    fn cpu(&self) -> Result<CpuSnapshot, ProbeError> {
        let (path, reader) = self.open("cpuinfo")?;
        parse_cpuinfo(reader).map_err(|e| read_failed(&path, e))
    }

    #[instrument(skip(self), fields(probe = "procfs", operation = "memory"))]
    fn memory(&self) -> Result<MemorySnapshot, ProbeError> {
        let (path, reader) = self.open("meminfo")?;
        parse_meminfo(reader).map_err(|e| read_failed(&path, e))
    }

    #[instrument(skip(self), fields(probe = "procfs", operation = "network"))]
    fn network(&self) -> Result<NetworkSnapshot, ProbeError> {
        let entries =
            linux::enumerate_interfaces().map_err(|source| ProbeError::SourceUnavailable {
                path: "getifaddrs".into(),
                source,
            })?;
        Ok(collect_interfaces(entries))
    }

    #[instrument(skip(self), fields(probe = "procfs", operation = "current_user"))]
    fn current_user(&self) -> String {
        user::current_user()
    }

    #[instrument(skip(self), fields(probe = "procfs", operation = "uptime"))]
    fn uptime(&self) -> String {
        uptime::read_uptime(&self.root.join("uptime"))
    }

    #[instrument(skip(self), fields(probe = "procfs", operation = "lookup"))]
    fn lookup(&self, pid: i32) -> Result<ProcessRecord, ProbeError> {
        process::lookup(&self.root, pid)
    }

    #[instrument(skip(self), fields(probe = "procfs", operation = "signal"))]
    fn signal(&self, pid: i32, signal: i32) -> SignalOutcome {
        process::send_signal(pid, signal)
    }
}
