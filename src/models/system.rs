// Aggregate snapshot and its independently refreshable sections

use std::fmt;

use super::{CpuSnapshot, MemorySnapshot, NetworkSnapshot};

/// One independently refreshable part of a [`SystemSnapshot`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Cpu,
    Memory,
    Network,
    User,
}

impl Section {
    pub const ALL: [Section; 4] = [Self::Cpu, Self::Memory, Self::Network, Self::User];

    /// Response key for the section; absent sections are reported under `<name>_msg`.
    pub fn name(self) -> &'static str {
        match self {
            Self::Cpu => "cpu",
            Self::Memory => "memory",
            Self::Network => "network",
            Self::User => "current_user",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The cached host state. Each section may be absent on its own when its
/// source could not be read.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SystemSnapshot {
    pub cpu: Option<CpuSnapshot>,
    pub memory: Option<MemorySnapshot>,
    pub network: Option<NetworkSnapshot>,
    pub current_user: String,
}

impl SystemSnapshot {
    pub fn has_section(&self, section: Section) -> bool {
        match section {
            Section::Cpu => self.cpu.is_some(),
            Section::Memory => self.memory.is_some(),
            Section::Network => self.network.is_some(),
            Section::User => true,
        }
    }
}
