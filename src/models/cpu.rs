// CPU topology models

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// Maximum number of distinct physical sockets recorded per snapshot.
pub const MAX_CPUS: usize = 2;

/// One physical CPU package, as described by the first block seen for its socket.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CpuCore {
    #[serde(rename = "vendor_id")]
    pub vendor: String,
    #[serde(rename = "model_name")]
    pub model: String,
    pub cores: u32,
    /// Cache size in KB.
    pub cache_size: u32,
    pub cache_align: u32,
    pub cpu_mhz: f64,
    pub address_sizes: String,
    #[serde(skip)]
    pub physical_id: u32,
}

/// Fixed-capacity set of CPU packages, in socket discovery order.
///
/// The active count is derived from the occupied slots, so it can never
/// disagree with them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CpuSnapshot {
    slots: [Option<CpuCore>; MAX_CPUS],
}

impl CpuSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `core` in the next free slot.
    ///
    /// Returns `false` (and drops `core`) when every slot is taken or the
    /// socket already has a slot.
    pub fn push(&mut self, core: CpuCore) -> bool {
        if self.contains_socket(core.physical_id) {
            return false;
        }
        match self.slots.iter_mut().find(|slot| slot.is_none()) {
            Some(slot) => {
                *slot = Some(core);
                true
            }
            None => false,
        }
    }

    pub fn cpus_active(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_full(&self) -> bool {
        self.cpus_active() == MAX_CPUS
    }

    pub fn contains_socket(&self, physical_id: u32) -> bool {
        self.cores().any(|core| core.physical_id == physical_id)
    }

    pub fn slots(&self) -> &[Option<CpuCore>; MAX_CPUS] {
        &self.slots
    }

    pub fn cores(&self) -> impl Iterator<Item = &CpuCore> {
        self.slots.iter().flatten()
    }
}

impl Serialize for CpuSnapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let cpus: Vec<&CpuCore> = self.cores().collect();
        let mut state = serializer.serialize_struct("CpuSnapshot", 2)?;
        state.serialize_field("cpu_count", &self.cpus_active())?;
        state.serialize_field("cpus", &cpus)?;
        state.end()
    }
}
