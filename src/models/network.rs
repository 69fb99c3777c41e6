// Network interface models

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// Maximum number of link-layer interfaces recorded per snapshot.
pub const MAX_NETINT: usize = 4;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NetworkInterface {
    pub name: String,
    /// Raw `IFF_*` bitmask.
    pub flags: u32,
}

/// Fixed-capacity interface list, in enumeration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NetworkSnapshot {
    slots: [Option<NetworkInterface>; MAX_NETINT],
}

impl NetworkSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `interface` in the next free slot; `false` once the snapshot is full.
    pub fn push(&mut self, interface: NetworkInterface) -> bool {
        match self.slots.iter_mut().find(|slot| slot.is_none()) {
            Some(slot) => {
                *slot = Some(interface);
                true
            }
            None => false,
        }
    }

    pub fn interface_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_full(&self) -> bool {
        self.interface_count() == MAX_NETINT
    }

    pub fn slots(&self) -> &[Option<NetworkInterface>; MAX_NETINT] {
        &self.slots
    }

    pub fn interfaces(&self) -> impl Iterator<Item = &NetworkInterface> {
        self.slots.iter().flatten()
    }
}

impl Serialize for NetworkSnapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let interfaces: Vec<&NetworkInterface> = self.interfaces().collect();
        let mut state = serializer.serialize_struct("NetworkSnapshot", 2)?;
        state.serialize_field("interface_count", &self.interface_count())?;
        state.serialize_field("interfaces", &interfaces)?;
        state.end()
    }
}
