// Interface enumeration: link-layer entries only, capped at MAX_NETINT

use crate::models::{NetworkInterface, NetworkSnapshot};

/// One raw enumeration entry. `getifaddrs(3)` yields one per address, so a
/// device shows up once at link level and again for every protocol address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceEntry {
    pub name: String,
    pub flags: u32,
    /// `AF_PACKET` entry (device-level attachment).
    pub link_layer: bool,
}

/// Keeps the first [`MAX_NETINT`](crate::models::MAX_NETINT) link-layer entries.
pub fn collect_interfaces<I>(entries: I) -> NetworkSnapshot
where
    I: IntoIterator<Item = InterfaceEntry>,
{
    let mut snapshot = NetworkSnapshot::new();
    for entry in entries.into_iter().filter(|e| e.link_layer) {
        if snapshot.is_full() {
            break;
        }
        snapshot.push(NetworkInterface {
            name: entry.name,
            flags: entry.flags,
        });
    }
    snapshot
}
