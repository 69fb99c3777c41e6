// Snapshot data model: CPU topology, memory, network, processes and the aggregate

mod cpu;
mod memory;
mod network;
mod process;
mod system;

pub use cpu::{CpuCore, CpuSnapshot, MAX_CPUS};
pub use memory::{MemorySnapshot, SwapInfo};
pub use network::{MAX_NETINT, NetworkInterface, NetworkSnapshot};
pub use process::{MAX_PROCESS_NAME, ProcessRecord, ProcessState};
pub use system::{Section, SystemSnapshot};
