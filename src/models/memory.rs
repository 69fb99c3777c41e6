// Physical memory and swap models (all sizes in kB)

use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SwapInfo {
    #[serde(rename = "m_swap_total")]
    pub total: u64,
    #[serde(rename = "m_swap_free")]
    pub free: u64,
    #[serde(rename = "m_swap_cached")]
    pub cached: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MemorySnapshot {
    pub memory_total: u64,
    pub memory_free: u64,
    pub memory_available: u64,
    pub memory_cached: u64,
    /// Zeroed when the source lists no swap keys.
    #[serde(rename = "memory_swap")]
    pub swap: SwapInfo,
}
