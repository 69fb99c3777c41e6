// /proc/meminfo: physical memory and swap totals

use std::io::{self, BufRead};

use crate::models::MemorySnapshot;

/// Parses `/proc/meminfo` content. Unknown keys are ignored; missing or
/// malformed values stay at zero.
pub fn parse_meminfo<R: BufRead>(reader: R) -> io::Result<MemorySnapshot> {
    let mut memory = MemorySnapshot::default();
    for line in reader.lines() {
        let line = line?;
        let Some((key, rest)) = line.split_once(':') else {
            continue;
        };
        let field = match key.trim() {
            "MemTotal" => &mut memory.memory_total,
            "MemFree" => &mut memory.memory_free,
            "MemAvailable" => &mut memory.memory_available,
            "Cached" => &mut memory.memory_cached,
            "SwapTotal" => &mut memory.swap.total,
            "SwapFree" => &mut memory.swap.free,
            "SwapCached" => &mut memory.swap.cached,
            _ => continue,
        };
        *field = rest
            .split_whitespace()
            .next()
            .and_then(|kb| kb.parse().ok())
            .unwrap_or(0);
    }
    Ok(memory)
}
