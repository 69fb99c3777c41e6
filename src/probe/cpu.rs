// /proc/cpuinfo: one CpuCore per distinct physical socket

use std::io::{self, BufRead};

use crate::models::{CpuCore, CpuSnapshot};

/// Line prefix that opens a new logical-processor block.
const BLOCK_MARKER: &str = "processor";

/// Socket assumed for a block that never names one (single-package ARM/MIPS hosts).
const IMPLICIT_SOCKET: u32 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockState {
    /// Before the first marker; lines are ignored.
    Preamble,
    /// Inside a block whose socket is not known yet.
    Accumulating,
    /// Socket claimed; the block is committed when it ends.
    Candidate,
    /// Socket already recorded or capacity reached; ignore until the next marker.
    Skipping,
}

struct CpuinfoScanner {
    snapshot: CpuSnapshot,
    current: CpuCore,
    state: BlockState,
}

impl CpuinfoScanner {
    fn new() -> Self {
        Self {
            snapshot: CpuSnapshot::new(),
            current: CpuCore::default(),
            state: BlockState::Preamble,
        }
    }

    fn feed(&mut self, line: &str) {
        if line.starts_with(BLOCK_MARKER) {
            self.finish_block();
            self.current = CpuCore::default();
            self.state = BlockState::Accumulating;
            return;
        }
        if matches!(self.state, BlockState::Preamble | BlockState::Skipping) {
            return;
        }
        let Some((key, value)) = line.split_once(':') else {
            return;
        };
        let value = value.trim();
        match key.trim() {
            "vendor_id" => self.current.vendor = value.to_string(),
            "model name" => self.current.model = value.to_string(),
            "cpu cores" => self.current.cores = leading_u32(value),
            "cache size" => self.current.cache_size = leading_u32(value),
            "cache_alignment" => self.current.cache_align = leading_u32(value),
            "cpu MHz" => self.current.cpu_mhz = value.parse().unwrap_or(0.0),
            "address sizes" => self.current.address_sizes = value.to_string(),
            "physical id" => self.claim_socket(leading_u32(value)),
            _ => {}
        }
    }

    /// The previous candidate is always committed before the next block
    /// claims, so the snapshot itself is the set of seen sockets.
    fn claim_socket(&mut self, physical_id: u32) {
        self.current.physical_id = physical_id;
        if self.snapshot.contains_socket(physical_id) || self.snapshot.is_full() {
            self.state = BlockState::Skipping;
            return;
        }
        self.state = BlockState::Candidate;
    }

    /// Commits the pending block, if any. Runs at every marker and once at end of input.
    fn finish_block(&mut self) {
        if self.state == BlockState::Accumulating {
            self.claim_socket(IMPLICIT_SOCKET);
        }
        if self.state == BlockState::Candidate {
            let core = std::mem::take(&mut self.current);
            self.snapshot.push(core);
        }
        self.state = BlockState::Skipping;
    }

    fn finish(mut self) -> CpuSnapshot {
        self.finish_block();
        self.snapshot
    }
}

/// Parses `/proc/cpuinfo` content.
///
/// The first [`MAX_CPUS`](crate::models::MAX_CPUS) distinct `physical id`s win; every later block for
/// an already-recorded socket is ignored, and so is every socket past the cap.
pub fn parse_cpuinfo<R: BufRead>(reader: R) -> io::Result<CpuSnapshot> {
    let mut scanner = CpuinfoScanner::new();
    for line in reader.lines() {
        scanner.feed(&line?);
    }
    Ok(scanner.finish())
}

/// Leading decimal digits of `value` (`"8192 KB"` -> 8192); 0 when there are none.
fn leading_u32(value: &str) -> u32 {
    let end = value
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(value.len());
    value[..end].parse().unwrap_or(0)
}
