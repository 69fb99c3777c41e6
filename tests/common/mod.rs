// Shared test helpers: a scripted probe and synthetic procfs trees
#![allow(dead_code)]

use std::io;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use ubmonitor::dispatcher::Dispatcher;
use ubmonitor::error::ProbeError;
use ubmonitor::models::*;
use ubmonitor::probe::{HostProbe, InterfaceEntry, SignalOutcome, collect_interfaces};
use ubmonitor::snapshot::SnapshotManager;

/// Per-source call counters plus switches to make a source fail.
#[derive(Debug)]
pub struct ProbeState {
    pub cpu_calls: AtomicUsize,
    pub memory_calls: AtomicUsize,
    pub network_calls: AtomicUsize,
    pub user_calls: AtomicUsize,
    pub cpu_ok: AtomicBool,
    pub memory_ok: AtomicBool,
    pub network_ok: AtomicBool,
    pub signal_outcome: Mutex<SignalOutcome>,
}

impl Default for ProbeState {
    fn default() -> Self {
        Self {
            cpu_calls: AtomicUsize::new(0),
            memory_calls: AtomicUsize::new(0),
            network_calls: AtomicUsize::new(0),
            user_calls: AtomicUsize::new(0),
            cpu_ok: AtomicBool::new(true),
            memory_ok: AtomicBool::new(true),
            network_ok: AtomicBool::new(true),
            signal_outcome: Mutex::new(SignalOutcome::Delivered),
        }
    }
}

impl ProbeState {
    pub fn cpu_calls(&self) -> usize {
        self.cpu_calls.load(Ordering::SeqCst)
    }

    pub fn memory_calls(&self) -> usize {
        self.memory_calls.load(Ordering::SeqCst)
    }

    pub fn network_calls(&self) -> usize {
        self.network_calls.load(Ordering::SeqCst)
    }

    pub fn user_calls(&self) -> usize {
        self.user_calls.load(Ordering::SeqCst)
    }

    pub fn fail_cpu(&self) {
        self.cpu_ok.store(false, Ordering::SeqCst);
    }

    pub fn fail_memory(&self) {
        self.memory_ok.store(false, Ordering::SeqCst);
    }

    pub fn fail_network(&self) {
        self.network_ok.store(false, Ordering::SeqCst);
    }

    pub fn set_signal_outcome(&self, outcome: SignalOutcome) {
        *self.signal_outcome.lock().unwrap() = outcome;
    }
}

/// Probe returning fixed records; pid 42 is the only live process.
pub struct FakeProbe {
    pub state: Arc<ProbeState>,
}

pub const LIVE_PID: i32 = 42;

fn unavailable(name: &str) -> ProbeError {
    ProbeError::SourceUnavailable {
        path: format!("/fake/{name}"),
        source: io::Error::from(io::ErrorKind::NotFound),
    }
}

impl HostProbe for FakeProbe {
    fn cpu(&self) -> Result<CpuSnapshot, ProbeError> {
        self.state.cpu_calls.fetch_add(1, Ordering::SeqCst);
        if !self.state.cpu_ok.load(Ordering::SeqCst) {
            return Err(unavailable("cpuinfo"));
        }
        let mut cpu = CpuSnapshot::new();
        cpu.push(CpuCore {
            vendor: "GenuineIntel".into(),
            model: "Intel(R) Xeon(R) CPU E5-2680 v4 @ 2.40GHz".into(),
            cores: 14,
            cache_size: 35840,
            cache_align: 64,
            cpu_mhz: 2400.0,
            address_sizes: "46 bits physical, 48 bits virtual".into(),
            physical_id: 0,
        });
        Ok(cpu)
    }

    fn memory(&self) -> Result<MemorySnapshot, ProbeError> {
        self.state.memory_calls.fetch_add(1, Ordering::SeqCst);
        if !self.state.memory_ok.load(Ordering::SeqCst) {
            return Err(unavailable("meminfo"));
        }
        Ok(MemorySnapshot {
            memory_total: 1024,
            memory_free: 512,
            memory_available: 768,
            memory_cached: 128,
            swap: SwapInfo {
                total: 256,
                free: 200,
                cached: 8,
            },
        })
    }

    fn network(&self) -> Result<NetworkSnapshot, ProbeError> {
        self.state.network_calls.fetch_add(1, Ordering::SeqCst);
        if !self.state.network_ok.load(Ordering::SeqCst) {
            return Err(unavailable("getifaddrs"));
        }
        Ok(collect_interfaces(vec![
            link("lo", 0x49),
            link("eth0", 0x1043),
        ]))
    }

    fn current_user(&self) -> String {
        self.state.user_calls.fetch_add(1, Ordering::SeqCst);
        "root".into()
    }

    fn uptime(&self) -> String {
        "3600".into()
    }

    fn lookup(&self, pid: i32) -> Result<ProcessRecord, ProbeError> {
        if pid == LIVE_PID {
            Ok(ProcessRecord::new(
                "dropbear",
                ProcessState::InterruptibleSleep,
                42,
                1,
            ))
        } else {
            Err(ProbeError::TargetNotFound { pid })
        }
    }

    fn signal(&self, _pid: i32, _signal: i32) -> SignalOutcome {
        self.state.signal_outcome.lock().unwrap().clone()
    }
}

pub fn link(name: &str, flags: u32) -> InterfaceEntry {
    InterfaceEntry {
        name: name.into(),
        flags,
        link_layer: true,
    }
}

pub fn address(name: &str, flags: u32) -> InterfaceEntry {
    InterfaceEntry {
        name: name.into(),
        flags,
        link_layer: false,
    }
}

pub fn fake_manager(preserve_cpu: bool) -> (SnapshotManager, Arc<ProbeState>) {
    let state = Arc::new(ProbeState::default());
    let probe = FakeProbe {
        state: state.clone(),
    };
    (SnapshotManager::new(Box::new(probe), preserve_cpu), state)
}

pub fn fake_dispatcher(preserve_cpu: bool) -> (Dispatcher, Arc<ProbeState>) {
    let (manager, state) = fake_manager(preserve_cpu);
    (Dispatcher::new(manager), state)
}

/// Writes `files` (paths relative to the root) into a fresh directory.
pub fn procfs_with(files: &[(&str, &str)]) -> tempfile::TempDir {
    let dir = tempfile::TempDir::new().unwrap();
    for (name, content) in files {
        let path = dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, content).unwrap();
    }
    dir
}
