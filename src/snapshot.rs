// Snapshot manager: owns the cached SystemSnapshot and its refresh policy.
// Sections are replaced in place; a failed parse leaves the section absent, never stale.

use crate::error::ProbeError;
use crate::models::{Section, SystemSnapshot};
use crate::probe::HostProbe;

pub struct SnapshotManager {
    probe: Box<dyn HostProbe>,
    /// Keep an already-parsed CPU section across full refreshes.
    preserve_cpu: bool,
    snapshot: Option<SystemSnapshot>,
}

impl SnapshotManager {
    pub fn new(probe: Box<dyn HostProbe>, preserve_cpu: bool) -> Self {
        Self {
            probe,
            preserve_cpu,
            snapshot: None,
        }
    }

    pub fn probe(&self) -> &dyn HostProbe {
        self.probe.as_ref()
    }

    pub fn preserves_cpu(&self) -> bool {
        self.preserve_cpu
    }

    /// The cached snapshot, if one was ever created.
    pub fn snapshot(&self) -> Option<&SystemSnapshot> {
        self.snapshot.as_ref()
    }

    /// Returns the snapshot, creating it with a full parse on first use.
    pub fn ensure_snapshot(&mut self) -> &mut SystemSnapshot {
        let probe = self.probe.as_ref();
        self.snapshot.get_or_insert_with(|| {
            tracing::debug!(operation = "ensure_snapshot", "creating snapshot");
            let mut snapshot = SystemSnapshot::default();
            for section in Section::ALL {
                refresh_into(probe, &mut snapshot, section);
            }
            snapshot
        })
    }

    /// Re-parses exactly one section, dropping its previous value first.
    pub fn refresh_section(&mut self, section: Section) -> &mut SystemSnapshot {
        if self.snapshot.is_none() {
            return self.ensure_snapshot();
        }
        let probe = self.probe.as_ref();
        let snapshot = self.snapshot.get_or_insert_with(SystemSnapshot::default);
        refresh_into(probe, snapshot, section);
        snapshot
    }

    /// Refreshes CPU unless preservation is on and a CPU section is already cached.
    pub fn refresh_cpu(&mut self) -> &mut SystemSnapshot {
        let cached = self
            .snapshot
            .as_ref()
            .is_some_and(|s| s.has_section(Section::Cpu));
        if self.preserve_cpu && cached {
            tracing::debug!(operation = "refresh_cpu", "cpu section preserved");
            return self.ensure_snapshot();
        }
        self.refresh_section(Section::Cpu)
    }

    /// Re-parses every section, subject to CPU preservation.
    pub fn refresh_all(&mut self) -> &mut SystemSnapshot {
        if self.snapshot.is_none() {
            return self.ensure_snapshot();
        }
        self.refresh_cpu();
        for section in [Section::Memory, Section::Network, Section::User] {
            self.refresh_section(section);
        }
        self.ensure_snapshot()
    }

    /// Drops the whole snapshot tree. The next request rebuilds it.
    pub fn release(&mut self) {
        if self.snapshot.take().is_some() {
            tracing::info!(operation = "release", "snapshot released");
        }
    }
}

fn refresh_into(probe: &dyn HostProbe, snapshot: &mut SystemSnapshot, section: Section) {
    match section {
        Section::Cpu => {
            snapshot.cpu = None;
            snapshot.cpu = absent_on_error(section, probe.cpu());
        }
        Section::Memory => {
            snapshot.memory = None;
            snapshot.memory = absent_on_error(section, probe.memory());
        }
        Section::Network => {
            snapshot.network = None;
            snapshot.network = absent_on_error(section, probe.network());
        }
        Section::User => {
            snapshot.current_user = probe.current_user();
        }
    }
}

fn absent_on_error<T>(section: Section, result: Result<T, ProbeError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(
                error = %e,
                section = %section,
                "section unavailable"
            );
            None
        }
    }
}
