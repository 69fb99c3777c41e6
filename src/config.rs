use serde::Deserialize;

/// Config file used when `CONFIG_FILE` is not set.
pub const DEFAULT_CONFIG_FILE: &str = "ubmonitor.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub bus: BusConfig,
    pub monitoring: MonitoringConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BusConfig {
    /// Unix socket the bus listens on. A stale socket file is replaced at startup.
    pub socket_path: String,
    /// Object name the methods are registered under.
    pub object: String,
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            socket_path: "/var/run/ubmonitor.sock".into(),
            object: "ubm".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MonitoringConfig {
    /// Keep CPU topology across full refreshes once it has been read.
    pub preserve_cpu_data: bool,
    pub procfs_root: String,
}

impl Default for MonitoringConfig {
    fn default() -> Self {
        Self {
            preserve_cpu_data: true,
            procfs_root: crate::probe::PROCFS_ROOT.into(),
        }
    }
}

impl AppConfig {
    /// Loads `CONFIG_FILE` (default `ubmonitor.toml`); a missing file means all defaults.
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("CONFIG_FILE").unwrap_or_else(|_| DEFAULT_CONFIG_FILE.into());
        match std::fs::read_to_string(&path) {
            Ok(s) => Self::load_from_str(&s),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %path, "config file not found, using defaults");
                let config = Self::default();
                config.validate()?;
                Ok(config)
            }
            Err(e) => Err(anyhow::anyhow!("reading {}: {}", path, e)),
        }
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            !self.bus.socket_path.is_empty(),
            "bus.socket_path must be non-empty"
        );
        anyhow::ensure!(!self.bus.object.is_empty(), "bus.object must be non-empty");
        anyhow::ensure!(
            !self.bus.object.contains('/'),
            "bus.object must not contain '/', got {}",
            self.bus.object
        );
        anyhow::ensure!(
            self.bus.object != "version",
            "bus.object must not be `version`"
        );
        anyhow::ensure!(
            !self.monitoring.procfs_root.is_empty(),
            "monitoring.procfs_root must be non-empty"
        );
        Ok(())
    }
}
