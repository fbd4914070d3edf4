use super::parse_env;
use std::time::Duration;

pub const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 30;
pub const DEFAULT_RECEIVED_RETENTION_SECS: u64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SweeperConfig {
    /// Time between two sweep cycles.
    pub interval: Duration,
    /// How long a report may stay received before it is purged.
    pub retention: Duration,
}

impl Default for SweeperConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(DEFAULT_SWEEP_INTERVAL_SECS),
            retention: Duration::from_secs(DEFAULT_RECEIVED_RETENTION_SECS),
        }
    }
}

impl SweeperConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_secs(
            parse_env("SWEEP_INTERVAL_SECS", DEFAULT_SWEEP_INTERVAL_SECS),
            parse_env("RECEIVED_RETENTION_SECS", DEFAULT_RECEIVED_RETENTION_SECS),
        )
    }

    pub fn from_secs(interval_secs: u64, retention_secs: u64) -> anyhow::Result<Self> {
        if interval_secs == 0 {
            return Err(anyhow::anyhow!("SWEEP_INTERVAL_SECS must be > 0"));
        }
        if retention_secs == 0 {
            return Err(anyhow::anyhow!("RECEIVED_RETENTION_SECS must be > 0"));
        }

        Ok(Self {
            interval: Duration::from_secs(interval_secs),
            retention: Duration::from_secs(retention_secs),
        })
    }
}
