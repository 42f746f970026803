use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RadarConfig {
    /// Skip discovery and open this device directly.
    pub port: Option<String>,
    pub baud_rate: u32,
    /// Readings beyond this are stored as 0.0. Also the plot's radial extent.
    pub max_range: f64,
    pub redraw_every_deg: u32,
    pub read_timeout_ms: u64,
    /// 0 disables the idle warning.
    pub idle_warn_secs: u64,
}

impl Default for RadarConfig {
    fn default() -> Self {
        Self {
            port: None,
            baud_rate: 115_200,
            max_range: 100.0,
            redraw_every_deg: 5,
            read_timeout_ms: 50,
            idle_warn_secs: 5,
        }
    }
}

impl RadarConfig {
    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }

    pub fn idle_warn_after(&self) -> Option<Duration> {
        (self.idle_warn_secs > 0).then(|| Duration::from_secs(self.idle_warn_secs))
    }

    pub fn redraw_cadence(&self) -> f64 {
        f64::from(self.redraw_every_deg.max(1))
    }
}
