use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::adapters::PcapSettings;
use crate::domain::DEFAULT_REFRESH_PERIOD;

pub const APP_NAME: &str = "conlister";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Device to capture on when none is given on the command line
    pub device_index: Option<usize>,
    pub refresh_interval_ms: u64,
    pub snaplen: i32,
    pub promiscuous: bool,
    pub read_timeout_ms: i32,
}

impl Default for AppConfig {
    fn default() -> Self {
        let pcap = PcapSettings::default();
        Self {
            device_index: None,
            refresh_interval_ms: DEFAULT_REFRESH_PERIOD.as_millis() as u64,
            snaplen: pcap.snaplen,
            promiscuous: pcap.promiscuous,
            read_timeout_ms: pcap.read_timeout_ms,
        }
    }
}

impl AppConfig {
    /// Load from `path`, or from the platform config directory when absent.
    /// A missing file is created with the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, confy::ConfyError> {
        match path {
            Some(path) => confy::load_path(path),
            None => confy::load(APP_NAME, None),
        }
    }

    pub fn refresh_period(&self) -> Duration {
        Duration::from_millis(self.refresh_interval_ms.max(1))
    }

    pub fn pcap_settings(&self) -> PcapSettings {
        PcapSettings {
            snaplen: self.snaplen,
            promiscuous: self.promiscuous,
            read_timeout_ms: self.read_timeout_ms,
        }
    }
}
