use std::path::Path;

use crate::error::{RadarError, Result};

/// Host families with a known way to enumerate serial devices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// Linux and Cygwin: `/dev/tty[A-Za-z]*`.
    Linux,
    /// `/dev/tty.*`.
    MacOs,
    /// `COM1` through `COM255`.
    Windows,
}

impl Platform {
    pub fn current() -> Result<Self> {
        Self::from_os(std::env::consts::OS)
    }

    pub fn from_os(os: &str) -> Result<Self> {
        match os {
            "linux" | "cygwin" => Ok(Platform::Linux),
            "macos" => Ok(Platform::MacOs),
            "windows" => Ok(Platform::Windows),
            other => Err(RadarError::UnsupportedPlatform { os: other.to_string() }),
        }
    }

    /// Unprobed device paths for this platform, sorted.
    pub fn candidate_paths(&self) -> Vec<String> {
        match self {
            Platform::Windows => (1..=255).map(|n| format!("COM{n}")).collect(),
            Platform::Linux | Platform::MacOs => self.scan_dir(Path::new("/dev")),
        }
    }

    fn scan_dir(&self, dir: &Path) -> Vec<String> {
        let entries = match std::fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                log::warn!("cannot list {}: {e}", dir.display());
                return Vec::new();
            }
        };
        let mut paths: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| entry.file_name().into_string().ok())
            .filter(|name| self.matches_device_name(name))
            .map(|name| dir.join(name).to_string_lossy().into_owned())
            .collect();
        paths.sort();
        paths
    }

    fn matches_device_name(&self, name: &str) -> bool {
        match self {
            Platform::Linux => name
                .strip_prefix("tty")
                .and_then(|rest| rest.chars().next())
                .is_some_and(|c| c.is_ascii_alphabetic()),
            Platform::MacOs => name.starts_with("tty."),
            Platform::Windows => false,
        }
    }
}

/// Openable serial devices on this host, in enumeration order.
pub fn find_candidate_ports(baud_rate: u32) -> Result<Vec<String>> {
    let platform = Platform::current()?;
    Ok(probe_candidates(platform.candidate_paths(), |path| {
        match serialport::new(path, baud_rate).open() {
            Ok(_port) => true,
            Err(e) => {
                log::debug!("skipping {path}: {e}");
                false
            }
        }
    }))
}

/// Drop Bluetooth entries, then keep whatever `probe` accepts.
pub fn probe_candidates<F>(candidates: Vec<String>, mut probe: F) -> Vec<String>
where
    F: FnMut(&str) -> bool,
{
    candidates
        .into_iter()
        .filter(|path| !path.contains("Bluetooth"))
        .filter(|path| probe(path))
        .collect()
}

pub fn select_port(candidates: Vec<String>) -> Result<String> {
    candidates.into_iter().next().ok_or(RadarError::NoDeviceFound)
}
