use std::path::{Path, PathBuf};

use radarplot_core::RadarConfig;

pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("radarplot").join("config.json"))
}

/// Load the config file if there is one; anything wrong with it falls back
/// to defaults with a warning.
pub fn load() -> RadarConfig {
    match config_path() {
        Some(path) => load_from(&path),
        None => RadarConfig::default(),
    }
}

pub fn load_from(path: &Path) -> RadarConfig {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            log::debug!("no config at {}, using defaults", path.display());
            return RadarConfig::default();
        }
        Err(e) => {
            log::warn!("cannot read {}: {e}; using defaults", path.display());
            return RadarConfig::default();
        }
    };
    match serde_json::from_str(&text) {
        Ok(cfg) => {
            log::info!("loaded config from {}", path.display());
            cfg
        }
        Err(e) => {
            log::warn!("invalid config {}: {e}; using defaults", path.display());
            RadarConfig::default()
        }
    }
}
