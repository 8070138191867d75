use std::fs;
use std::path::PathBuf;

use directories::ProjectDirs;
use serde::Deserialize;

/// Snapshot used when neither `--snapshot` nor the config names one.
pub const DEFAULT_SNAPSHOT: &str = "petlovers.json";

#[derive(Debug, Deserialize, Default, PartialEq)]
pub struct Config {
    pub snapshot: Option<PathBuf>,
    pub currency: Option<String>,
}

impl Config {
    /// CLI flag (or env) first, then config, then the working directory.
    pub fn snapshot_path(&self, flag: Option<PathBuf>) -> PathBuf {
        flag.or_else(|| self.snapshot.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SNAPSHOT))
    }
}

pub fn parse_config(data: &str) -> Result<Config, toml::de::Error> {
    toml::from_str(data)
}

pub fn load_config() -> Config {
    let Some(dirs) = ProjectDirs::from("", "", "petlovers") else {
        return Config::default();
    };

    let path = dirs.config_dir().join("config.toml");
    let Ok(data) = fs::read_to_string(&path) else {
        return Config::default();
    };

    match parse_config(&data) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("invalid config at {}: {}", path.display(), e);
            Config::default()
        }
    }
}
