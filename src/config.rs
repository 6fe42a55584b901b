use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::{
    app_dirs::AppDirs,
    difficulty::{DifficultyLevel, DifficultyProfile},
    error::Result,
    progress::ProgressMode,
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub difficulty: DifficultyLevel,
    /// Label of the last practiced catalog phrase
    pub phrase: Option<String>,
    pub probabilities: DifficultyProfile,
    pub suffix_mutation: bool,
    pub processing_delay_ms: u64,
    pub progress: ProgressMode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            difficulty: DifficultyLevel::Easy,
            phrase: None,
            probabilities: DifficultyProfile::default(),
            suffix_mutation: true,
            processing_delay_ms: 2000,
            progress: ProgressMode::Weekly,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        self.probabilities.validate()
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> std::io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    pub fn new() -> Self {
        Self {
            path: AppDirs::config_path(),
        }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        let Ok(bytes) = fs::read(&self.path) else {
            return Config::default();
        };

        match serde_json::from_slice::<Config>(&bytes) {
            Ok(cfg) => {
                log::debug!("loaded config from {}", self.path.display());
                cfg
            }
            Err(e) => {
                log::warn!("ignoring unreadable config {}: {e}", self.path.display());
                Config::default()
            }
        }
    }

    fn save(&self, cfg: &Config) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg).map_err(std::io::Error::other)?;
        fs::write(&self.path, data)?;
        log::debug!("saved config to {}", self.path.display());
        Ok(())
    }
}
