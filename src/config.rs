use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::catalog::DEFAULT_SPEED_TEST_TEXT;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    #[serde(default = "default_speed_test_text")]
    pub speed_test_text: String,
    #[serde(default = "default_log_file")]
    pub log_file: String,
}

fn app_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("typetutor")
}
fn default_data_dir() -> String {
    app_data_dir().to_string_lossy().to_string()
}
fn default_speed_test_text() -> String {
    DEFAULT_SPEED_TEST_TEXT.to_string()
}
fn default_log_file() -> String {
    app_data_dir()
        .join("typetutor.log")
        .to_string_lossy()
        .to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            speed_test_text: default_speed_test_text(),
            log_file: default_log_file(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            let mut config: Config = toml::from_str(&content)?;
            config.normalize();
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("typetutor")
            .join("config.toml")
    }

    pub fn data_dir(&self) -> PathBuf {
        PathBuf::from(&self.data_dir)
    }

    pub fn log_file(&self) -> PathBuf {
        PathBuf::from(&self.log_file)
    }

    /// Blank values in a hand-edited config fall back to defaults.
    pub fn normalize(&mut self) {
        if self.data_dir.trim().is_empty() {
            self.data_dir = default_data_dir();
        }
        if self.speed_test_text.is_empty() {
            self.speed_test_text = default_speed_test_text();
        }
        if self.log_file.trim().is_empty() {
            self.log_file = default_log_file();
        }
    }
}
