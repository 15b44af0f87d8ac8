use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use listing_engine::{MockEndpointSettings, SubmissionSettings};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::logging::LogDestination;

pub const CONFIG_FILENAME: &str = "bazar.ron";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
}

/// Settings read from `bazar.ron`. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub log_destination: LogDestination,
    pub verbose: bool,
    /// Directory holding the persisted sign-in.
    pub state_dir: PathBuf,
    pub mock_latency_ms: u64,
    pub submission_timeout_ms: Option<u64>,
    /// Makes the mock backend refuse every listing, for trying the retry path.
    pub reject_submissions_with: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_destination: LogDestination::File,
            verbose: false,
            state_dir: PathBuf::from("."),
            mock_latency_ms: 1500,
            submission_timeout_ms: None,
            reject_submissions_with: None,
        }
    }
}

impl AppConfig {
    /// Missing file means defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        ron::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn endpoint_settings(&self) -> MockEndpointSettings {
        MockEndpointSettings {
            latency: Duration::from_millis(self.mock_latency_ms),
            reject_with: self.reject_submissions_with.clone(),
        }
    }

    pub fn submission_settings(&self) -> SubmissionSettings {
        SubmissionSettings {
            timeout: self.submission_timeout_ms.map(Duration::from_millis),
        }
    }

    pub fn log_level(&self) -> log::LevelFilter {
        if self.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        }
    }
}
