use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{Result, TubeFetchError};

/// Daemon configuration, assembled once at startup and passed by
/// reference into the services that need it.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub api_key: String,
    #[serde(default = "default_max_results")]
    pub max_results: u32,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_max_results() -> u32 {
    10
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    9998
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            max_results: default_max_results(),
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .map_err(|e| TubeFetchError::Config(e.to_string()))?;
        let config: Config =
            serde_json::from_str(&content).map_err(|e| TubeFetchError::Config(e.to_string()))?;
        Ok(config)
    }

    /// A client built from an empty key is unusable for the whole process
    /// lifetime, so this is checked before anything starts.
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(TubeFetchError::Config(
                "missing upstream API key".to_string(),
            ));
        }
        Ok(())
    }
}
