use anyhow::{anyhow, Result};
use config::Config;
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Default file name for the store inside the data directory.
pub const DEFAULT_STORE_FILE: &str = "events.db";

#[derive(Debug, Clone, Serialize)]
pub struct StashConfig {
    /// Path to the directory holding the store file
    pub data_dir: String,

    /// File name of the store inside `data_dir`
    pub store_file: String,
}

const EMPTY_CONFIG: &str = r#"### eventstash configuration file

### directory for the local event store
# data_dir = "~/.eventstash"

### file name of the store inside data_dir
# store_file = "events.db"
"#;

impl Default for StashConfig {
    fn default() -> Self {
        let home_dir = dirs::home_dir()
            .map(|h| h.to_string_lossy().to_string())
            .unwrap_or_else(|| ".".to_string());

        Self {
            data_dir: format!("{}/.eventstash", home_dir),
            store_file: DEFAULT_STORE_FILE.to_string(),
        }
    }
}

impl StashConfig {
    /// Create and initialize a new configuration
    ///
    /// Settings are read from a TOML file (created with a commented template
    /// when absent) and can be overridden through `EVENTSTASH_*` environment
    /// variables, e.g. `EVENTSTASH_DATA_DIR=/tmp/stash`.
    pub fn new(path: &Option<String>) -> Result<StashConfig> {
        let mut builder = Config::builder();

        // By default use $HOME/.eventstash/eventstash.toml as the configuration file path
        let home_dir = dirs::home_dir()
            .ok_or_else(|| anyhow!("Could not find home directory"))?
            .to_str()
            .ok_or_else(|| anyhow!("Could not convert home directory path to string"))?
            .to_owned();

        let stash_dir = format!("{}/.eventstash", home_dir.as_str());

        // Add in toml configuration file
        match path {
            Some(p) => {
                let path = Path::new(p.as_str());
                if path.exists() {
                    let path_str = path
                        .to_str()
                        .ok_or_else(|| anyhow!("Could not convert path to string"))?;
                    builder = builder.add_source(config::File::with_name(path_str));
                } else {
                    std::fs::write(p.as_str(), EMPTY_CONFIG)
                        .map_err(|e| anyhow!("Unable to create config file: {}", e))?;
                }
            }
            None => {
                std::fs::create_dir_all(stash_dir.as_str())
                    .map_err(|e| anyhow!("Unable to create eventstash directory: {}", e))?;
                let p = format!("{}/eventstash.toml", stash_dir.as_str());
                if Path::new(p.as_str()).exists() {
                    builder = builder.add_source(config::File::with_name(p.as_str()));
                } else {
                    std::fs::write(p.as_str(), EMPTY_CONFIG).map_err(|e| {
                        anyhow!("Unable to create config file {}: {}", p.as_str(), e)
                    })?;
                }
            }
        }

        // Add in settings from the environment (with a prefix of EVENTSTASH)
        // E.g., `EVENTSTASH_DATA_DIR=~/.eventstash` would set the data directory
        builder = builder.add_source(config::Environment::with_prefix("EVENTSTASH"));

        let settings = builder
            .build()
            .map_err(|e| anyhow!("Failed to build configuration: {}", e))?;

        let config = settings
            .try_deserialize::<HashMap<String, String>>()
            .map_err(|e| anyhow!("Failed to deserialize configuration: {}", e))?;

        // Parse data directory
        let data_dir = match config.get("data_dir") {
            Some(p) => {
                let path = Path::new(p);
                path.to_str()
                    .ok_or_else(|| anyhow!("Could not convert data_dir path to string"))?
                    .to_string()
            }
            None => {
                let dir = format!("{}/.eventstash", home_dir.as_str());
                std::fs::create_dir_all(dir.as_str())
                    .map_err(|e| anyhow!("Unable to create data directory: {}", e))?;
                dir
            }
        };

        let store_file = config
            .get("store_file")
            .cloned()
            .unwrap_or_else(|| DEFAULT_STORE_FILE.to_string());

        Ok(StashConfig {
            data_dir,
            store_file,
        })
    }

    /// Get the path to the store file
    pub fn store_path(&self) -> PathBuf {
        let data_dir = self.data_dir.trim_end_matches('/');
        PathBuf::from(format!("{}/{}", data_dir, self.store_file))
    }

    /// Ensure the data directory exists
    pub fn ensure_data_dir(&self) -> Result<()> {
        std::fs::create_dir_all(&self.data_dir)
            .map_err(|e| anyhow!("Failed to create data directory '{}': {}", self.data_dir, e))
    }
}
