use super::Config;
use crate::error::{Error, Result};
use std::path::Path;
use tokio::fs;

/// Builds a [`Config`] from its layered sources.
pub struct ConfigLoader {
    config: Config,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self {
            config: Config::new(),
        }
    }

    /// Replace the current values with those from a TOML file.
    ///
    /// An explicitly requested file that does not exist is an error.
    pub async fn load_file(&mut self, path: &Path) -> Result<()> {
        if !fs::try_exists(path).await? {
            return Err(Error::Config(format!(
                "config file not found: {}",
                path.display()
            )));
        }

        let content = fs::read_to_string(path).await?;
        self.config = Config::from_toml(&content)?;
        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(())
    }

    pub fn load_env(&mut self) -> Result<()> {
        self.config.merge_env_vars()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn into_config(self) -> Config {
        self.config
    }
}
