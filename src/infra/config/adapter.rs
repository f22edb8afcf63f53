use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::infra::{
    config::{
        load,
        loader::{apply_env_overrides, PORT_ENV},
        AppConfig,
    },
    contracts::ConfigAdapter,
};

/// Config file plus process environment overrides.
#[derive(Debug, Clone, Default)]
pub struct FileConfigAdapter {
    path: Option<PathBuf>,
    port_override: Option<String>,
}

impl FileConfigAdapter {
    pub fn from_env(path: Option<&Path>) -> Self {
        Self::new(path, std::env::var(PORT_ENV).ok())
    }

    pub fn new(path: Option<&Path>, port_override: Option<String>) -> Self {
        Self {
            path: path.map(Path::to_path_buf),
            port_override,
        }
    }
}

impl ConfigAdapter for FileConfigAdapter {
    fn load(&self) -> Result<AppConfig> {
        let mut config = load(self.path.as_deref())?;
        apply_env_overrides(&mut config, self.port_override.clone())?;
        Ok(config)
    }
}
