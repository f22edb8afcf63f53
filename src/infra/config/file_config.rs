use std::path::PathBuf;

use serde::Deserialize;

use crate::infra::config::{AppConfig, AutomationConfig, LogConfig, ServerConfig};

#[derive(Debug, Deserialize, Default)]
pub struct FileConfig {
    pub logging: Option<FileLogConfig>,
    pub server: Option<FileServerConfig>,
    pub automation: Option<FileAutomationConfig>,
}

impl FileConfig {
    pub fn merge_into(self, config: &mut AppConfig) {
        if let Some(logging) = self.logging {
            logging.merge_into(&mut config.logging);
        }

        if let Some(server) = self.server {
            server.merge_into(&mut config.server);
        }

        if let Some(automation) = self.automation {
            automation.merge_into(&mut config.automation);
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileLogConfig {
    pub level: Option<String>,
    pub file_dir: Option<PathBuf>,
}

impl FileLogConfig {
    fn merge_into(self, config: &mut LogConfig) {
        if let Some(level) = self.level {
            config.level = level;
        }

        if let Some(file_dir) = self.file_dir {
            config.file_dir = Some(file_dir);
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileServerConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub max_frame_bytes: Option<usize>,
}

impl FileServerConfig {
    fn merge_into(self, config: &mut ServerConfig) {
        if let Some(host) = self.host {
            config.host = host;
        }

        if let Some(port) = self.port {
            config.port = port;
        }

        if let Some(max_frame_bytes) = self.max_frame_bytes {
            config.max_frame_bytes = max_frame_bytes;
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileAutomationConfig {
    pub base_url: Option<String>,
    pub session: Option<String>,
    pub api_key: Option<String>,
}

impl FileAutomationConfig {
    fn merge_into(self, config: &mut AutomationConfig) {
        if let Some(base_url) = self.base_url {
            config.base_url = base_url;
        }

        if let Some(session) = self.session {
            config.session = session;
        }

        if let Some(api_key) = self.api_key.filter(|key| !key.is_empty()) {
            config.api_key = Some(api_key);
        }
    }
}
