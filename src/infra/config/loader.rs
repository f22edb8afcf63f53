use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::infra::{
    config::{file_config::FileConfig, AppConfig},
    error::AppError,
};

const DEFAULT_CONFIG_PATH: &str = "config.toml";
const APP_DIR_NAME: &str = "wa-relay";
pub const PORT_ENV: &str = "PORT";

/// Loads config from `path`, else `./config.toml`, else the user config dir.
/// Missing files yield defaults.
pub fn load(path: Option<&Path>) -> Result<AppConfig, AppError> {
    let mut config = AppConfig::default();

    let Some(config_path) = resolve_path(path) else {
        return Ok(config);
    };

    let raw = fs::read_to_string(&config_path).map_err(|source| AppError::ConfigRead {
        path: config_path.clone(),
        source,
    })?;

    let file_config: FileConfig = toml::from_str(&raw).map_err(|source| AppError::ConfigParse {
        path: config_path,
        source,
    })?;

    file_config.merge_into(&mut config);
    Ok(config)
}

/// Applies the `PORT` override; an unparsable value is rejected.
pub fn apply_env_overrides(config: &mut AppConfig, port: Option<String>) -> Result<(), AppError> {
    let Some(raw) = port.filter(|value| !value.trim().is_empty()) else {
        return Ok(());
    };

    config.server.port = raw.trim().parse().map_err(|_| AppError::ConfigEnv {
        name: PORT_ENV,
        value: raw.clone(),
    })?;

    Ok(())
}

fn resolve_path(path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = path {
        return path.exists().then(|| path.to_path_buf());
    }

    let local = PathBuf::from(DEFAULT_CONFIG_PATH);
    if local.exists() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR_NAME).join(DEFAULT_CONFIG_PATH))
        .filter(|candidate| candidate.exists())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn returns_defaults_when_file_is_missing() {
        let config = load(Some(Path::new("./missing-config.toml"))).expect("config must load");

        assert_eq!(config, AppConfig::default());
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn merges_file_values_over_defaults() {
        let dir = tempfile::tempdir().expect("temp dir");
        let config_path = dir.path().join("config.toml");

        fs::write(
            &config_path,
            r#"[logging]
level = "debug"

[server]
port = 8080

[automation]
base_url = "http://waha:3000"
session = "phone"
api_key = "secret"
"#,
        )
        .expect("must write test config");

        let config = load(Some(&config_path)).expect("config must load");

        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.automation.base_url, "http://waha:3000");
        assert_eq!(config.automation.session, "phone");
        assert_eq!(config.automation.api_key.as_deref(), Some("secret"));
    }

    #[test]
    fn reports_parse_errors_with_path() {
        let dir = tempfile::tempdir().expect("temp dir");
        let config_path = dir.path().join("broken.toml");
        fs::write(&config_path, "[server\nport = ").expect("must write test config");

        let err = load(Some(&config_path)).expect_err("broken config must fail");

        assert!(matches!(err, AppError::ConfigParse { .. }));
    }

    #[test]
    fn port_override_wins_over_file() {
        let mut config = AppConfig::default();

        apply_env_overrides(&mut config, Some("4100".to_owned())).expect("port must parse");

        assert_eq!(config.server.port, 4100);
    }

    #[test]
    fn blank_port_override_is_ignored() {
        let mut config = AppConfig::default();

        apply_env_overrides(&mut config, Some("  ".to_owned())).expect("blank is ignored");

        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn invalid_port_override_is_rejected() {
        let mut config = AppConfig::default();

        let err = apply_env_overrides(&mut config, Some("http".to_owned())).expect_err("must fail");

        assert!(matches!(err, AppError::ConfigEnv { name: "PORT", .. }));
    }
}
