use std::{path::Path, sync::Arc};

use tracing_appender::non_blocking::WorkerGuard;

use crate::{
    automation::WahaClient,
    infra::{self, config::FileConfigAdapter, contracts::ConfigAdapter, error::AppError},
    usecases::context::AppContext,
};

/// Loads config, installs logging and builds the automation client.
///
/// The returned guard keeps the file log writer alive.
pub fn bootstrap(config_path: Option<&Path>) -> Result<(AppContext, Option<WorkerGuard>), AppError> {
    let context = build_context(&FileConfigAdapter::from_env(config_path))?;
    let guard = infra::logging::init(&context.config.logging)?;

    tracing::info!(
        base_url = %context.config.automation.base_url,
        session = %context.config.automation.session,
        "automation client configured"
    );

    Ok((context, guard))
}

fn build_context(config_adapter: &dyn ConfigAdapter) -> Result<AppContext, AppError> {
    let config = config_adapter.load().map_err(AppError::Other)?;
    let automation = WahaClient::new(&config.automation)?;

    Ok(AppContext::new(config, Arc::new(automation)))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::infra::config::AppConfig;

    #[test]
    fn builds_context_with_default_config_when_file_is_missing() {
        let adapter = FileConfigAdapter::new(Some(Path::new("./missing-config.toml")), None);

        let context = build_context(&adapter).expect("context should build from defaults");

        assert_eq!(context.config, AppConfig::default());
    }

    #[test]
    fn port_override_reaches_server_config() {
        let adapter =
            FileConfigAdapter::new(Some(Path::new("./missing-config.toml")), Some("8088".to_owned()));

        let context = build_context(&adapter).expect("context should build");

        assert_eq!(context.config.server.port, 8088);
    }

    #[test]
    fn invalid_automation_url_fails_bootstrap() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "[automation]\nbase_url = \"::not a url::\"").expect("write config");
        let adapter = FileConfigAdapter::new(Some(file.path()), None);

        assert!(build_context(&adapter).is_err());
    }
}
