use std::sync::Arc;

use crate::{infra::config::AppConfig, usecases::contracts::AutomationClient};

pub struct AppContext {
    pub config: AppConfig,
    pub automation: Arc<dyn AutomationClient>,
}

impl AppContext {
    pub fn new(config: AppConfig, automation: Arc<dyn AutomationClient>) -> Self {
        Self { config, automation }
    }
}
