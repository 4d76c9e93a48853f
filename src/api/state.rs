use std::sync::Arc;

use crate::config::AppConfig;
use crate::provider::DirectionsProvider;

#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn DirectionsProvider>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(provider: Arc<dyn DirectionsProvider>, config: AppConfig) -> Self {
        Self {
            provider,
            config: Arc::new(config),
        }
    }
}
