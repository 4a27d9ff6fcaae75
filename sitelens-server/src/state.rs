use std::sync::Arc;

use sitelens_core::providers::{ProviderSet, build_provider_set};
use sitelens_core::ratelimit::FixedWindowLimiter;
use sitelens_core::workflow::AuditWorkflow;

use crate::config::ServerConfig;

/// Shared application state, cheap to clone per request.
#[derive(Debug, Clone)]
pub struct AppState {
    pub workflow: Arc<AuditWorkflow>,
    pub limiter: Arc<FixedWindowLimiter>,
}

impl AppState {
    /// Wire the live provider set from configuration.
    pub fn from_config(config: &ServerConfig) -> anyhow::Result<Self> {
        let providers = build_provider_set(&config.probes())?;
        Ok(Self::with_providers(config, providers))
    }

    /// Wire an explicit provider set. Entry point for tests.
    pub fn with_providers(
        config: &ServerConfig,
        providers: ProviderSet,
    ) -> Self {
        Self {
            workflow: Arc::new(AuditWorkflow::with_config(
                providers,
                config.workflow(),
            )),
            limiter: Arc::new(FixedWindowLimiter::new(
                config.rate_limit_rule(),
            )),
        }
    }
}
