use std::time::Duration;

use crate::error::{AuditError, Result};

const DEFAULT_USER_AGENT: &str =
    concat!("sitelens/", env!("CARGO_PKG_VERSION"));

/// Shared HTTP settings for the reqwest-backed probes.
#[derive(Debug, Clone)]
pub struct ProbeConfig {
    pub user_agent: String,
    /// Per-request timeout. Coarser than the workflow deadline; the
    /// dispatcher still races every call against the remaining budget.
    pub request_timeout: Duration,
    pub max_redirects: usize,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            request_timeout: Duration::from_secs(10),
            max_redirects: 5,
        }
    }
}

pub(crate) fn build_client(config: &ProbeConfig) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(config.request_timeout)
        .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
        .build()
        .map_err(AuditError::from)
}
