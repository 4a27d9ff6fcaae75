//! Server configuration.
//!
//! Layered: built-in defaults, then an optional `sitelens.toml`, then
//! `SITELENS_*` environment variables (double underscore for nesting,
//! e.g. `SITELENS_RATE_LIMIT__LIMIT=10`).

use std::net::SocketAddr;
use std::time::Duration;

use serde::Deserialize;

use sitelens_core::providers::ProbeConfig;
use sitelens_core::workflow::{DEFAULT_WORKFLOW_TIMEOUT, WorkflowConfig};
use sitelens_model::RateLimitRule;

const DEFAULT_CONFIG_FILE: &str = "sitelens.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Wall-clock budget for one whole audit, in seconds.
    pub workflow_timeout_secs: u64,
    /// Per-request timeout for individual probes, in seconds.
    pub probe_timeout_secs: u64,
    pub user_agent: Option<String>,
    pub rate_limit: RateLimitConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RateLimitConfig {
    pub limit: u32,
    pub window_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:3400".parse().unwrap_or_else(|_| {
                SocketAddr::from(([0, 0, 0, 0], 3400))
            }),
            workflow_timeout_secs: DEFAULT_WORKFLOW_TIMEOUT.as_secs(),
            probe_timeout_secs: 10,
            user_agent: None,
            rate_limit: RateLimitConfig::default(),
        }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        let rule = RateLimitRule::default();
        Self {
            limit: rule.limit,
            window_secs: rule.window.as_secs(),
        }
    }
}

impl ServerConfig {
    pub fn load() -> anyhow::Result<Self> {
        let config = config::Config::builder()
            .add_source(
                config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
            )
            .add_source(
                config::Environment::with_prefix("SITELENS")
                    .separator("__"),
            )
            .build()?;
        Ok(config.try_deserialize()?)
    }

    pub fn workflow(&self) -> WorkflowConfig {
        WorkflowConfig {
            timeout: Duration::from_secs(self.workflow_timeout_secs),
        }
    }

    pub fn probes(&self) -> ProbeConfig {
        let mut probe = ProbeConfig {
            request_timeout: Duration::from_secs(self.probe_timeout_secs),
            ..Default::default()
        };
        if let Some(user_agent) = &self.user_agent {
            probe.user_agent = user_agent.clone();
        }
        probe
    }

    pub fn rate_limit_rule(&self) -> RateLimitRule {
        RateLimitRule {
            name: "audit".to_string(),
            limit: self.rate_limit.limit,
            window: Duration::from_secs(self.rate_limit.window_secs),
        }
    }
}
