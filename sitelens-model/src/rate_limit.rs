use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration for a fixed-window rate limiting rule.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RateLimitRule {
    /// Name of the rule for identification.
    pub name: String,
    /// Maximum number of workflow invocations allowed per window.
    pub limit: u32,
    /// Width of the fixed counting window.
    pub window: Duration,
}

impl Default for RateLimitRule {
    fn default() -> Self {
        Self {
            name: "audit".to_string(),
            limit: 30,
            window: Duration::from_secs(60),
        }
    }
}
