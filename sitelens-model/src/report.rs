use std::collections::BTreeMap;

use crate::audit::AuditType;
use crate::status::CheckStatus;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Evaluated result for one checklist item. Created once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CheckOutcome {
    pub id: String,
    pub category: String,
    pub label: String,
    pub status: CheckStatus,
    #[cfg_attr(
        feature = "serde",
        serde(skip_serializing_if = "Option::is_none")
    )]
    pub detail: Option<String>,
}

/// Compact per-provider summary included in the final report.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ProviderSummary {
    /// "ok" or "failed".
    pub status: String,
    pub details: String,
}

impl ProviderSummary {
    pub fn ok(details: impl Into<String>) -> Self {
        Self {
            status: "ok".to_string(),
            details: details.into(),
        }
    }

    pub fn failed(details: impl Into<String>) -> Self {
        Self {
            status: "failed".to_string(),
            details: details.into(),
        }
    }
}

/// Checklist rollup: counts by status plus the full ordered item list.
///
/// Items preserve checklist declaration order regardless of provider
/// execution order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ChecklistSummary {
    pub total: usize,
    pub passed: usize,
    pub warned: usize,
    pub failed: usize,
    pub errors: usize,
    pub skipped: usize,
    pub manual: usize,
    pub items: Vec<CheckOutcome>,
}

/// Terminal artifact of one audit workflow invocation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AuditReport {
    pub url: String,
    pub audit_type: AuditType,
    /// Weighted score, 0..=100.
    pub score: u8,
    pub summary: String,
    /// Provider wire-name to outcome summary.
    pub results: BTreeMap<String, ProviderSummary>,
    pub checklist: ChecklistSummary,
}
