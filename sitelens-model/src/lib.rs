//! Core data model definitions shared across Sitelens crates.
#![allow(missing_docs)]

pub mod audit;
pub mod checklist;
pub mod error;
pub mod provider;
pub mod rate_limit;
pub mod report;
pub mod status;

// Intentionally curated re-exports for downstream consumers.
pub use audit::AuditType;
pub use checklist::{CheckItemSpec, EvalKind, Verdict};
pub use error::{ModelError, Result as ModelResult};
pub use provider::{
    FailureKind, HttpSnapshot, PageSnapshot, ProviderFailure,
    ProviderOutcome, ProviderKind, ProviderResults, RobotsSnapshot,
    SitemapSnapshot, SpeedSnapshot,
};
pub use rate_limit::RateLimitRule;
pub use report::{
    AuditReport, CheckOutcome, ChecklistSummary, ProviderSummary,
};
pub use status::CheckStatus;
