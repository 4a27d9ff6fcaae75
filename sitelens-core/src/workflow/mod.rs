//! The audit workflow: schedule providers, run them under a deadline,
//! evaluate the checklist, score it, and assemble the report.

pub mod dispatch;
pub mod evaluate;
pub mod progress;
pub mod report;
pub mod score;

use std::sync::Arc;
use std::time::Duration;

use tracing::info;
use url::Url;

use sitelens_model::{AuditReport, AuditType, CheckItemSpec};

use crate::checklist::{checklist_for, validate_checklist};
use crate::error::Result;
use crate::providers::ProviderSet;
use progress::{LocalSink, ProgressReporter, RemoteSink};

/// Process-wide default budget for one complete workflow run.
pub const DEFAULT_WORKFLOW_TIMEOUT: Duration = Duration::from_secs(25);

#[derive(Debug, Clone)]
pub struct WorkflowConfig {
    /// Wall-clock budget shared by all providers in one run.
    pub timeout: Duration,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_WORKFLOW_TIMEOUT,
        }
    }
}

/// Executes audits against a fixed provider set.
///
/// The workflow owns no per-run state; one instance serves any number
/// of concurrent runs.
#[derive(Debug, Clone)]
pub struct AuditWorkflow {
    providers: ProviderSet,
    config: WorkflowConfig,
}

impl AuditWorkflow {
    pub fn new(providers: ProviderSet) -> Self {
        Self::with_config(providers, WorkflowConfig::default())
    }

    pub fn with_config(
        providers: ProviderSet,
        config: WorkflowConfig,
    ) -> Self {
        Self { providers, config }
    }

    /// Run the built-in checklist for `audit_type` against `url`.
    pub async fn run_audit(
        &self,
        url: &Url,
        audit_type: AuditType,
        local: Option<Arc<dyn LocalSink>>,
        remote: Option<Arc<dyn RemoteSink>>,
    ) -> Result<AuditReport> {
        self.run(url, audit_type, checklist_for(audit_type), local, remote)
            .await
    }

    /// Run an explicit checklist against `url`.
    ///
    /// The checklist is validated up front; a malformed checklist is the
    /// only way this returns an error, provider trouble ends up inside
    /// the report instead.
    #[tracing::instrument(
        skip(self, items, local, remote),
        fields(url = %url, audit_type = %audit_type)
    )]
    pub async fn run(
        &self,
        url: &Url,
        audit_type: AuditType,
        items: &[CheckItemSpec],
        local: Option<Arc<dyn LocalSink>>,
        remote: Option<Arc<dyn RemoteSink>>,
    ) -> Result<AuditReport> {
        validate_checklist(items)?;

        let scheduled = dispatch::scheduled_providers(items);
        let reporter =
            ProgressReporter::new(local, remote, scheduled.len());
        info!(
            providers = scheduled.len(),
            checks = items.len(),
            "starting audit"
        );
        reporter
            .started(&format!("starting {audit_type} audit of {url}"))
            .await;

        let deadline = tokio::time::Instant::now() + self.config.timeout;
        let results = dispatch::run_providers(
            &self.providers,
            url,
            &scheduled,
            deadline,
            &reporter,
        )
        .await;

        let outcomes = evaluate::evaluate_checklist(items, &results);
        let score = score::score_checklist(items, &outcomes);
        reporter
            .completed(&format!("audit complete, score {score}/100"))
            .await;

        let report =
            report::build_report(url, audit_type, &results, outcomes, score);
        info!(score, passed = report.checklist.passed, "audit finished");
        Ok(report)
    }
}
