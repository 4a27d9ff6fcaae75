//! Progress reporting for a running workflow.
//!
//! A run emits exactly one started event, one event per scheduled
//! provider in execution order, and one completed event. Sinks are
//! optional; the reporter is a no-op when none are attached.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::error::Result;

/// In-process progress consumer. Must not block.
pub trait LocalSink: Send + Sync {
    fn notify(&self, message: &str);
}

/// Out-of-process progress consumer (webhook, websocket, queue).
#[async_trait]
pub trait RemoteSink: Send + Sync {
    async fn notify(
        &self,
        progress: usize,
        total: usize,
        message: &str,
    ) -> Result<()>;
}

/// Fans progress out to the attached sinks.
///
/// Remote delivery failures are logged and swallowed; a progress outage
/// never fails the audit itself.
pub struct ProgressReporter {
    local: Option<Arc<dyn LocalSink>>,
    remote: Option<Arc<dyn RemoteSink>>,
    /// Number of scheduled providers for this run.
    total: usize,
}

impl ProgressReporter {
    pub fn new(
        local: Option<Arc<dyn LocalSink>>,
        remote: Option<Arc<dyn RemoteSink>>,
        total: usize,
    ) -> Self {
        Self {
            local,
            remote,
            total,
        }
    }

    pub async fn started(&self, message: &str) {
        self.emit(0, message).await;
    }

    /// `index` is the provider's position in the execution order.
    pub async fn provider_done(&self, index: usize, message: &str) {
        self.emit(index + 1, message).await;
    }

    pub async fn completed(&self, message: &str) {
        self.emit(self.total + 1, message).await;
    }

    async fn emit(&self, progress: usize, message: &str) {
        if let Some(local) = &self.local {
            local.notify(message);
        }
        if let Some(remote) = &self.remote
            && let Err(error) =
                remote.notify(progress, self.total, message).await
        {
            warn!(%error, progress, "progress notification failed");
        }
    }
}

/// Local sink that forwards progress lines to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLocalSink;

impl LocalSink for TracingLocalSink {
    fn notify(&self, message: &str) {
        info!(target: "sitelens::progress", "{message}");
    }
}
