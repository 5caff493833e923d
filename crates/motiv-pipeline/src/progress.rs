//! Progress reporting.
//!
//! Notifications are awaited but bounded by a short timeout, and any
//! failure is logged and swallowed: a slow or broken notification
//! channel must never stall or abort a run.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{info, warn};

/// Receives progress updates for one run.
#[async_trait]
pub trait ProgressSink: Send + Sync {
    /// Report that `current` of `total` steps have completed.
    ///
    /// Calls arrive with monotonically non-decreasing `current`.
    async fn notify(&self, current: u32, total: u32) -> anyhow::Result<()>;
}

/// Sink that discards all updates.
pub struct NoopProgress;

#[async_trait]
impl ProgressSink for NoopProgress {
    async fn notify(&self, _current: u32, _total: u32) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Sink that logs updates via tracing.
pub struct LogProgress;

#[async_trait]
impl ProgressSink for LogProgress {
    async fn notify(&self, current: u32, total: u32) -> anyhow::Result<()> {
        info!(current, total, "generation progress");
        Ok(())
    }
}

/// Upper bound on one notification delivery.
pub(crate) const NOTIFY_TIMEOUT: Duration = Duration::from_secs(5);

/// Deliver a progress update without letting the sink affect the run.
pub(crate) async fn notify_bounded(sink: &dyn ProgressSink, current: u32, total: u32) {
    match tokio::time::timeout(NOTIFY_TIMEOUT, sink.notify(current, total)).await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => {
            warn!(current, total, error = %e, "progress notification failed");
        }
        Err(_) => {
            warn!(current, total, "progress notification timed out");
        }
    }
}
