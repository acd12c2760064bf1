use crate::errors::EnhancerResult;
use crate::structs::analysis_request::AnalysisRequest;
use crate::structs::run_outcome::RunOutcome;
use async_trait::async_trait;
use std::time::Duration;
use tokio::sync::watch;

/// Seam between the scheduler and whatever actually performs an analysis.
/// The production implementation spawns an external process; tests plug in
/// stubs.
#[async_trait]
pub trait AnalysisExecutor: Send + Sync {
    /// Runs one analysis to completion, timeout or cancellation. `cancel`
    /// flips to `true` when a newer generation supersedes this run; the
    /// implementation should stop promptly and report `RunOutcome::Cancelled`.
    ///
    /// `Err` is reserved for "could not even start" conditions; everything
    /// that happened after a successful start is a `RunOutcome`.
    async fn execute(
        &self,
        request: &AnalysisRequest,
        timeout: Duration,
        cancel: watch::Receiver<bool>,
    ) -> EnhancerResult<RunOutcome>;
}
