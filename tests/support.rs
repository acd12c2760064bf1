use async_trait::async_trait;
use enhancer_core::errors::{EnhancerError, EnhancerResult};
use enhancer_core::services::request_builder::RequestBuilder;
use enhancer_core::services::scheduler::{AnalysisEvent, AnalysisScheduler, SchedulerConfig};
use enhancer_core::structs::analysis_request::{AnalysisOptions, AnalysisRequest};
use enhancer_core::structs::config::analysis_config::AnalysisConfig;
use enhancer_core::structs::run_outcome::RunOutcome;
use enhancer_core::traits::analysis_executor::AnalysisExecutor;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::{mpsc, watch};

/// Scripted behavior for one `execute` call of the stub executor.
pub enum Script {
    Complete { stdout: String, delay_ms: u64 },
    Fail { exit_code: i32, stderr: String },
    /// Sleeps; resolves to `TimedOut` if the timeout elapses first, the way
    /// the real runner does.
    Sleep { ms: u64 },
    LaunchError,
}

pub struct StubExecutor {
    scripts: Mutex<VecDeque<Script>>,
    pub invocations: AtomicUsize,
    pub cancellations: AtomicUsize,
    pub models_seen: Mutex<Vec<String>>,
}

impl StubExecutor {
    pub fn new(scripts: Vec<Script>) -> Arc<Self> {
        Arc::new(Self {
            scripts: Mutex::new(scripts.into()),
            invocations: AtomicUsize::new(0),
            cancellations: AtomicUsize::new(0),
            models_seen: Mutex::new(Vec::new()),
        })
    }

    pub fn count(&self) -> usize {
        self.invocations.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AnalysisExecutor for StubExecutor {
    async fn execute(
        &self,
        request: &AnalysisRequest,
        timeout: Duration,
        mut cancel: watch::Receiver<bool>,
    ) -> EnhancerResult<RunOutcome> {
        self.invocations.fetch_add(1, Ordering::SeqCst);
        self.models_seen
            .lock()
            .unwrap()
            .push(request.model.clone());
        assert!(
            request.scratch_path().exists(),
            "scratch artifact must exist while the run is in flight"
        );

        let script = self
            .scripts
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Script::Complete {
                stdout: String::new(),
                delay_ms: 0,
            });

        match script {
            Script::Complete { stdout, delay_ms } => {
                tokio::select! {
                    _ = tokio::time::sleep(Duration::from_millis(delay_ms)) => {
                        Ok(RunOutcome::Completed { stdout, stderr: String::new() })
                    }
                    _ = cancel.changed() => {
                        self.cancellations.fetch_add(1, Ordering::SeqCst);
                        Ok(RunOutcome::Cancelled)
                    }
                }
            }
            Script::Fail { exit_code, stderr } => Ok(RunOutcome::Failed { exit_code, stderr }),
            Script::Sleep { ms } => {
                tokio::select! {
                    _ = tokio::time::sleep(Duration::from_millis(ms)) => {
                        Ok(RunOutcome::Completed { stdout: String::new(), stderr: String::new() })
                    }
                    _ = tokio::time::sleep(timeout) => Ok(RunOutcome::TimedOut),
                    _ = cancel.changed() => {
                        self.cancellations.fetch_add(1, Ordering::SeqCst);
                        Ok(RunOutcome::Cancelled)
                    }
                }
            }
            Script::LaunchError => Err(EnhancerError::launch("stub-analyzer", "not found")),
        }
    }
}

pub struct TestPipeline {
    pub scheduler: AnalysisScheduler,
    pub events: mpsc::UnboundedReceiver<AnalysisEvent>,
    pub scratch_dir: tempfile::TempDir,
}

/// Scheduler wired to a stub executor and an isolated scratch directory.
pub fn pipeline(executor: Arc<StubExecutor>, debounce_ms: u64, timeout_ms: u64) -> TestPipeline {
    let scratch_dir = tempfile::tempdir().unwrap();
    let builder = RequestBuilder::new(
        PathBuf::from("stub-analyzer"),
        vec!["analyze".to_string()],
        vec!["stub-model:latest".to_string()],
        scratch_dir.path().to_path_buf(),
    );
    let config = SchedulerConfig {
        debounce: Duration::from_millis(debounce_ms),
        run_timeout: Duration::from_millis(timeout_ms),
        model: None,
        options: AnalysisOptions::default(),
    };
    let (scheduler, events) =
        AnalysisScheduler::new(config, AnalysisConfig::default(), builder, executor);
    TestPipeline {
        scheduler,
        events,
        scratch_dir,
    }
}

pub fn scratch_entries(dir: &tempfile::TempDir) -> usize {
    std::fs::read_dir(dir.path())
        .map(|entries| entries.count())
        .unwrap_or(0)
}
