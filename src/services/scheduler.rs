use crate::errors::{EnhancerError, EnhancerResult};
use crate::services::report_parser;
use crate::services::request_builder::RequestBuilder;
use crate::services::validator::{self, ValidationOutcome};
use crate::structs::analysis_request::AnalysisOptions;
use crate::structs::analysis_result::AnalysisResult;
use crate::structs::config::analysis_config::AnalysisConfig;
use crate::traits::analysis_executor::AnalysisExecutor;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

/// Scheduling knobs, carried explicitly so the pipeline is testable without
/// a live configuration store.
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    pub debounce: Duration,
    pub run_timeout: Duration,
    pub model: Option<String>,
    pub options: AnalysisOptions,
}

/// What the scheduler hands to the presentation layer. Superseded runs emit
/// nothing: their results are dropped silently by policy.
#[derive(Debug)]
pub enum AnalysisEvent {
    Completed {
        target: PathBuf,
        generation: u64,
        result: AnalysisResult,
    },
    Failed {
        target: PathBuf,
        generation: u64,
        error: EnhancerError,
    },
}

/// Per-target bookkeeping. `generation` is bumped when a run starts; a
/// completed run's result is surfaced only if its captured generation still
/// equals the latest one (last-writer-wins, no merging).
struct TargetState {
    generation: u64,
    pending_epoch: u64,
    pending: Option<JoinHandle<()>>,
    cancel: Option<watch::Sender<bool>>,
    content: Arc<Vec<u8>>,
}

impl TargetState {
    fn new() -> Self {
        Self {
            generation: 0,
            pending_epoch: 0,
            pending: None,
            cancel: None,
            content: Arc::new(Vec::new()),
        }
    }
}

/// Coalesces a burst of edit events per target into a single analysis run
/// and guarantees a stale result never overwrites a newer one.
///
/// State machine per target: Idle → Pending(timer) → Running → Idle.
/// Edits (re)arm the debounce timer from any state; `analyze_now` bypasses
/// the delay. When a new generation starts, the superseded in-flight run is
/// told to cancel and its process terminated; the generation check at
/// completion remains the authoritative guard either way.
pub struct AnalysisScheduler {
    inner: Arc<SchedulerInner>,
}

struct SchedulerInner {
    config: SchedulerConfig,
    analysis: AnalysisConfig,
    builder: RequestBuilder,
    executor: Arc<dyn AnalysisExecutor>,
    targets: Mutex<HashMap<PathBuf, TargetState>>,
    events: mpsc::UnboundedSender<AnalysisEvent>,
}

impl AnalysisScheduler {
    pub fn new(
        config: SchedulerConfig,
        analysis: AnalysisConfig,
        builder: RequestBuilder,
        executor: Arc<dyn AnalysisExecutor>,
    ) -> (Self, mpsc::UnboundedReceiver<AnalysisEvent>) {
        let (events, receiver) = mpsc::unbounded_channel();
        let scheduler = Self {
            inner: Arc::new(SchedulerInner {
                config,
                analysis,
                builder,
                executor,
                targets: Mutex::new(HashMap::new()),
                events,
            }),
        };
        (scheduler, receiver)
    }

    /// An edit arrived: (re)arm the target's debounce timer. If a run is in
    /// flight it keeps going; the timer schedules the follow-up pass, so the
    /// edit is never lost.
    pub fn notify_edit(&self, target: &Path, content: Vec<u8>) {
        let inner = Arc::clone(&self.inner);
        let target = target.to_path_buf();

        let mut targets = inner.targets.lock().expect("scheduler state poisoned");
        let state = targets
            .entry(target.clone())
            .or_insert_with(TargetState::new);

        state.content = Arc::new(content);
        if let Some(timer) = state.pending.take() {
            timer.abort();
        }
        state.pending_epoch += 1;
        let epoch = state.pending_epoch;
        let debounce = inner.config.debounce;

        let timer_inner = Arc::clone(&inner);
        let timer_target = target.clone();
        state.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(debounce).await;
            SchedulerInner::timer_fired(timer_inner, timer_target, epoch);
        }));
    }

    /// Save or explicit "analyze now": skip the quiet period and start a
    /// fresh generation immediately, from any state.
    pub fn analyze_now(&self, target: &Path, content: Vec<u8>) {
        let inner = Arc::clone(&self.inner);
        let target = target.to_path_buf();

        {
            let mut targets = inner.targets.lock().expect("scheduler state poisoned");
            let state = targets
                .entry(target.clone())
                .or_insert_with(TargetState::new);
            state.content = Arc::new(content);
            if let Some(timer) = state.pending.take() {
                timer.abort();
            }
            state.pending_epoch += 1;
        }

        SchedulerInner::start_run(inner, target);
    }

    /// Latest started generation for a target; 0 when none ran yet.
    pub fn current_generation(&self, target: &Path) -> u64 {
        self.inner
            .targets
            .lock()
            .expect("scheduler state poisoned")
            .get(target)
            .map(|s| s.generation)
            .unwrap_or(0)
    }
}

impl SchedulerInner {
    fn timer_fired(inner: Arc<Self>, target: PathBuf, epoch: u64) {
        {
            let mut targets = inner.targets.lock().expect("scheduler state poisoned");
            let Some(state) = targets.get_mut(&target) else {
                return;
            };
            // A newer edit or an analyze_now re-armed things after this
            // timer was snapshot; stand down.
            if state.pending_epoch != epoch {
                return;
            }
            state.pending = None;
        }
        Self::start_run(inner, target);
    }

    fn start_run(inner: Arc<Self>, target: PathBuf) {
        let (generation, content, cancel_rx) = {
            let mut targets = inner.targets.lock().expect("scheduler state poisoned");
            let state = targets
                .entry(target.clone())
                .or_insert_with(TargetState::new);

            state.generation += 1;

            // The previous run, if any, can no longer win: tell it to stop.
            if let Some(previous) = state.cancel.take() {
                let _ = previous.send(true);
            }

            let (cancel_tx, cancel_rx) = watch::channel(false);
            state.cancel = Some(cancel_tx);

            (state.generation, Arc::clone(&state.content), cancel_rx)
        };

        // Fail fast: validation and request building happen before any
        // process is spawned.
        let outcome = validator::validate(&target, &content, &inner.analysis);
        if let ValidationOutcome::Rejected(reason) = outcome {
            inner.emit_failure(
                &target,
                generation,
                EnhancerError::validation(&target.to_string_lossy(), reason),
            );
            return;
        }

        let request = match inner.builder.build(
            &target,
            &content,
            inner.config.model.as_deref(),
            inner.config.options,
        ) {
            Ok(request) => request,
            Err(e) => {
                inner.emit_failure(&target, generation, e);
                return;
            }
        };

        let run_inner = Arc::clone(&inner);
        tokio::spawn(async move {
            let timeout = run_inner.config.run_timeout;
            let outcome = run_inner.executor.execute(&request, timeout, cancel_rx).await;

            // Request (and with it the scratch artifact) dies here, on every
            // path out of the run.
            let target = request.target.clone();
            drop(request);

            let is_latest = {
                let mut targets = run_inner.targets.lock().expect("scheduler state poisoned");
                match targets.get_mut(&target) {
                    Some(state) if state.generation == generation => {
                        state.cancel = None;
                        true
                    }
                    _ => false,
                }
            };

            if !is_latest {
                log::debug!(
                    "🗑️ discarding superseded result for {} (generation {})",
                    target.display(),
                    generation
                );
                return;
            }

            run_inner.finish_run(&target, generation, outcome, timeout);
        });
    }

    fn finish_run(
        &self,
        target: &Path,
        generation: u64,
        outcome: EnhancerResult<crate::structs::run_outcome::RunOutcome>,
        timeout: Duration,
    ) {
        use crate::structs::run_outcome::RunOutcome;

        match outcome {
            Ok(RunOutcome::Completed { stdout, .. }) => {
                let result = report_parser::parse(&stdout, &target.to_string_lossy());
                let _ = self.events.send(AnalysisEvent::Completed {
                    target: target.to_path_buf(),
                    generation,
                    result,
                });
            }
            Ok(RunOutcome::Failed { exit_code, stderr }) => {
                self.emit_failure(
                    target,
                    generation,
                    EnhancerError::analysis_failed(&target.to_string_lossy(), exit_code, &stderr),
                );
            }
            Ok(RunOutcome::TimedOut) => {
                self.emit_failure(
                    target,
                    generation,
                    EnhancerError::timeout(&target.to_string_lossy(), timeout.as_millis() as u64),
                );
            }
            Ok(RunOutcome::Cancelled) => {
                // Only reachable in a shutdown race; superseded runs already
                // failed the generation check. Nothing to report.
                log::debug!("🛑 cancelled run for {} reached completion", target.display());
            }
            Err(e) => {
                self.emit_failure(target, generation, e);
            }
        }
    }

    fn emit_failure(&self, target: &Path, generation: u64, error: EnhancerError) {
        let _ = self.events.send(AnalysisEvent::Failed {
            target: target.to_path_buf(),
            generation,
            error,
        });
    }
}
