use crate::errors::{EnhancerError, EnhancerResult};
use crate::structs::analysis_request::AnalysisRequest;
use crate::structs::run_outcome::RunOutcome;
use crate::traits::analysis_executor::AnalysisExecutor;
use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::AsyncReadExt;
use tokio::process::Command;
use tokio::sync::watch;

/// Launches exactly one external process per request and captures both
/// output streams to completion, timeout or cancellation.
pub struct ProcessRunner;

impl ProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ProcessRunner {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolves once the cancel flag flips to true; never resolves otherwise.
async fn cancelled(mut cancel: watch::Receiver<bool>) {
    loop {
        if *cancel.borrow() {
            return;
        }
        if cancel.changed().await.is_err() {
            // Sender gone without cancelling: this run can no longer be
            // superseded, so park forever and let the other branches win.
            std::future::pending::<()>().await;
        }
    }
}

#[async_trait]
impl AnalysisExecutor for ProcessRunner {
    async fn execute(
        &self,
        request: &AnalysisRequest,
        timeout: Duration,
        cancel: watch::Receiver<bool>,
    ) -> EnhancerResult<RunOutcome> {
        let program = request.program.to_string_lossy().to_string();

        let mut command = Command::new(&request.program);
        command
            .args(&request.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        log::debug!("🚀 spawning {} {}", program, request.args.join(" "));

        let mut child = command
            .spawn()
            .map_err(|e| EnhancerError::launch(&program, &e.to_string()))?;

        let mut stdout_pipe = child.stdout.take();
        let mut stderr_pipe = child.stderr.take();

        let stdout_task = tokio::spawn(async move {
            let mut buf = String::new();
            if let Some(pipe) = stdout_pipe.as_mut() {
                let _ = pipe.read_to_string(&mut buf).await;
            }
            buf
        });
        let stderr_task = tokio::spawn(async move {
            let mut buf = String::new();
            if let Some(pipe) = stderr_pipe.as_mut() {
                let _ = pipe.read_to_string(&mut buf).await;
            }
            buf
        });

        enum WaitResult {
            Exited(std::process::ExitStatus),
            TimedOut,
            Cancelled,
        }

        let waited = tokio::select! {
            status = child.wait() => {
                WaitResult::Exited(status.map_err(|e| {
                    EnhancerError::system("waiting for analysis process", &e.to_string())
                })?)
            }
            _ = tokio::time::sleep(timeout) => WaitResult::TimedOut,
            _ = cancelled(cancel) => WaitResult::Cancelled,
        };

        match waited {
            WaitResult::TimedOut => {
                log::warn!(
                    "⏱️ analysis of {} exceeded {} ms, terminating",
                    request.target.display(),
                    timeout.as_millis()
                );
                let _ = child.kill().await;
                let _ = child.wait().await;
                Ok(RunOutcome::TimedOut)
            }
            WaitResult::Cancelled => {
                log::debug!(
                    "🛑 analysis of {} superseded, terminating",
                    request.target.display()
                );
                let _ = child.kill().await;
                let _ = child.wait().await;
                Ok(RunOutcome::Cancelled)
            }
            WaitResult::Exited(status) => {
                let stdout = stdout_task.await.unwrap_or_default();
                let stderr = stderr_task.await.unwrap_or_default();

                if status.success() {
                    Ok(RunOutcome::Completed { stdout, stderr })
                } else {
                    Ok(RunOutcome::Failed {
                        exit_code: status.code().unwrap_or(-1),
                        stderr,
                    })
                }
            }
        }
    }
}
