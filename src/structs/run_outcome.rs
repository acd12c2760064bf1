/// Terminal states of one external analysis process. Launch failures are a
/// separate error (`EnhancerError::Launch`): "couldn't even start" is not a
/// run outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Exit code 0; stdout is the report, stderr is diagnostics.
    Completed { stdout: String, stderr: String },
    /// Ran and exited non-zero. Not retried at this layer.
    Failed { exit_code: i32, stderr: String },
    /// Exceeded its time budget and was terminated. Distinct from `Failed`.
    TimedOut,
    /// Superseded by a newer generation and terminated early.
    Cancelled,
}
