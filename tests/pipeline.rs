use crate::support::{pipeline, scratch_entries, Script, StubExecutor};
use enhancer_core::enums::severity::Severity;
use enhancer_core::errors::EnhancerError;
use enhancer_core::services::scheduler::AnalysisEvent;
use std::path::Path;

/// A trivial python file travels the whole pipeline (validator, builder,
/// runner stub, parser) and comes out as one low finding plus metrics.
#[tokio::test(start_paused = true)]
async fn trivial_file_produces_one_low_finding() {
    let executor = StubExecutor::new(vec![Script::Complete {
        stdout: "total_lines: 1\ncode_lines: 1\n[LOW] trivial statement".to_string(),
        delay_ms: 1,
    }]);
    let mut p = pipeline(std::sync::Arc::clone(&executor), 1000, 30_000);

    p.scheduler
        .analyze_now(Path::new("a.py"), b"print('hi')\n".to_vec());

    let event = p.events.recv().await.expect("completion event");
    let result = match event {
        AnalysisEvent::Completed { result, .. } => result,
        other => panic!("expected Completed, got {:?}", other),
    };

    assert_eq!(result.findings.len(), 1);
    assert_eq!(result.findings[0].severity, Severity::Low);
    assert_eq!(result.findings[0].message, "trivial statement");
    assert_eq!(result.metrics.total_lines, 1);
    assert_eq!(result.metrics.code_lines, 1);
    assert_eq!(result.metrics.comment_lines, 0);
    assert_eq!(result.metrics.blank_lines, 0);
    assert_eq!(result.metrics.docstring_lines, 0);

    // The default model (first in the sequence) was requested.
    assert_eq!(
        executor.models_seen.lock().unwrap().as_slice(),
        &["stub-model:latest".to_string()]
    );
}

/// A runner that sleeps past the 100 ms budget reports Timeout, not
/// AnalysisFailed, and nothing is parsed.
#[tokio::test(start_paused = true)]
async fn slow_run_times_out_instead_of_failing() {
    let executor = StubExecutor::new(vec![Script::Sleep { ms: 10_000 }]);
    let mut p = pipeline(std::sync::Arc::clone(&executor), 1000, 100);

    p.scheduler
        .analyze_now(Path::new("a.py"), b"print('hi')\n".to_vec());

    let event = p.events.recv().await.expect("failure event");
    match event {
        AnalysisEvent::Failed { error, .. } => {
            assert!(matches!(error, EnhancerError::Timeout { .. }), "{:?}", error);
        }
        AnalysisEvent::Completed { .. } => panic!("timeout must not produce a result"),
    }
}

/// Non-zero exit is AnalysisFailed and carries the captured stderr.
#[tokio::test(start_paused = true)]
async fn nonzero_exit_surfaces_stderr() {
    let executor = StubExecutor::new(vec![Script::Fail {
        exit_code: 2,
        stderr: "model not found".to_string(),
    }]);
    let mut p = pipeline(std::sync::Arc::clone(&executor), 1000, 30_000);

    p.scheduler
        .analyze_now(Path::new("a.py"), b"print('hi')\n".to_vec());

    let event = p.events.recv().await.expect("failure event");
    match event {
        AnalysisEvent::Failed { error, .. } => match error {
            EnhancerError::AnalysisFailed {
                exit_code, stderr, ..
            } => {
                assert_eq!(exit_code, 2);
                assert_eq!(stderr, "model not found");
            }
            other => panic!("expected AnalysisFailed, got {:?}", other),
        },
        other => panic!("expected Failed, got {:?}", other),
    }
}

/// No scratch artifact survives any outcome: success, failure, timeout or
/// launch error.
#[tokio::test(start_paused = true)]
async fn scratch_artifacts_are_cleaned_up_on_every_outcome() {
    let executor = StubExecutor::new(vec![
        Script::Complete {
            stdout: "total_lines: 1\n".to_string(),
            delay_ms: 1,
        },
        Script::Fail {
            exit_code: 1,
            stderr: String::new(),
        },
        Script::Sleep { ms: 60_000 },
        Script::LaunchError,
    ]);
    let mut p = pipeline(std::sync::Arc::clone(&executor), 1000, 100);
    let target = Path::new("a.py");

    for _ in 0..4 {
        p.scheduler.analyze_now(target, b"print('hi')\n".to_vec());
        let _ = p.events.recv().await.expect("event per run");
        assert_eq!(
            scratch_entries(&p.scratch_dir),
            0,
            "scratch dir must be empty after each outcome"
        );
    }

    assert_eq!(executor.count(), 4);
}

/// Validation rejections surface immediately; no process runs, no scratch
/// file is ever written.
#[tokio::test(start_paused = true)]
async fn invalid_targets_fail_fast_without_spawning() {
    let executor = StubExecutor::new(vec![]);
    let mut p = pipeline(std::sync::Arc::clone(&executor), 1000, 30_000);

    p.scheduler
        .analyze_now(Path::new("binary.dat"), vec![0u8, 1, 2]);

    let event = p.events.recv().await.expect("failure event");
    match event {
        AnalysisEvent::Failed { error, .. } => {
            assert!(matches!(error, EnhancerError::Validation { .. }));
        }
        other => panic!("expected Failed, got {:?}", other),
    }
    assert_eq!(executor.count(), 0);
    assert_eq!(scratch_entries(&p.scratch_dir), 0);
}
