//! # Example: flaky_with_reflection
//!
//! Runs a task that keeps failing, so the run escalates to reflection once the
//! error threshold is reached. A second run with a healthier task then succeeds.
//!
//! ## Flow
//! ```text
//! run_task("db-primary")
//!   ├─► AttemptStarting{1} → Err("connection refused") → BackoffScheduled{100ms}
//!   ├─► AttemptStarting{2} → Err("timeout")            → BackoffScheduled{200ms}
//!   ├─► AttemptStarting{3} → Err("connection refused")
//!   │     └─ errors == threshold → reflect(errors)     → Reflected{3}
//!   └─► ReflectionExit, state reset
//!
//! run_task("db-replica")
//!   ├─► AttemptStarting{1} → Ok
//!   └─► AttemptSucceeded{1}
//! ```
//!
//! ## Run
//! ```bash
//! RUST_LOG=info cargo run --example flaky_with_reflection --features logging
//! ```

use std::sync::{
    atomic::{AtomicU32, Ordering},
    Arc,
};
use std::time::Duration;

use taskreflex::{
    unique_messages, LogWriter, ReflectionError, RunOutcome, Runner, TaskError, TracingSink,
};
use tracing_subscriber::EnvFilter;

static CALLS: AtomicU32 = AtomicU32::new(0);

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // 1. The primary host is down; the replica answers.
    let mut runner = Runner::builder()
        .task_fn("connect", |host: &'static str| async move {
            let n = CALLS.fetch_add(1, Ordering::Relaxed) + 1;
            if host == "db-replica" {
                return Ok(());
            }
            let reason = if n % 2 == 0 { "timeout" } else { "connection refused" };
            Err(TaskError::new(reason).with_trace(format!("{host}: call #{n}")))
        })
        .max_attempts(5)
        .error_threshold(3)
        .initial_delay(Duration::from_millis(100))
        // 2. Print every event, send error records to the log instead of a file.
        .subscriber(Arc::new(LogWriter::new()))
        .error_sink(Arc::new(TracingSink))
        // 3. Escalation: summarize what went wrong.
        .reflect_fn(|errors: Arc<[TaskError]>| async move {
            let distinct = unique_messages(&errors);
            println!(
                "[reflect] {} failures, {} distinct: {:?}",
                errors.len(),
                distinct.len(),
                distinct
            );
            Ok::<_, ReflectionError>(())
        })
        .build()?;

    let outcome = runner.run_task("db-primary").await;
    println!("[main] primary: {outcome:?}");
    assert!(matches!(outcome, RunOutcome::Reflected { .. }));

    let outcome = runner.run_task("db-replica").await;
    println!("[main] replica: {outcome:?}");
    assert!(outcome.is_success());

    Ok(())
}
