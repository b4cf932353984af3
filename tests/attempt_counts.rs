//! Invocation counts over random configurations.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use proptest::prelude::*;
use taskreflex::{MemorySink, RunOutcome, Runner, TaskError, TaskFn};

fn run_always_failing(max_attempts: u32, error_threshold: u32, factor: f64) -> (u32, RunOutcome) {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .start_paused(true)
        .build()
        .unwrap();

    rt.block_on(async move {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&calls);
        let mut runner = Runner::builder()
            .task(TaskFn::arc("always-fail", move |()| {
                let counter = Arc::clone(&counter);
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Err::<(), _>(TaskError::new("nope"))
                }
            }))
            .max_attempts(max_attempts)
            .error_threshold(error_threshold)
            .backoff_factor(factor)
            .initial_delay(Duration::from_millis(10))
            .error_sink(Arc::new(MemorySink::new()))
            .build()
            .unwrap();

        let outcome = runner.run_task(()).await;
        (calls.load(Ordering::SeqCst), outcome)
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn invoked_min_of_threshold_and_cap(
        max_attempts in 1u32..10,
        error_threshold in 1u32..12,
        factor in 1.0f64..4.0,
    ) {
        let (calls, outcome) = run_always_failing(max_attempts, error_threshold, factor);

        prop_assert_eq!(calls, max_attempts.min(error_threshold));
        prop_assert_eq!(outcome.errors().len() as u32, calls);
        if error_threshold <= max_attempts {
            prop_assert!(matches!(outcome, RunOutcome::Reflected { .. }), "{:?}", outcome);
        } else {
            prop_assert!(matches!(outcome, RunOutcome::Exhausted { .. }), "{:?}", outcome);
        }
    }
}
