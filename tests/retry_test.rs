//! Integration tests for the retry policy

use std::sync::atomic::{AtomicU32, Ordering};
use std::time::{Duration, Instant};
use test_case::test_case;
use voyant_export::config::RetryConfig;
use voyant_export::core::retry::RetryPolicy;

fn fast_policy(max_attempts: u32) -> RetryPolicy {
    RetryPolicy::new(max_attempts, Duration::from_millis(1), 2.0)
}

#[tokio::test]
async fn test_transient_failures_then_success() {
    let calls = AtomicU32::new(0);
    let counter = &calls;

    let result = fast_policy(5)
        .run("flaky write", move || async move {
            let attempt = counter.fetch_add(1, Ordering::SeqCst) + 1;
            if attempt < 3 {
                Err(format!("transient failure {attempt}"))
            } else {
                Ok(attempt)
            }
        })
        .await;

    assert_eq!(result.unwrap(), 3);
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[test_case(1 ; "single attempt")]
#[test_case(3 ; "three attempts")]
#[tokio::test]
async fn test_gives_up_after_max_attempts(max_attempts: u32) {
    let calls = AtomicU32::new(0);
    let counter = &calls;

    let err = fast_policy(max_attempts)
        .run("always failing", move || async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Err::<(), _>("disk full".to_string())
        })
        .await
        .unwrap_err();

    assert_eq!(err.attempts, max_attempts);
    assert_eq!(err.last_error, "disk full");
    assert_eq!(calls.load(Ordering::SeqCst), max_attempts);
}

#[tokio::test]
async fn test_backoff_waits_between_attempts() {
    let policy = RetryPolicy::new(3, Duration::from_millis(20), 2.0);
    let start = Instant::now();

    let _ = policy
        .run("slow failure", || async { Err::<(), _>("nope") })
        .await;

    // 20ms after the first failure, 40ms after the second
    assert!(start.elapsed() >= Duration::from_millis(60));
}

#[test]
fn test_policy_from_default_config() {
    let policy = RetryPolicy::from_config(&RetryConfig::default());

    assert_eq!(policy.max_attempts(), 3);
    assert_eq!(policy.delay_after(1), Duration::from_secs(1));
    assert_eq!(policy.delay_after(2), Duration::from_secs(2));
    assert_eq!(policy.delay_after(10), Duration::from_secs(30));
}
