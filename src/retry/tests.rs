//! Integration tests for the drivers.

use super::*;
use crate::schedule::prelude::*;
use crate::testing::ManualContext;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

fn manual() -> Driver<ManualContext> {
    Driver::new().with_context(ManualContext::new())
}

#[tokio::test]
async fn test_retry_succeeds_on_third_attempt() {
    let attempts = Arc::new(AtomicU32::new(0));
    let driver = manual();

    let result = driver
        .retry(&spaced(Duration::from_millis(1)).zip_left(recurs(5)), || {
            let attempts = attempts.clone();
            async move {
                let n = attempts.fetch_add(1, Ordering::SeqCst);
                if n < 2 {
                    Err("transient failure")
                } else {
                    Ok("success")
                }
            }
        })
        .await;

    assert_eq!(result, Ok("success"));
    assert_eq!(attempts.load(Ordering::SeqCst), 3);
    assert_eq!(driver.context().sleeps(), vec![Duration::from_millis(1); 2]);
}

#[tokio::test]
async fn test_retry_exhausted_returns_final_error() {
    let mut attempts = 0;
    let result = manual()
        .retry(&recurs(3), || {
            attempts += 1;
            let n = attempts;
            async move { Err::<(), _>(format!("failure {}", n)) }
        })
        .await;

    // 1 initial + 3 retries
    assert_eq!(attempts, 4);
    assert_eq!(result, Err(ScheduleError::Failed("failure 4".to_string())));
}

#[tokio::test]
async fn test_retry_never_consults_schedule_after_success() {
    let updates = Arc::new(AtomicU32::new(0));
    let schedule = {
        let updates = updates.clone();
        forever::<&str>().log_input(move |_| {
            updates.fetch_add(1, Ordering::SeqCst);
        })
    };

    let result = manual().retry(&schedule, || async { Ok::<_, &str>(7) }).await;

    assert_eq!(result, Ok(7));
    assert_eq!(updates.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_retry_feeds_errors_to_the_schedule() {
    #[derive(Debug, Clone, PartialEq)]
    enum TestError {
        Transient,
        Permanent,
    }

    let mut attempts = 0;
    let schedule = forever::<TestError>().while_input(|e| *e == TestError::Transient);

    let result = manual()
        .retry(&schedule, || {
            attempts += 1;
            let n = attempts;
            async move {
                if n < 3 {
                    Err::<(), _>(TestError::Transient)
                } else {
                    Err(TestError::Permanent)
                }
            }
        })
        .await;

    assert_eq!(attempts, 3);
    assert_eq!(result, Err(ScheduleError::Failed(TestError::Permanent)));
}

#[tokio::test]
async fn test_retry_or_else_receives_error_and_final_output() {
    let result = manual()
        .retry_or_else(
            &recurs(2),
            || async { Err::<String, _>("down") },
            |error, output| Ok(format!("{} after {}", error, output)),
        )
        .await;

    assert_eq!(result, Ok("down after 2".to_string()));
}

#[tokio::test]
async fn test_retry_or_else_error_is_surfaced() {
    let result = manual()
        .retry_or_else(
            &recurs(0),
            || async { Err::<u8, _>("first") },
            |_, _| Err("fallback failed"),
        )
        .await;

    assert_eq!(result, Err(ScheduleError::Failed("fallback failed")));
}

#[tokio::test]
async fn test_retry_or_else_either_tags_sides() {
    let driver = manual();

    let fallback = driver
        .retry_or_else_either(
            &recurs(1),
            || async { Err::<u8, _>("down") },
            |_, attempts| Ok(attempts.to_string()),
        )
        .await;
    assert_eq!(fallback, Ok(Either::Left("1".to_string())));

    let success = driver
        .retry_or_else_either(
            &recurs(1),
            || async { Ok::<u8, &str>(9) },
            |_, attempts| Ok(attempts.to_string()),
        )
        .await;
    assert_eq!(success, Ok(Either::Right(9)));
}

#[tokio::test]
async fn test_repeat_until_schedule_stops() {
    let mut calls = 0;
    let result = manual()
        .repeat(&do_while(|n: &i32| *n < 3), || {
            calls += 1;
            let n = calls;
            async move { Ok::<_, ()>(n) }
        })
        .await;

    assert_eq!(calls, 3);
    assert_eq!(result, Ok(3));
}

#[tokio::test]
async fn test_repeat_stops_on_first_error() {
    let mut calls = 0;
    let result = manual()
        .repeat(&forever(), || {
            calls += 1;
            let n = calls;
            async move {
                if n == 4 {
                    Err("broken")
                } else {
                    Ok(n)
                }
            }
        })
        .await;

    assert_eq!(calls, 4);
    assert_eq!(result, Err(ScheduleError::Failed("broken")));
}

#[tokio::test]
async fn test_repeat_or_else_receives_last_output() {
    let mut calls = 0;
    let result = manual()
        .repeat_or_else(
            &forever(),
            || {
                calls += 1;
                let n = calls;
                async move {
                    if n < 3 {
                        Ok(())
                    } else {
                        Err("stop")
                    }
                }
            },
            |_, last| Ok(last.unwrap_or(0) * 100),
        )
        .await;

    assert_eq!(result, Ok(200));
}

#[tokio::test]
async fn test_repeat_or_else_without_prior_output() {
    let result = manual()
        .repeat_or_else_either(
            &forever::<()>(),
            || async { Err::<(), _>("immediately") },
            |error, last| Ok((error, last)),
        )
        .await;

    assert_eq!(result, Ok(Either::Left(("immediately", None))));
}

#[tokio::test]
async fn test_repeat_sleeps_whole_milliseconds() {
    let driver = manual();
    let schedule = recurs::<()>(2).map_delay_nanos(|_| 1_999_999.0);

    let result = driver.repeat(&schedule, || async { Ok::<_, ()>(()) }).await;

    assert_eq!(result, Ok(2));
    assert_eq!(driver.context().sleeps(), vec![Duration::from_millis(1); 2]);
}

#[tokio::test]
async fn test_zero_delays_do_not_sleep() {
    let driver = manual();
    let result = driver
        .repeat(&recurs::<()>(5).map_delay_nanos(|_| 999_999.0), || async {
            Ok::<_, ()>(())
        })
        .await;

    assert_eq!(result, Ok(5));
    assert!(driver.context().sleeps().is_empty());
}

#[tokio::test]
async fn test_cancelled_before_first_attempt() {
    let driver = manual();
    driver.context().cancel();
    let mut calls = 0;

    let result = driver
        .retry(&forever(), || {
            calls += 1;
            async { Err::<(), _>("never runs") }
        })
        .await;

    assert_eq!(calls, 0);
    assert_eq!(result, Err(ScheduleError::Cancelled));
}

#[tokio::test]
async fn test_cancellation_observed_between_attempts() {
    let driver = Driver::new().with_context(ManualContext::cancel_after_sleeps(2));
    let mut calls = 0;

    let result = driver
        .repeat(&spaced(Duration::from_millis(10)), || {
            calls += 1;
            async { Ok::<_, ()>(()) }
        })
        .await;

    assert_eq!(calls, 2);
    assert_eq!(result, Err(ScheduleError::Cancelled));
}

#[tokio::test]
async fn test_fatal_errors_bypass_schedule_and_handler() {
    let driver = manual().with_fatal(|e: &&str| *e == "fatal");
    let mut calls = 0;

    let result = driver
        .retry_or_else(
            &forever(),
            || {
                calls += 1;
                let n = calls;
                async move { Err::<(), _>(if n < 2 { "transient" } else { "fatal" }) }
            },
            |_, _| Ok(()),
        )
        .await;

    assert_eq!(calls, 2);
    assert_eq!(result, Err(ScheduleError::Fatal("fatal")));
}

#[tokio::test]
async fn test_fatal_error_stops_repeat() {
    let driver = manual().with_fatal(|code: &u16| *code >= 500);

    let result = driver
        .repeat_or_else(&forever(), || async { Err::<(), _>(503u16) }, |_, _| Ok(0))
        .await;

    assert_eq!(result, Err(ScheduleError::Fatal(503)));
}

#[tokio::test]
async fn test_schedule_is_reusable_across_runs() {
    let driver = manual();
    let schedule = recurs(1);

    for _ in 0..3 {
        let mut calls = 0;
        let result = driver
            .retry(&schedule, || {
                calls += 1;
                async { Err::<(), _>("down") }
            })
            .await;
        assert_eq!(calls, 2);
        assert!(result.is_err());
    }
}

#[tokio::test(start_paused = true)]
async fn test_free_functions_use_tokio_time() {
    let start = tokio::time::Instant::now();
    let mut calls = 0;

    let result = retry(&spaced(Duration::from_secs(2)).zip_left(recurs(2)), || {
        calls += 1;
        let n = calls;
        async move {
            if n < 3 {
                Err("busy")
            } else {
                Ok(n)
            }
        }
    })
    .await;

    assert_eq!(result, Ok(3));
    assert!(start.elapsed() >= Duration::from_secs(4));
}

#[tokio::test]
async fn test_free_repeat_variants() {
    assert_eq!(repeat(&recurs(2), || async { Ok::<_, ()>(()) }).await, Ok(2));

    let handled = repeat_or_else(&forever(), || async { Err::<(), _>(()) }, |_, last| {
        Ok(last.unwrap_or(42))
    })
    .await;
    assert_eq!(handled, Ok(42));

    let either = repeat_or_else_either(&once(), || async { Ok::<_, ()>(()) }, |_, _| Ok("x")).await;
    assert_eq!(either, Ok(Either::Right(())));
}

#[tokio::test]
async fn test_free_retry_variants() {
    let handled = retry_or_else(&recurs(0), || async { Err::<u32, _>("e") }, |_, n| Ok(n + 10)).await;
    assert_eq!(handled, Ok(10));

    let either =
        retry_or_else_either(&recurs(0), || async { Err::<u32, _>("e") }, |e, _| Ok(e.len())).await;
    assert_eq!(either, Ok(Either::Left(1)));
}

#[tokio::test]
#[tracing_test::traced_test]
async fn test_retry_logs_each_decision() {
    let _ = manual()
        .retry(&spaced(Duration::from_millis(3)).zip_left(recurs(1)), || async {
            Err::<(), _>("flaky")
        })
        .await;

    assert!(logs_contain("retrying after error"));
    assert!(logs_contain("delay_ms=3"));
    assert!(logs_contain("retry schedule exhausted"));
}
