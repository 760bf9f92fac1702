//! Retry Patterns Example
//!
//! Demonstrates building retry policies out of small schedules.
//! Shows practical patterns including:
//! - Exponential backoff with a retry limit
//! - Comparing delay shapes, with and without jitter
//! - Falling back from fast retries to slow ones with `and_then`
//! - Telling transient errors from fatal ones
//! - Recovering with the error history once the schedule gives up
//!
//! Run with: cargo run --example retry_patterns

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use cadence::prelude::*;
use cadence::testing::replay;
use cadence::{Driver, Either};

#[derive(Debug, Clone, PartialEq)]
enum ApiError {
    Unavailable,
    RateLimited,
    Unauthorized,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Unavailable => write!(f, "service unavailable"),
            ApiError::RateLimited => write!(f, "rate limited"),
            ApiError::Unauthorized => write!(f, "unauthorized"),
        }
    }
}

// ==================== Basic Backoff ====================

/// Example 1: Exponential backoff with a retry limit
///
/// The operation fails twice, then succeeds on the third attempt.
async fn example_basic_backoff() {
    println!("\n=== Example 1: Exponential Backoff ===");

    let attempts = Arc::new(AtomicU32::new(0));
    let policy = exponential::<&str>(Duration::from_millis(10), 2.0).and(recurs(5));

    let result = retry(&policy, || {
        let attempts = attempts.clone();
        async move {
            let n = attempts.fetch_add(1, Ordering::SeqCst);
            println!("  Attempt {}", n + 1);
            if n < 2 {
                Err("transient failure")
            } else {
                Ok("success!")
            }
        }
    })
    .await;

    match result {
        Ok(value) => println!(
            "Success after {} attempts: {}",
            attempts.load(Ordering::SeqCst),
            value
        ),
        Err(e) => println!("Failed: {}", e),
    }
}

// ==================== Delay Shapes ====================

/// Example 2: Comparing delay shapes
///
/// Schedules are pure, so their delays can be inspected without running
/// anything.
async fn example_delay_shapes() {
    println!("\n=== Example 2: Delay Shapes ===");

    let base = Duration::from_millis(100);

    println!("Spaced delays:");
    for (i, step) in replay(&spaced::<()>(base), &(), 5).iter().enumerate() {
        println!("  Retry {}: {:?}", i + 1, step.delay);
    }

    println!("\nLinear delays:");
    for (i, step) in replay(&linear::<()>(base), &(), 5).iter().enumerate() {
        println!("  Retry {}: {:?}", i + 1, step.delay);
    }

    println!("\nExponential delays:");
    for (i, step) in replay(&exponential::<()>(base, 2.0), &(), 5)
        .iter()
        .enumerate()
    {
        println!("  Retry {}: {:?}", i + 1, step.delay);
    }

    println!("\nFibonacci delays:");
    for (i, step) in replay(&fibonacci::<()>(base), &(), 5).iter().enumerate() {
        println!("  Retry {}: {:?}", i + 1, step.delay);
    }

    // Jitter scales each delay by a random factor in [0, 1), spreading out
    // clients that would otherwise retry in lockstep.
    println!("\nExponential delays with jitter:");
    let jittered = exponential::<()>(base, 2.0).jittered();
    for (i, step) in replay(&jittered, &(), 5).iter().enumerate() {
        println!("  Retry {}: {:?}", i + 1, step.delay);
    }
}

// ==================== Fallback Chain ====================

/// Example 3: Fast retries first, slow ones after
///
/// Three quick exponential retries, then up to two more spaced a little
/// further apart. The output tells which phase made the last decision.
async fn example_fallback_chain() {
    println!("\n=== Example 3: Fallback Chain ===");

    let fast = exponential::<ApiError>(Duration::from_millis(5), 2.0).and(recurs(3));
    let slow = spaced(Duration::from_millis(50)).and(recurs(2));
    let policy = fast.and_then(slow);

    let attempts = AtomicU32::new(0);
    let result = retry_or_else(
        &policy,
        || {
            let n = attempts.fetch_add(1, Ordering::SeqCst) + 1;
            println!("  Attempt {}", n);
            async { Err::<String, _>(ApiError::Unavailable) }
        },
        |error, phase| {
            let phase = match phase {
                Either::Left(_) => "fast",
                Either::Right(_) => "slow",
            };
            Ok(format!("gave up in the {} phase: {}", phase, error))
        },
    )
    .await;

    match result {
        Ok(message) => println!("Result: {}", message),
        Err(e) => println!("Error: {}", e),
    }
}

// ==================== Fatal Errors ====================

/// Example 4: Never retry fatal errors
///
/// Unauthorized will not fix itself, so the driver returns it at once without
/// consulting the schedule.
async fn example_fatal_errors() {
    println!("\n=== Example 4: Fatal Errors ===");

    let driver = Driver::new().with_fatal(|e: &ApiError| *e == ApiError::Unauthorized);
    let policy = spaced::<ApiError>(Duration::from_millis(10)).and(recurs(5));

    let attempts = AtomicU32::new(0);
    let result = driver
        .retry(&policy, || {
            let n = attempts.fetch_add(1, Ordering::SeqCst);
            println!("  Attempt {}", n + 1);
            async move {
                if n == 0 {
                    Err::<(), _>(ApiError::RateLimited)
                } else {
                    Err(ApiError::Unauthorized)
                }
            }
        })
        .await;

    match result {
        Err(ScheduleError::Fatal(e)) => println!("Stopped on a fatal error: {}", e),
        other => println!("Unexpected: {:?}", other),
    }
}

// ==================== Recovery ====================

/// Example 5: Recover with everything the schedule saw
///
/// The schedule collects every error; the fallback turns them into a report.
async fn example_recovery() {
    println!("\n=== Example 5: Recovery ===");

    let policy = spaced::<ApiError>(Duration::from_millis(5))
        .and(recurs(3))
        .zip_right(collect());

    let attempts = AtomicU32::new(0);
    let result = retry_or_else(
        &policy,
        || {
            let n = attempts.fetch_add(1, Ordering::SeqCst);
            async move {
                Err::<String, _>(if n % 2 == 0 {
                    ApiError::Unavailable
                } else {
                    ApiError::RateLimited
                })
            }
        },
        |last, history| {
            Ok(format!(
                "serving cached data after {} errors (last: {})",
                history.len(),
                last
            ))
        },
    )
    .await;

    match result {
        Ok(message) => println!("Result: {}", message),
        Err(e) => println!("Error: {}", e),
    }
}

#[tokio::main]
async fn main() {
    println!("======================================");
    println!("  Cadence Retry Patterns");
    println!("======================================");

    example_basic_backoff().await;
    example_delay_shapes().await;
    example_fallback_chain().await;
    example_fatal_errors().await;
    example_recovery().await;

    println!("\n======================================");
    println!("  All examples completed!");
    println!("======================================");
}
