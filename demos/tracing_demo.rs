//! Demonstrates tracing integration with schedules and drivers
//!
//! Run with: cargo run --example tracing_demo

use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use cadence::prelude::*;

#[tokio::main]
async fn main() {
    // TRACE shows every schedule decision, DEBUG only the driver's retries
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .init();

    tracing::info!("Starting tracing demo");

    // Each decision is recorded inside the "backoff" span
    let policy = exponential::<String>(Duration::from_millis(20), 2.0)
        .and(recurs(4))
        .instrument(tracing::info_span!("backoff", endpoint = "/orders"));

    match fetch_orders(&policy).await {
        Ok(count) => tracing::info!("Fetched {} orders", count),
        Err(e) => tracing::error!("Fetching orders failed: {}", e),
    }

    // A schedule that runs out emits "retry schedule exhausted"
    tracing::info!("Retrying an endpoint that never recovers");
    let short = spaced::<String>(Duration::from_millis(10))
        .and(recurs(2))
        .instrument(tracing::info_span!("backoff", endpoint = "/inventory"));
    let result = retry(&short, || async { Err::<u32, _>("503".to_string()) }).await;
    tracing::info!("Inventory result: {:?}", result);
}

async fn fetch_orders<S>(policy: &S) -> Result<u32, ScheduleError<String>>
where
    S: Schedule<Input = String>,
{
    let attempts = AtomicU32::new(0);
    retry(policy, || {
        let n = attempts.fetch_add(1, Ordering::SeqCst);
        async move {
            if n < 3 {
                tracing::warn!(attempt = n + 1, "orders service timed out");
                Err(format!("timeout on attempt {}", n + 1))
            } else {
                Ok(42)
            }
        }
    })
    .await
}
