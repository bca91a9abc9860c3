//! Bounded Random Delays
//!
//! [`wait_random`] suspends once for a random delay no longer than the given
//! bound. [`wait_n`] runs several of those concurrently and
//! [`measure_time`] reports the wall-clock time of one [`wait_n`] call on a
//! dedicated runtime.

use std::time::{Duration, Instant};

use anyhow::Context;
use futures::stream::{FuturesUnordered, StreamExt};
use rand::Rng;
use thiserror::Error;

/// Errors from the delay helpers
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum TimingError {
    /// The bound is negative, NaN, infinite or too large for a [`Duration`]
    #[error("max_delay must be a finite, non-negative number of seconds, got {0}")]
    InvalidDelay(f64),
}

fn check_delay(max_delay: f64) -> Result<(), TimingError> {
    if max_delay >= 0.0 && Duration::try_from_secs_f64(max_delay).is_ok() {
        Ok(())
    } else {
        Err(TimingError::InvalidDelay(max_delay))
    }
}

/// Sleep for a uniformly random delay in `[0, max_delay]` seconds
///
/// Returns the delay that was used.
///
/// # Errors
///
/// Returns [`TimingError::InvalidDelay`] for a negative, non-finite or
/// unrepresentable bound.
pub async fn wait_random(max_delay: f64) -> Result<f64, TimingError> {
    check_delay(max_delay)?;

    let delay = rand::thread_rng().gen_range(0.0..=max_delay);
    let duration =
        Duration::try_from_secs_f64(delay).map_err(|_| TimingError::InvalidDelay(max_delay))?;
    tokio::time::sleep(duration).await;
    Ok(delay)
}

/// Run `n` concurrent [`wait_random`] calls and collect their delays
///
/// Delays are gathered as the calls complete and returned in ascending
/// order.
///
/// # Errors
///
/// Returns [`TimingError::InvalidDelay`] for a negative, non-finite or
/// unrepresentable bound.
pub async fn wait_n(n: usize, max_delay: f64) -> Result<Vec<f64>, TimingError> {
    check_delay(max_delay)?;

    let mut pending: FuturesUnordered<_> = (0..n).map(|_| wait_random(max_delay)).collect();
    let mut delays = Vec::with_capacity(n);
    while let Some(delay) = pending.next().await {
        delays.push(delay?);
    }

    // Timers sharing a tick may complete out of order
    delays.sort_by(f64::total_cmp);

    tracing::debug!(n, max_delay, "All delays completed");
    Ok(delays)
}

/// Wall-clock time taken by `wait_n(n, max_delay)` on a fresh runtime
///
/// # Errors
///
/// Fails if the runtime cannot be started or the bound is invalid.
pub fn measure_time(n: usize, max_delay: f64) -> anyhow::Result<Duration> {
    timed_wait_n(n, max_delay).map(|(_, elapsed)| elapsed)
}

/// Delays from one [`wait_n`] call together with its wall-clock time
fn timed_wait_n(n: usize, max_delay: f64) -> anyhow::Result<(Vec<f64>, Duration)> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .context("Failed to start runtime")?;

    let start = Instant::now();
    let delays = runtime.block_on(wait_n(n, max_delay))?;
    Ok((delays, start.elapsed()))
}
