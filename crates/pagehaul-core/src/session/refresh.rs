//! Periodic refresh ticks.
//!
//! The refresh timer is an abstraction over tokio's interval so callers
//! (and tests) provide the per-tick work as a closure; the engines stay
//! pure and the loop stays trivially cancellable.

use anyhow::Result;
use std::time::Duration;
use tokio::time::MissedTickBehavior;

/// Runs `tick` on a fixed interval until it returns `false` or errors.
/// The first tick fires immediately. Missed ticks are delayed, not bursted;
/// refresh is best-effort and a late merge is as good as an on-time one.
pub async fn run_ticks<F>(period: Duration, mut tick: F) -> Result<()>
where
    F: FnMut(u64) -> Result<bool>,
{
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut count: u64 = 0;
    loop {
        interval.tick().await;
        if !tick(count)? {
            return Ok(());
        }
        count += 1;
    }
}
