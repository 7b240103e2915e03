// ── Timer primitives ──
//
// `tokio::time` on native targets (tests run with a paused clock),
// `gloo-timers` on wasm32 where the browser event loop drives timers.

use std::time::Duration;

use tokio_util::sync::CancellationToken;

/// Recurring timer with `setInterval` semantics: the first tick fires one
/// full period after creation, and a late tick never bursts to catch up.
#[derive(Debug)]
pub struct Ticker {
    #[cfg(not(target_arch = "wasm32"))]
    inner: tokio::time::Interval,
    #[cfg(target_arch = "wasm32")]
    inner: gloo_timers::future::IntervalStream,
}

impl Ticker {
    #[cfg(not(target_arch = "wasm32"))]
    pub fn new(period: Duration) -> Self {
        let start = tokio::time::Instant::now() + period;
        let mut inner = tokio::time::interval_at(start, period);
        inner.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        Self { inner }
    }

    #[cfg(target_arch = "wasm32")]
    pub fn new(period: Duration) -> Self {
        Self {
            inner: gloo_timers::future::IntervalStream::new(millis(period)),
        }
    }

    /// Wait for the next tick.
    pub async fn tick(&mut self) {
        #[cfg(not(target_arch = "wasm32"))]
        self.inner.tick().await;
        #[cfg(target_arch = "wasm32")]
        {
            use futures_util::StreamExt;
            // The browser interval never ends.
            let _ = self.inner.next().await;
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn millis(d: Duration) -> u32 {
    u32::try_from(d.as_millis()).unwrap_or(u32::MAX)
}

/// One-shot delay.
pub async fn sleep(d: Duration) {
    #[cfg(not(target_arch = "wasm32"))]
    tokio::time::sleep(d).await;
    #[cfg(target_arch = "wasm32")]
    gloo_timers::future::sleep(d).await;
}

/// Sleep for `d` unless `cancel` fires first.
///
/// Returns `true` when the full delay elapsed, `false` when cancelled.
pub async fn sleep_or_cancel(d: Duration, cancel: &CancellationToken) -> bool {
    tokio::select! {
        biased;
        () = cancel.cancelled() => false,
        () = sleep(d) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn first_tick_waits_one_period() {
        let start = tokio::time::Instant::now();
        let mut ticker = Ticker::new(Duration::from_secs(3));
        ticker.tick().await;
        let first = start.elapsed();
        assert!(first >= Duration::from_secs(3) && first < Duration::from_secs(4));
        ticker.tick().await;
        let second = start.elapsed();
        assert!(second >= Duration::from_secs(6) && second < Duration::from_secs(7));
    }

    #[tokio::test(start_paused = true)]
    async fn sleep_or_cancel_reports_cancellation() {
        let cancel = CancellationToken::new();
        assert!(sleep_or_cancel(Duration::from_millis(10), &cancel).await);

        cancel.cancel();
        let start = tokio::time::Instant::now();
        assert!(!sleep_or_cancel(Duration::from_secs(60), &cancel).await);
        assert_eq!(start.elapsed(), Duration::ZERO);
    }
}
