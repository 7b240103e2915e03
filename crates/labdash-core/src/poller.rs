// ── Status poller ──
//
// Recurring status refresh. Each tick either fetches the status collection
// and reconciles it into the page (self-fetch), or asks the partial-swap
// engine to refresh its fragments (delegate-refresh). A tick never overlaps
// a partial swap or a previous fetch.

use std::future::Future;

use futures_util::StreamExt;
use futures_util::stream::FuturesUnordered;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::api::LabApi;
use crate::config::PollingStrategy;
use crate::error::CoreError;
use crate::page::StatusPage;
use crate::reconcile::{ReconcileOutcome, reconcile};
use crate::state::DashboardState;
use crate::time::Ticker;

/// Why a tick did nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum SkipReason {
    /// The partial-swap engine has a request in flight.
    SwapInFlight,
    /// The previous poll's fetch has not settled.
    PollInFlight,
}

/// Hook for poll outcomes. Every method defaults to doing nothing.
pub trait PollObserver {
    fn tick_skipped(&self, _reason: SkipReason) {}
    fn fetch_failed(&self, _error: &CoreError) {}
    fn reconciled(&self, _outcome: ReconcileOutcome) {}
    fn refresh_dispatched(&self, _event_name: &str) {}
}

/// Default observer: `debug!` logs, nothing visible on the page.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl PollObserver for TracingObserver {
    fn tick_skipped(&self, reason: SkipReason) {
        debug!(%reason, "poll tick skipped");
    }

    fn fetch_failed(&self, error: &CoreError) {
        debug!(%error, status = error.http_status(), "status fetch failed");
    }

    fn reconciled(&self, outcome: ReconcileOutcome) {
        debug!(
            patched = outcome.patched,
            missing = outcome.missing,
            "status reconciled"
        );
    }

    fn refresh_dispatched(&self, event_name: &str) {
        debug!(event_name, "refresh event dispatched");
    }
}

/// Collaborators of one poll session.
pub struct Poller<'a, P: ?Sized, A: ?Sized> {
    pub strategy: &'a PollingStrategy,
    pub page: &'a P,
    pub api: &'a A,
    pub state: &'a DashboardState,
    pub observer: &'a dyn PollObserver,
}

impl<'a, P, A> Poller<'a, P, A>
where
    P: StatusPage + ?Sized,
    A: LabApi + ?Sized,
{
    /// Run one tick.
    ///
    /// Guard checks and the delegate dispatch happen synchronously. For
    /// self-fetch the in-flight flag is set before returning, and the
    /// returned future performs the fetch and clears the flag when it
    /// settles.
    pub fn begin_tick(&self) -> Option<impl Future<Output = ()> + use<'a, P, A>> {
        if self.page.swap_in_flight() {
            self.observer.tick_skipped(SkipReason::SwapInFlight);
            return None;
        }

        let (strategy, state) = (self.strategy, self.state);
        match strategy {
            PollingStrategy::DelegateRefresh { event_name, .. } => {
                self.page.dispatch_body_event(event_name);
                self.observer.refresh_dispatched(event_name);
                None
            }
            PollingStrategy::SelfFetch { endpoint, .. } => {
                let Some(guard) = state.try_begin_refresh() else {
                    self.observer.tick_skipped(SkipReason::PollInFlight);
                    return None;
                };
                let (page, api, observer) = (self.page, self.api, self.observer);
                Some(async move {
                    let result = api.container_status(endpoint).await;
                    drop(guard);
                    match result {
                        Ok(records) => observer.reconciled(reconcile(page, &records)),
                        Err(e) => observer.fetch_failed(&e),
                    }
                })
            }
        }
    }

    /// Tick every `strategy.interval()` until `cancel` fires.
    ///
    /// Fetches already started when the loop is cancelled are awaited and
    /// still apply their result.
    pub async fn run(self, cancel: CancellationToken) {
        let mut ticker = Ticker::new(self.strategy.interval());
        let mut in_flight = FuturesUnordered::new();

        loop {
            tokio::select! {
                biased;
                () = cancel.cancelled() => break,
                Some(()) = in_flight.next(), if !in_flight.is_empty() => {}
                () = ticker.tick() => {
                    if let Some(cycle) = self.begin_tick() {
                        in_flight.push(cycle);
                    }
                }
            }
        }

        while in_flight.next().await.is_some() {}
        debug!("poll loop stopped");
    }
}
