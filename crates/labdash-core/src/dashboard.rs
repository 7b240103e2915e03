// ── Dashboard facade ──
//
// One `Dashboard` per page. It owns the page handle, the API client, the
// session state and the root cancellation token; every widget entry point
// the page exposes goes through here.

use std::future::Future;
use std::rc::Rc;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::alerts;
use crate::api::LabApi;
use crate::clipboard::{self, Clipboard};
use crate::config::DashboardConfig;
use crate::diagram;
use crate::error::CoreError;
use crate::model::AlertSource;
use crate::page::Page;
use crate::poller::{PollObserver, Poller, TracingObserver};
use crate::shortcuts::{self, KeyChord};
use crate::state::DashboardState;
use crate::tabs::{self, TabGroup};
use crate::theme::{STYLE_ELEMENT_ID, STYLE_SHEET};
use crate::time::sleep_or_cancel;
use crate::toast::{self, ToastLevel, ToastSpec};

/// Page session: widgets, state and timers.
///
/// Futures returned by the async methods are `!Send`; the browser entry
/// runs them with `spawn_local`.
pub struct Dashboard<P, A> {
    page: P,
    api: A,
    config: DashboardConfig,
    state: DashboardState,
    observer: Rc<dyn PollObserver>,
    cancel: CancellationToken,
}

impl<P: Page, A: LabApi> Dashboard<P, A> {
    pub fn new(page: P, api: A, config: DashboardConfig) -> Self {
        Self {
            page,
            api,
            config,
            state: DashboardState::new(),
            observer: Rc::new(TracingObserver),
            cancel: CancellationToken::new(),
        }
    }

    /// Replace the default poll observer.
    #[must_use]
    pub fn with_observer(mut self, observer: Rc<dyn PollObserver>) -> Self {
        self.observer = observer;
        self
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    // ── Lifecycle ────────────────────────────────────────────────────

    /// Page-load setup that needs no timers: style injection and diagram
    /// initialization.
    pub fn init(&self) {
        if self.page.install_style_sheet(STYLE_ELEMENT_ID, STYLE_SHEET) {
            debug!("dashboard styles installed");
        }
        diagram::init(&self.page, &self.config.diagram);
        info!(polling = ?self.config.polling, "dashboard initialized");
    }

    /// Cancel every timer of the session: poll loop, toasts, copy reverts,
    /// pending auto-load.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }

    pub fn is_shut_down(&self) -> bool {
        self.cancel.is_cancelled()
    }

    // ── Status poller ────────────────────────────────────────────────

    /// Start the poll timer.
    ///
    /// Returns the loop future to spawn, or `None` when a timer is already
    /// running (or the session is shut down).
    pub fn start_polling(self: &Rc<Self>) -> Option<impl Future<Output = ()> + use<P, A>>
    where
        P: 'static,
        A: 'static,
    {
        if self.is_shut_down() {
            return None;
        }
        let token = self.cancel.child_token();
        if !self.state.begin_polling(token.clone()) {
            debug!("auto-refresh already running");
            return None;
        }
        info!(interval = ?self.config.polling.interval(), "auto-refresh started");

        let this = Rc::clone(self);
        Some(async move {
            this.poller().run(token).await;
        })
    }

    /// Stop the poll timer. In-flight fetches still complete and apply.
    pub fn stop_polling(&self) -> bool {
        let stopped = self.state.end_polling();
        if stopped {
            info!("auto-refresh stopped");
        }
        stopped
    }

    /// Run one poll tick now, as the timer would.
    pub fn begin_tick(&self) -> Option<impl Future<Output = ()> + '_> {
        self.poller().begin_tick()
    }

    fn poller(&self) -> Poller<'_, P, A> {
        Poller {
            strategy: &self.config.polling,
            page: &self.page,
            api: &self.api,
            state: &self.state,
            observer: self.observer.as_ref(),
        }
    }

    // ── Tabs ─────────────────────────────────────────────────────────

    /// Switch the top-level tab.
    pub fn show_tab(&self, id: &str) -> bool {
        tabs::activate(&self.page, TabGroup::Page, id)
    }

    /// Switch the alert-source tab and remember the source. Does not load.
    pub fn select_alert_source(&self, source: AlertSource) -> bool {
        if !tabs::activate(&self.page, TabGroup::AlertSource, source.id()) {
            return false;
        }
        self.state.select_source(source);
        true
    }

    /// Switch the alert-source tab, then load its feed.
    pub async fn show_alert_tab(&self, source: AlertSource) {
        if self.select_alert_source(source) {
            self.load_alerts(source).await;
        }
    }

    // ── Alerts ───────────────────────────────────────────────────────

    pub async fn load_alerts(&self, source: AlertSource) {
        alerts::load(&self.page, &self.api, source).await;
    }

    /// Reload the currently selected source.
    pub async fn refresh_alerts(&self) {
        self.load_alerts(self.state.selected_source()).await;
    }

    /// Load the first source once, after the configured delay.
    pub async fn auto_load_alerts(&self) {
        if sleep_or_cancel(self.config.timings.alert_auto_load_delay, &self.cancel).await {
            self.load_alerts(AlertSource::ALL[0]).await;
        }
    }

    // ── Widgets ──────────────────────────────────────────────────────

    pub async fn show_toast(&self, message: &str, level: ToastLevel) -> Result<(), CoreError> {
        let spec = ToastSpec::new(message, level);
        toast::run_toast(&self.page, &spec, &self.config.timings, &self.cancel).await
    }

    pub async fn copy_code<C: Clipboard + ?Sized>(
        &self,
        clipboard: &C,
        trigger: &P::Trigger,
    ) -> Result<(), CoreError> {
        clipboard::copy_code(
            &self.page,
            clipboard,
            trigger,
            self.config.timings.copy_revert_delay,
            &self.cancel,
        )
        .await
    }

    /// Partial-swap hook: re-render diagrams.
    pub fn after_swap(&self) -> bool {
        diagram::after_swap(&self.page)
    }

    /// Key-down hook. Returns `true` when the browser default must be
    /// suppressed.
    pub fn handle_key(&self, chord: &KeyChord) -> bool {
        shortcuts::handle_key(&self.page, chord)
    }
}

impl<P, A> Drop for Dashboard<P, A> {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
