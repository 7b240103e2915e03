// ── Page session state ──
//
// Everything the dashboard remembers between events. Owned by one
// `Dashboard`, which lives exactly as long as the page.

use std::cell::{Cell, RefCell};

use tokio_util::sync::CancellationToken;

use crate::model::AlertSource;

/// Mutable state of one page session. Single-threaded.
#[derive(Debug, Default)]
pub struct DashboardState {
    refreshing: Cell<bool>,
    poll: RefCell<Option<CancellationToken>>,
    selected_source: Cell<AlertSource>,
}

/// Holds the in-flight flag for one poll cycle; clears it on drop.
#[derive(Debug)]
pub struct RefreshGuard<'a> {
    state: &'a DashboardState,
}

impl Drop for RefreshGuard<'_> {
    fn drop(&mut self) {
        self.state.refreshing.set(false);
    }
}

impl DashboardState {
    pub fn new() -> Self {
        Self::default()
    }

    // ── In-flight guard ──────────────────────────────────────────────

    pub fn is_refreshing(&self) -> bool {
        self.refreshing.get()
    }

    /// Set the in-flight flag. Returns `None` when a cycle already holds it.
    pub fn try_begin_refresh(&self) -> Option<RefreshGuard<'_>> {
        if self.refreshing.replace(true) {
            return None;
        }
        Some(RefreshGuard { state: self })
    }

    // ── Poll timer ───────────────────────────────────────────────────

    pub fn is_polling(&self) -> bool {
        self.poll
            .borrow()
            .as_ref()
            .is_some_and(|t| !t.is_cancelled())
    }

    /// Register a new poll timer. Returns `false` when one is already
    /// running.
    pub fn begin_polling(&self, token: CancellationToken) -> bool {
        if self.is_polling() {
            return false;
        }
        *self.poll.borrow_mut() = Some(token);
        true
    }

    /// Cancel the poll timer. Returns `false` when none was running.
    pub fn end_polling(&self) -> bool {
        match self.poll.borrow_mut().take() {
            Some(token) if !token.is_cancelled() => {
                token.cancel();
                true
            }
            _ => false,
        }
    }

    // ── Alert source selection ───────────────────────────────────────

    pub fn selected_source(&self) -> AlertSource {
        self.selected_source.get()
    }

    pub fn select_source(&self, source: AlertSource) {
        self.selected_source.set(source);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refresh_guard_is_exclusive_until_dropped() {
        let state = DashboardState::new();
        let guard = state.try_begin_refresh();
        assert!(guard.is_some());
        assert!(state.is_refreshing());
        assert!(state.try_begin_refresh().is_none());
        drop(guard);
        assert!(!state.is_refreshing());
        assert!(state.try_begin_refresh().is_some());
    }

    #[test]
    fn polling_registration() {
        let state = DashboardState::new();
        assert!(state.begin_polling(CancellationToken::new()));
        assert!(!state.begin_polling(CancellationToken::new()));
        assert!(state.end_polling());
        assert!(!state.end_polling());
        assert!(state.begin_polling(CancellationToken::new()));
    }

    #[test]
    fn cancelled_timer_does_not_block_restart() {
        let state = DashboardState::new();
        let token = CancellationToken::new();
        assert!(state.begin_polling(token.clone()));
        token.cancel();
        assert!(!state.is_polling());
        assert!(state.begin_polling(CancellationToken::new()));
    }

    #[test]
    fn default_source_is_first() {
        let state = DashboardState::new();
        assert_eq!(state.selected_source(), AlertSource::Snort);
        state.select_source(AlertSource::Zeek);
        assert_eq!(state.selected_source(), AlertSource::Zeek);
    }
}
