// ── Runtime dashboard configuration ──
//
// These types describe *how* the dashboard behaves on a page: polling
// strategy, widget timings, diagram theme. They never touch disk or the
// DOM; `labdash-config` builds them from TOML and the web entry hands
// them in.

use std::time::Duration;

use url::Url;

use crate::diagram::DiagramTheme;

/// Self-fetch poll cadence.
pub const POLL_INTERVAL_MS: u64 = 3_000;
/// Delegate-refresh poll cadence.
pub const DELEGATE_POLL_INTERVAL_MS: u64 = 30_000;
/// How long a toast stays fully visible.
pub const TOAST_DURATION_MS: u64 = 3_000;
/// Length of the toast exit animation (`slideOut 0.3s`).
pub const TOAST_EXIT_MS: u64 = 300;
/// How long the copy button shows its success label.
pub const COPY_REVERT_DELAY_MS: u64 = 1_500;
/// Delay before the first alert feed is loaded on page load.
pub const ALERT_AUTO_LOAD_DELAY_MS: u64 = 1_000;
/// Aggregate status endpoint polled by the self-fetch strategy.
pub const STATUS_ENDPOINT: &str = labdash_api::STATUS_PATH;
/// Body event consumed by the partial-swap engine.
pub const REFRESH_EVENT: &str = "refresh";
/// Default `tracing` filter: every `labdash_*` crate at `info`.
pub const LOG_FILTER: &str = "labdash=info";

/// How the status poller keeps container rows current.
///
/// The two strategies are alternatives: a deployment picks one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollingStrategy {
    /// Fetch the status collection and patch rows in place.
    SelfFetch { interval: Duration, endpoint: String },
    /// Dispatch a body event and let the partial-swap engine re-fetch
    /// server-rendered fragments.
    DelegateRefresh {
        interval: Duration,
        event_name: String,
    },
}

impl PollingStrategy {
    pub fn interval(&self) -> Duration {
        match self {
            Self::SelfFetch { interval, .. } | Self::DelegateRefresh { interval, .. } => *interval,
        }
    }

    /// Default delegate-refresh strategy (30 s, `refresh` event).
    pub fn delegate_refresh() -> Self {
        Self::DelegateRefresh {
            interval: Duration::from_millis(DELEGATE_POLL_INTERVAL_MS),
            event_name: REFRESH_EVENT.into(),
        }
    }
}

impl Default for PollingStrategy {
    fn default() -> Self {
        Self::SelfFetch {
            interval: Duration::from_millis(POLL_INTERVAL_MS),
            endpoint: STATUS_ENDPOINT.into(),
        }
    }
}

/// Widget timings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    pub toast_duration: Duration,
    pub toast_exit: Duration,
    pub copy_revert_delay: Duration,
    pub alert_auto_load_delay: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            toast_duration: Duration::from_millis(TOAST_DURATION_MS),
            toast_exit: Duration::from_millis(TOAST_EXIT_MS),
            copy_revert_delay: Duration::from_millis(COPY_REVERT_DELAY_MS),
            alert_auto_load_delay: Duration::from_millis(ALERT_AUTO_LOAD_DELAY_MS),
        }
    }
}

/// Configuration for one dashboard page session.
///
/// Built by the web entry (or a test), passed to [`Dashboard`](crate::Dashboard).
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    /// Commander root. `None` means "same origin as the page".
    pub api_base: Option<Url>,
    pub polling: PollingStrategy,
    pub timings: Timings,
    pub diagram: DiagramTheme,
    /// `tracing` filter directive for the browser console.
    pub log_filter: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_base: None,
            polling: PollingStrategy::default(),
            timings: Timings::default(),
            diagram: DiagramTheme::default(),
            log_filter: LOG_FILTER.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_named_constants() {
        let cfg = DashboardConfig::default();
        assert_eq!(cfg.polling.interval(), Duration::from_secs(3));
        assert_eq!(
            cfg.polling,
            PollingStrategy::SelfFetch {
                interval: Duration::from_millis(3_000),
                endpoint: "/api/status".into(),
            }
        );
        assert_eq!(cfg.timings.toast_duration, Duration::from_secs(3));
        assert_eq!(cfg.timings.toast_exit, Duration::from_millis(300));
        assert_eq!(cfg.timings.copy_revert_delay, Duration::from_millis(1_500));
        assert_eq!(cfg.timings.alert_auto_load_delay, Duration::from_secs(1));
    }

    #[test]
    fn delegate_refresh_defaults() {
        let strategy = PollingStrategy::delegate_refresh();
        assert_eq!(strategy.interval(), Duration::from_secs(30));
        assert!(matches!(
            strategy,
            PollingStrategy::DelegateRefresh { ref event_name, .. } if event_name == "refresh"
        ));
    }
}
