//! Dashboard logic for the IDS Lab Commander web console.
//!
//! This crate owns everything the browser client does, expressed against
//! traits instead of the DOM so it runs (and is tested) natively:
//!
//! - **[`Dashboard`]**: facade owning one page session. Starts and stops
//!   the status poller, loads alert feeds, switches tabs, shows toasts,
//!   copies code blocks and routes keyboard shortcuts. All timers hang off
//!   a session [`CancellationToken`](tokio_util::sync::CancellationToken).
//!
//! - **Page traits** ([`page`]): the document surface each widget needs
//!   ([`StatusPage`], [`AlertsPage`], [`TabsPage`], ...). `labdash-web`
//!   implements them over `web-sys`; [`HeadlessPage`] implements them in
//!   memory.
//!
//! - **Pure computation**: [`reconcile::row_patch`] turns a status record
//!   into a row mutation, [`alerts::render_lines`] turns a feed into
//!   escaped severity markup. Neither touches the page.
//!
//! - **[`LabApi`]**: the two commander reads, implemented for
//!   [`labdash_api::Client`].

pub mod alerts;
pub mod api;
pub mod clipboard;
pub mod config;
pub mod dashboard;
pub mod diagram;
pub mod error;
pub mod model;
pub mod page;
pub mod poller;
pub mod reconcile;
pub mod shortcuts;
pub mod state;
pub mod tabs;
pub mod theme;
pub mod time;
pub mod toast;

// ── Primary re-exports ──────────────────────────────────────────────
pub use alerts::{AlertsView, RegionContent};
pub use api::LabApi;
pub use clipboard::{Clipboard, CopyFeedback};
pub use config::{DashboardConfig, PollingStrategy, Timings};
pub use dashboard::Dashboard;
pub use diagram::{DiagramTheme, ThemeVariables};
pub use error::CoreError;
pub use page::{
    AlertsPage, CopyPage, DiagramPage, HeadlessPage, Page, ShortcutPage, StatusPage, TabsPage,
    ToastPage,
};
pub use poller::{PollObserver, SkipReason, TracingObserver};
pub use reconcile::{ButtonPatch, ReconcileOutcome, RowPatch, StatusPatch};
pub use shortcuts::{KeyChord, Shortcut};
pub use state::DashboardState;
pub use tabs::TabGroup;
pub use toast::{ToastLevel, ToastSpec};

pub use model::{
    AlertFeed, AlertSource, ContainerAction, ContainerStatus, RunState, Severity,
};
