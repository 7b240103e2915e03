// ── Domain model ──
//
// Canonical types shared by every widget. Wire types from `labdash-api`
// are converted here; nothing below touches the page.

pub mod alert;
pub mod container;

pub use alert::{AlertSource, Severity};
pub use container::{ContainerAction, ContainerStatus, RUNNING_MARKER, RunState, SHORT_ID_LEN};
pub use labdash_api::AlertFeed;
