// ── Status reconciliation ──
//
// Pure half of the status poller: turn a status record into the row
// mutation it implies. Applying the patch is the page's job.

use tracing::trace;

use crate::model::{ContainerStatus, RunState};
use crate::page::StatusPage;
use crate::theme::{ACCENT_GREEN, ACCENT_RED};

/// New content of a row's status cell: a single colored span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusPatch {
    pub text: &'static str,
    pub color: &'static str,
}

/// New state of a row's primary action button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonPatch {
    /// Full class attribute (`btn stop` / `btn start`).
    pub class_name: String,
    pub label: &'static str,
    /// `hx-post` target.
    pub hx_post: String,
}

/// Everything a page must change on the row of one container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowPatch {
    /// Row key (`tr[data-container]`).
    pub name: String,
    pub state: RunState,
    pub row_class: &'static str,
    pub status: StatusPatch,
    pub button: ButtonPatch,
}

/// Counts of one reconciliation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileOutcome {
    /// Records whose row was found and patched.
    pub patched: usize,
    /// Records with no row on the page.
    pub missing: usize,
}

/// Compute the row patch for one status record.
pub fn row_patch(container: &ContainerStatus) -> RowPatch {
    let state = container.run_state();
    let action = state.toggle_action();
    RowPatch {
        name: container.name.clone(),
        state,
        row_class: state.row_class(),
        status: StatusPatch {
            text: state.indicator_text(),
            color: if state.is_running() {
                ACCENT_GREEN
            } else {
                ACCENT_RED
            },
        },
        button: ButtonPatch {
            class_name: format!("btn {action}"),
            label: action.label(),
            hx_post: action.endpoint(container.short_id()),
        },
    }
}

/// Patch every row that has a matching record. Rows are never created or
/// removed; records without a row are counted and skipped.
pub fn reconcile<P: StatusPage + ?Sized>(page: &P, records: &[ContainerStatus]) -> ReconcileOutcome {
    let mut outcome = ReconcileOutcome::default();
    for record in records {
        let patch = row_patch(record);
        if page.patch_row(&patch) {
            outcome.patched += 1;
        } else {
            trace!(name = %record.name, "no row for container");
            outcome.missing += 1;
        }
    }
    outcome
}
