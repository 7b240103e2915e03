// ── Page abstraction ──
//
// Every widget reaches the document through one of these traits. The
// browser implementation lives in `labdash-web`; `HeadlessPage` keeps the
// same surface in memory for native embedding and tests.
//
// All methods take `&self`: pages are single-threaded and mutate through
// interior mutability, the same way the DOM does.

mod headless;

pub use headless::{
    CopyTrigger, HeadlessButton, HeadlessCopyButton, HeadlessDiagrams, HeadlessPage,
    HeadlessRegion, HeadlessRow, HeadlessToast, StatusCell, ToastId,
};

use crate::alerts::AlertsView;
use crate::clipboard::CopyFeedback;
use crate::diagram::DiagramTheme;
use crate::error::CoreError;
use crate::model::AlertSource;
use crate::reconcile::RowPatch;
use crate::tabs::TabGroup;
use crate::toast::ToastSpec;

/// Container table and partial-swap signals.
pub trait StatusPage {
    /// Whether the partial-swap engine has a request in flight
    /// (`body.htmx-request`).
    fn swap_in_flight(&self) -> bool;

    /// Apply a patch to the row keyed by `patch.name`.
    ///
    /// Returns `false` when the page has no such row. Parts of the row
    /// that do not exist (status cell, action button) are skipped. A
    /// patched button is re-registered with the swap engine when present.
    fn patch_row(&self, patch: &RowPatch) -> bool;

    /// Dispatch a custom event on the page body.
    fn dispatch_body_event(&self, name: &str);
}

/// Per-source alert content regions.
pub trait AlertsPage {
    fn has_alerts_region(&self, source: AlertSource) -> bool;

    /// Replace the region's class and content with `view`.
    fn show_alerts(&self, source: AlertSource, view: &AlertsView);
}

/// Tab buttons and panels, scoped per [`TabGroup`].
pub trait TabsPage {
    fn has_tab_panel(&self, group: TabGroup, panel_id: &str) -> bool;

    /// Remove `active` from every button and panel of the group.
    fn clear_active_tabs(&self, group: TabGroup);

    /// Mark the button for `id` and its panel active.
    fn mark_tab_active(&self, group: TabGroup, id: &str);
}

/// Transient notifications.
pub trait ToastPage {
    /// Handle to a mounted toast.
    type Toast;

    /// Add a `<style>` element with `css` to the document head unless one
    /// with `id` already exists. Returns whether it was added.
    fn install_style_sheet(&self, id: &str, css: &str) -> bool;

    fn mount_toast(&self, spec: &ToastSpec) -> Result<Self::Toast, CoreError>;

    /// Switch the toast to its exit animation.
    fn start_toast_exit(&self, toast: &Self::Toast);

    fn remove_toast(&self, toast: Self::Toast);
}

/// Copy buttons next to code blocks.
pub trait CopyPage {
    /// The clicked control.
    type Trigger;

    /// Text of the element immediately preceding the trigger.
    fn preceding_text(&self, trigger: &Self::Trigger) -> Option<String>;

    fn show_copy_feedback(&self, trigger: &Self::Trigger, feedback: CopyFeedback);
}

/// Optional diagram renderer (mermaid).
pub trait DiagramPage {
    fn has_diagram_renderer(&self) -> bool;

    fn initialize_diagrams(&self, theme: &DiagramTheme) -> Result<(), CoreError>;

    /// Re-render every element matching `selector`.
    fn render_diagrams(&self, selector: &str) -> Result<(), CoreError>;
}

/// Controls reachable from keyboard shortcuts.
pub trait ShortcutPage {
    /// Click the first element matching `selector`. Returns `false` when
    /// nothing matches.
    fn click(&self, selector: &str) -> bool;
}

/// A page that supports every widget.
pub trait Page:
    StatusPage + AlertsPage + TabsPage + ToastPage + CopyPage + DiagramPage + ShortcutPage
{
}

impl<T> Page for T where
    T: StatusPage + AlertsPage + TabsPage + ToastPage + CopyPage + DiagramPage + ShortcutPage
{
}
