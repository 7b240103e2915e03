// ── In-memory page ──
//
// A model of the dashboard document with just enough structure for every
// widget: container rows, alert regions, tab groups, toasts, copy buttons,
// an optional diagram renderer and clickable controls. Builders describe
// the server-rendered starting point; accessors return snapshots.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt::Write as _;

use indexmap::IndexMap;

use super::{AlertsPage, CopyPage, DiagramPage, ShortcutPage, StatusPage, TabsPage, ToastPage};
use crate::alerts::{AlertsView, RegionContent};
use crate::clipboard::CopyFeedback;
use crate::diagram::DiagramTheme;
use crate::error::CoreError;
use crate::model::AlertSource;
use crate::reconcile::RowPatch;
use crate::tabs::TabGroup;
use crate::theme::ACCENT_RED;
use crate::toast::{EXIT_ANIMATION, ToastSpec};

/// Status cell content: one colored span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusCell {
    pub text: String,
    pub color: String,
}

/// Primary action button of a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadlessButton {
    pub class_name: String,
    pub label: String,
    pub hx_post: String,
    /// Times the button was re-registered with the swap engine.
    pub processed: usize,
}

impl HeadlessButton {
    /// A `Start` button as the server renders it for a stopped container.
    pub fn start(short_id: &str) -> Self {
        Self {
            class_name: "btn start".into(),
            label: "Start".into(),
            hx_post: format!("/start/{short_id}"),
            processed: 0,
        }
    }
}

/// One `tr[data-container]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadlessRow {
    pub class_name: String,
    pub status: Option<StatusCell>,
    pub button: Option<HeadlessButton>,
}

/// One alert content region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadlessRegion {
    pub class_name: String,
    pub content: RegionContent,
    /// Number of times the region was rewritten.
    pub updates: usize,
}

/// A mounted toast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadlessToast {
    pub class_name: String,
    pub message: String,
    pub style: String,
    /// Whether the exit animation has started.
    pub exiting: bool,
}

/// Handle to a mounted [`HeadlessToast`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ToastId(u64);

/// A copy button and the code block before it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadlessCopyButton {
    pub preceding: Option<String>,
    pub label: String,
    pub copied: bool,
}

/// Handle to a [`HeadlessCopyButton`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CopyTrigger(usize);

/// State of the diagram renderer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeadlessDiagrams {
    pub initialized: Option<DiagramTheme>,
    pub renders: usize,
}

#[derive(Debug, Default)]
struct TabSet {
    buttons: IndexMap<String, bool>,
    panels: IndexMap<String, bool>,
}

#[derive(Debug, Default)]
struct Inner {
    rows: IndexMap<String, HeadlessRow>,
    swap_engine: bool,
    swap_in_flight: bool,
    events: Vec<String>,
    regions: IndexMap<AlertSource, HeadlessRegion>,
    tabs: HashMap<TabGroup, TabSet>,
    style_sheets: IndexMap<String, String>,
    toasts: IndexMap<u64, HeadlessToast>,
    next_toast: u64,
    copy_buttons: Vec<HeadlessCopyButton>,
    diagrams: Option<HeadlessDiagrams>,
    controls: IndexMap<String, usize>,
}

/// In-memory [`Page`](super::Page).
#[derive(Debug, Default)]
pub struct HeadlessPage {
    inner: RefCell<Inner>,
}

impl HeadlessPage {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Builders ─────────────────────────────────────────────────────

    /// Add a container row as rendered for a stopped container.
    #[must_use]
    pub fn with_row(mut self, name: &str, button: HeadlessButton) -> Self {
        self.inner.get_mut().rows.insert(
            name.to_owned(),
            HeadlessRow {
                class_name: "stopped".into(),
                status: Some(StatusCell {
                    text: "○ Stopped".into(),
                    color: ACCENT_RED.into(),
                }),
                button: Some(button),
            },
        );
        self
    }

    /// Add a row without status cell or action button.
    #[must_use]
    pub fn with_bare_row(mut self, name: &str) -> Self {
        self.inner.get_mut().rows.insert(
            name.to_owned(),
            HeadlessRow {
                class_name: String::new(),
                status: None,
                button: None,
            },
        );
        self
    }

    /// Load the partial-swap engine.
    #[must_use]
    pub fn with_swap_engine(mut self) -> Self {
        self.inner.get_mut().swap_engine = true;
        self
    }

    /// Add the content region of one alert source.
    #[must_use]
    pub fn with_alert_region(mut self, source: AlertSource) -> Self {
        self.inner.get_mut().regions.insert(
            source,
            HeadlessRegion {
                class_name: "alerts-content".into(),
                content: RegionContent::Text(String::new()),
                updates: 0,
            },
        );
        self
    }

    /// Add the content regions of every alert source.
    #[must_use]
    pub fn with_alert_regions(self) -> Self {
        AlertSource::ALL
            .into_iter()
            .fold(self, Self::with_alert_region)
    }

    /// Add a tab group. The first id starts active.
    #[must_use]
    pub fn with_tabs(mut self, group: TabGroup, ids: &[&str]) -> Self {
        let set = self.inner.get_mut().tabs.entry(group).or_default();
        for (i, id) in ids.iter().enumerate() {
            set.buttons.insert((*id).to_owned(), i == 0);
            set.panels.insert(group.panel_id(id), i == 0);
        }
        self
    }

    /// Load the diagram renderer.
    #[must_use]
    pub fn with_diagram_renderer(mut self) -> Self {
        self.inner.get_mut().diagrams = Some(HeadlessDiagrams::default());
        self
    }

    /// Add a clickable control matched by `selector`.
    #[must_use]
    pub fn with_control(mut self, selector: &str) -> Self {
        self.inner.get_mut().controls.insert(selector.to_owned(), 0);
        self
    }

    /// Add a copy button after a code block with `code` (or after nothing).
    pub fn add_copy_button(&self, code: Option<&str>) -> CopyTrigger {
        let mut inner = self.inner.borrow_mut();
        inner.copy_buttons.push(HeadlessCopyButton {
            preceding: code.map(str::to_owned),
            label: CopyFeedback::Idle.label().into(),
            copied: false,
        });
        CopyTrigger(inner.copy_buttons.len() - 1)
    }

    pub fn set_swap_in_flight(&self, in_flight: bool) {
        self.inner.borrow_mut().swap_in_flight = in_flight;
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn row(&self, name: &str) -> Option<HeadlessRow> {
        self.inner.borrow().rows.get(name).cloned()
    }

    pub fn dispatched_events(&self) -> Vec<String> {
        self.inner.borrow().events.clone()
    }

    pub fn alerts_region(&self, source: AlertSource) -> Option<HeadlessRegion> {
        self.inner.borrow().regions.get(&source).cloned()
    }

    pub fn active_tabs(&self, group: TabGroup) -> Vec<String> {
        self.active_in(group, |set| &set.buttons)
    }

    pub fn active_panels(&self, group: TabGroup) -> Vec<String> {
        self.active_in(group, |set| &set.panels)
    }

    fn active_in(
        &self,
        group: TabGroup,
        side: impl Fn(&TabSet) -> &IndexMap<String, bool>,
    ) -> Vec<String> {
        self.inner
            .borrow()
            .tabs
            .get(&group)
            .map(|set| {
                side(set)
                    .iter()
                    .filter(|(_, active)| **active)
                    .map(|(id, _)| id.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn style_sheet(&self, id: &str) -> Option<String> {
        self.inner.borrow().style_sheets.get(id).cloned()
    }

    pub fn toasts(&self) -> Vec<HeadlessToast> {
        self.inner.borrow().toasts.values().cloned().collect()
    }

    pub fn copy_button(&self, trigger: CopyTrigger) -> Option<HeadlessCopyButton> {
        self.inner.borrow().copy_buttons.get(trigger.0).cloned()
    }

    pub fn diagrams(&self) -> Option<HeadlessDiagrams> {
        self.inner.borrow().diagrams.clone()
    }

    pub fn clicks(&self, selector: &str) -> usize {
        self.inner
            .borrow()
            .controls
            .get(selector)
            .copied()
            .unwrap_or(0)
    }
}

// ── Page traits ─────────────────────────────────────────────────────

impl StatusPage for HeadlessPage {
    fn swap_in_flight(&self) -> bool {
        self.inner.borrow().swap_in_flight
    }

    fn patch_row(&self, patch: &RowPatch) -> bool {
        let mut inner = self.inner.borrow_mut();
        let swap_engine = inner.swap_engine;
        let Some(row) = inner.rows.get_mut(&patch.name) else {
            return false;
        };

        patch.row_class.clone_into(&mut row.class_name);
        if let Some(cell) = row.status.as_mut() {
            *cell = StatusCell {
                text: patch.status.text.into(),
                color: patch.status.color.into(),
            };
        }
        if let Some(button) = row.button.as_mut() {
            button.class_name.clone_from(&patch.button.class_name);
            patch.button.label.clone_into(&mut button.label);
            button.hx_post.clone_from(&patch.button.hx_post);
            if swap_engine {
                button.processed += 1;
            }
        }
        true
    }

    fn dispatch_body_event(&self, name: &str) {
        self.inner.borrow_mut().events.push(name.to_owned());
    }
}

impl AlertsPage for HeadlessPage {
    fn has_alerts_region(&self, source: AlertSource) -> bool {
        self.inner.borrow().regions.contains_key(&source)
    }

    fn show_alerts(&self, source: AlertSource, view: &AlertsView) {
        if let Some(region) = self.inner.borrow_mut().regions.get_mut(&source) {
            view.class_name().clone_into(&mut region.class_name);
            region.content = view.content();
            region.updates += 1;
        }
    }
}

impl TabsPage for HeadlessPage {
    fn has_tab_panel(&self, group: TabGroup, panel_id: &str) -> bool {
        self.inner
            .borrow()
            .tabs
            .get(&group)
            .is_some_and(|set| set.panels.contains_key(panel_id))
    }

    fn clear_active_tabs(&self, group: TabGroup) {
        if let Some(set) = self.inner.borrow_mut().tabs.get_mut(&group) {
            set.buttons.values_mut().for_each(|a| *a = false);
            set.panels.values_mut().for_each(|a| *a = false);
        }
    }

    fn mark_tab_active(&self, group: TabGroup, id: &str) {
        if let Some(set) = self.inner.borrow_mut().tabs.get_mut(&group) {
            if let Some(active) = set.buttons.get_mut(id) {
                *active = true;
            }
            if let Some(active) = set.panels.get_mut(&group.panel_id(id)) {
                *active = true;
            }
        }
    }
}

impl ToastPage for HeadlessPage {
    type Toast = ToastId;

    fn install_style_sheet(&self, id: &str, css: &str) -> bool {
        let mut inner = self.inner.borrow_mut();
        if inner.style_sheets.contains_key(id) {
            return false;
        }
        inner.style_sheets.insert(id.to_owned(), css.to_owned());
        true
    }

    fn mount_toast(&self, spec: &ToastSpec) -> Result<ToastId, CoreError> {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_toast;
        inner.next_toast += 1;
        inner.toasts.insert(
            id,
            HeadlessToast {
                class_name: spec.class_name(),
                message: spec.message.clone(),
                style: spec.inline_style(),
                exiting: false,
            },
        );
        Ok(ToastId(id))
    }

    fn start_toast_exit(&self, toast: &ToastId) {
        if let Some(t) = self.inner.borrow_mut().toasts.get_mut(&toast.0) {
            t.exiting = true;
            let _ = write!(t.style, " animation: {EXIT_ANIMATION};");
        }
    }

    fn remove_toast(&self, toast: ToastId) {
        self.inner.borrow_mut().toasts.shift_remove(&toast.0);
    }
}

impl CopyPage for HeadlessPage {
    type Trigger = CopyTrigger;

    fn preceding_text(&self, trigger: &CopyTrigger) -> Option<String> {
        self.inner
            .borrow()
            .copy_buttons
            .get(trigger.0)
            .and_then(|b| b.preceding.clone())
    }

    fn show_copy_feedback(&self, trigger: &CopyTrigger, feedback: CopyFeedback) {
        if let Some(button) = self.inner.borrow_mut().copy_buttons.get_mut(trigger.0) {
            feedback.label().clone_into(&mut button.label);
            button.copied = feedback.is_copied();
        }
    }
}

impl DiagramPage for HeadlessPage {
    fn has_diagram_renderer(&self) -> bool {
        self.inner.borrow().diagrams.is_some()
    }

    fn initialize_diagrams(&self, theme: &DiagramTheme) -> Result<(), CoreError> {
        let mut inner = self.inner.borrow_mut();
        let diagrams = inner.diagrams.as_mut().ok_or_else(|| CoreError::PageUnavailable {
            what: "diagram renderer".into(),
        })?;
        diagrams.initialized = Some(theme.clone());
        Ok(())
    }

    fn render_diagrams(&self, _selector: &str) -> Result<(), CoreError> {
        let mut inner = self.inner.borrow_mut();
        let diagrams = inner.diagrams.as_mut().ok_or_else(|| CoreError::PageUnavailable {
            what: "diagram renderer".into(),
        })?;
        diagrams.renders += 1;
        Ok(())
    }
}

impl ShortcutPage for HeadlessPage {
    fn click(&self, selector: &str) -> bool {
        match self.inner.borrow_mut().controls.get_mut(selector) {
            Some(clicks) => {
                *clicks += 1;
                true
            }
            None => false,
        }
    }
}
