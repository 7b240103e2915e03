// ── DOM page ──
//
// The core page traits over `web-sys`. htmx and mermaid are globals loaded
// by the server page; both are looked up on `window` at call time and
// treated as absent when missing.

use js_sys::{Array, Function, JSON, Reflect};
use labdash_core::page::{
    AlertsPage, CopyPage, DiagramPage, ShortcutPage, StatusPage, TabsPage, ToastPage,
};
use labdash_core::toast::EXIT_ANIMATION;
use labdash_core::{
    AlertSource, AlertsView, CopyFeedback, CoreError, DiagramTheme, RegionContent, RowPatch,
    StatusPatch, TabGroup, ToastSpec,
};
use tracing::debug;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CustomEvent, Document, Element, HtmlElement, Window};

use crate::bootstrap::PageSettings;
use crate::selectors::{
    self, ACTION_BUTTON, ACTION_CELL, ACTIVE_CLASS, STATUS_CELL, SWAP_IN_FLIGHT_CLASS,
};

const HTMX_GLOBAL: &str = "htmx";
const MERMAID_GLOBAL: &str = "mermaid";

/// The live dashboard document.
#[derive(Debug, Clone)]
pub struct BrowserPage {
    window: Window,
    document: Document,
}

impl BrowserPage {
    pub fn new(window: Window) -> Result<Self, CoreError> {
        let document = window.document().ok_or_else(|| unavailable("document"))?;
        Ok(Self { window, document })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Read the embedded config block, the API meta tag and the origin.
    pub fn read_settings(&self) -> PageSettings {
        PageSettings {
            embedded: self
                .query(&selectors::config_block())
                .and_then(|el| el.text_content()),
            meta_api_url: self
                .query(&selectors::api_url_meta())
                .and_then(|el| el.get_attribute("content")),
            origin: self.window.location().origin().ok(),
        }
    }

    // ── DOM helpers ──────────────────────────────────────────────────

    fn query(&self, selector: &str) -> Option<Element> {
        self.document.query_selector(selector).ok().flatten()
    }

    fn query_all(&self, selector: &str) -> Vec<Element> {
        let Ok(list) = self.document.query_selector_all(selector) else {
            debug!(selector, "invalid selector");
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    fn body(&self) -> Result<HtmlElement, CoreError> {
        self.document.body().ok_or_else(|| unavailable("document body"))
    }

    /// A library global on `window`, if loaded.
    fn global(&self, name: &str) -> Option<JsValue> {
        Reflect::get(&self.window, &JsValue::from_str(name))
            .ok()
            .filter(|v| !v.is_undefined() && !v.is_null())
    }

    fn call_global(&self, global: &str, method: &str, args: &Array) -> Result<JsValue, CoreError> {
        let target = self.global(global).ok_or_else(|| unavailable(global))?;
        let call = || -> Result<JsValue, JsValue> {
            let function: Function = Reflect::get(&target, &JsValue::from_str(method))?.dyn_into()?;
            function.apply(&target, args)
        };
        call().map_err(|e| CoreError::PageUnavailable {
            what: format!("{global}.{method}: {}", describe(&e)),
        })
    }

    fn write_status_cell(&self, cell: &Element, status: &StatusPatch) -> Result<(), JsValue> {
        let span: HtmlElement = self.document.create_element("span")?.dyn_into()?;
        span.style().set_property("color", status.color)?;
        span.set_text_content(Some(status.text));
        cell.set_text_content(None);
        cell.append_child(&span)?;
        Ok(())
    }
}

// ── Status table ────────────────────────────────────────────────────

impl StatusPage for BrowserPage {
    fn swap_in_flight(&self) -> bool {
        self.document
            .body()
            .is_some_and(|body| body.class_list().contains(SWAP_IN_FLIGHT_CLASS))
    }

    fn patch_row(&self, patch: &RowPatch) -> bool {
        let Some(row) = self.query(&selectors::row(&patch.name)) else {
            return false;
        };
        row.set_class_name(patch.row_class);

        if let Ok(Some(cell)) = row.query_selector(STATUS_CELL) {
            if let Err(e) = self.write_status_cell(&cell, &patch.status) {
                debug!(container = %patch.name, error = %describe(&e), "status cell not updated");
            }
        }

        let button_selector = format!("{ACTION_CELL} {ACTION_BUTTON}");
        if let Ok(Some(button)) = row.query_selector(&button_selector) {
            button.set_class_name(&patch.button.class_name);
            if let Err(e) = button.set_attribute("hx-post", &patch.button.hx_post) {
                debug!(container = %patch.name, error = %describe(&e), "hx-post not updated");
            }
            button.set_text_content(Some(patch.button.label));
            if self.global(HTMX_GLOBAL).is_some() {
                if let Err(e) = self.call_global(HTMX_GLOBAL, "process", &Array::of1(&button)) {
                    debug!(container = %patch.name, error = %e, "button not re-registered");
                }
            }
        }
        true
    }

    fn dispatch_body_event(&self, name: &str) {
        let dispatched = self.body().and_then(|body| {
            let event = CustomEvent::new(name).map_err(|e| js_failure("event", &e))?;
            body.dispatch_event(&event)
                .map_err(|e| js_failure("event dispatch", &e))
        });
        if let Err(e) = dispatched {
            debug!(event = name, error = %e, "body event not dispatched");
        }
    }
}

// ── Alerts ──────────────────────────────────────────────────────────

impl AlertsPage for BrowserPage {
    fn has_alerts_region(&self, source: AlertSource) -> bool {
        self.document.get_element_by_id(&source.content_id()).is_some()
    }

    fn show_alerts(&self, source: AlertSource, view: &AlertsView) {
        let Some(region) = self.document.get_element_by_id(&source.content_id()) else {
            return;
        };
        match view.content() {
            RegionContent::Text(text) => region.set_text_content(Some(&text)),
            RegionContent::Markup(markup) => region.set_inner_html(&markup),
        }
        region.set_class_name(view.class_name());
    }
}

// ── Tabs ────────────────────────────────────────────────────────────

impl TabsPage for BrowserPage {
    fn has_tab_panel(&self, group: TabGroup, panel_id: &str) -> bool {
        self.document
            .get_element_by_id(panel_id)
            .is_some_and(|panel| panel.matches(group.panels_selector()).unwrap_or(false))
    }

    fn clear_active_tabs(&self, group: TabGroup) {
        let buttons = self.query_all(group.buttons_selector());
        let panels = self.query_all(group.panels_selector());
        for el in buttons.iter().chain(&panels) {
            let _ = el.class_list().remove_1(ACTIVE_CLASS);
        }
    }

    fn mark_tab_active(&self, group: TabGroup, id: &str) {
        if let Some(button) = self.query(&group.button_selector(&selectors::quote(id))) {
            let _ = button.class_list().add_1(ACTIVE_CLASS);
        }
        if let Some(panel) = self.document.get_element_by_id(&group.panel_id(id)) {
            let _ = panel.class_list().add_1(ACTIVE_CLASS);
        }
    }
}

// ── Toasts ──────────────────────────────────────────────────────────

impl ToastPage for BrowserPage {
    type Toast = HtmlElement;

    fn install_style_sheet(&self, id: &str, css: &str) -> bool {
        if self.document.get_element_by_id(id).is_some() {
            return false;
        }
        let installed = || -> Result<bool, JsValue> {
            let Some(head) = self.document.head() else {
                return Ok(false);
            };
            let style = self.document.create_element("style")?;
            style.set_id(id);
            style.set_text_content(Some(css));
            head.append_child(&style)?;
            Ok(true)
        };
        installed().unwrap_or_else(|e| {
            debug!(error = %describe(&e), "style sheet not installed");
            false
        })
    }

    fn mount_toast(&self, spec: &ToastSpec) -> Result<HtmlElement, CoreError> {
        let body = self.body()?;
        let toast: HtmlElement = self
            .document
            .create_element("div")
            .and_then(|el| el.dyn_into().map_err(JsValue::from))
            .map_err(|e| js_failure("toast", &e))?;
        toast.set_class_name(&spec.class_name());
        toast.set_text_content(Some(&spec.message));
        toast.style().set_css_text(&spec.inline_style());
        body.append_child(&toast)
            .map_err(|e| js_failure("toast", &e))?;
        Ok(toast)
    }

    fn start_toast_exit(&self, toast: &HtmlElement) {
        let _ = toast.style().set_property("animation", EXIT_ANIMATION);
    }

    fn remove_toast(&self, toast: HtmlElement) {
        toast.remove();
    }
}

// ── Copy buttons ────────────────────────────────────────────────────

impl CopyPage for BrowserPage {
    type Trigger = Element;

    fn preceding_text(&self, trigger: &Element) -> Option<String> {
        trigger
            .previous_element_sibling()
            .and_then(|code| code.text_content())
    }

    fn show_copy_feedback(&self, trigger: &Element, feedback: CopyFeedback) {
        trigger.set_text_content(Some(feedback.label()));
        let classes = trigger.class_list();
        let _ = if feedback.is_copied() {
            classes.add_1(CopyFeedback::COPIED_CLASS)
        } else {
            classes.remove_1(CopyFeedback::COPIED_CLASS)
        };
    }
}

// ── Diagrams ────────────────────────────────────────────────────────

impl DiagramPage for BrowserPage {
    fn has_diagram_renderer(&self) -> bool {
        self.global(MERMAID_GLOBAL).is_some()
    }

    fn initialize_diagrams(&self, theme: &DiagramTheme) -> Result<(), CoreError> {
        let json = serde_json::to_string(theme).map_err(|e| CoreError::Config {
            message: e.to_string(),
        })?;
        let config = JSON::parse(&json).map_err(|e| js_failure("diagram config", &e))?;
        self.call_global(MERMAID_GLOBAL, "initialize", &Array::of1(&config))?;
        Ok(())
    }

    fn render_diagrams(&self, selector: &str) -> Result<(), CoreError> {
        let nodes = self
            .document
            .query_selector_all(selector)
            .map_err(|e| js_failure("diagram nodes", &e))?;
        self.call_global(
            MERMAID_GLOBAL,
            "init",
            &Array::of2(&JsValue::UNDEFINED, &nodes),
        )?;
        Ok(())
    }
}

// ── Shortcut targets ────────────────────────────────────────────────

impl ShortcutPage for BrowserPage {
    fn click(&self, selector: &str) -> bool {
        match self.query(selector).and_then(|el| el.dyn_into::<HtmlElement>().ok()) {
            Some(control) => {
                control.click();
                true
            }
            None => false,
        }
    }
}

// ── Errors ──────────────────────────────────────────────────────────

/// Readable text of a thrown JS value.
pub(crate) fn describe(err: &JsValue) -> String {
    if let Some(text) = err.as_string() {
        return text;
    }
    if let Some(error) = err.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    format!("{err:?}")
}

fn js_failure(what: &str, err: &JsValue) -> CoreError {
    CoreError::PageUnavailable {
        what: format!("{what}: {}", describe(err)),
    }
}

fn unavailable(what: &str) -> CoreError {
    CoreError::PageUnavailable { what: what.into() }
}
