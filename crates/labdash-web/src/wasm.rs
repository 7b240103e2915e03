// ── wasm-bindgen entry ──
//
// One dashboard per document, held in a thread-local slot. The exported
// functions are the names the server markup calls from `onclick`
// attributes; async work is handed to `spawn_local`.

use std::cell::RefCell;
use std::fmt::Display;
use std::rc::Rc;

use labdash_api::{Client, TransportConfig};
use labdash_core::{AlertSource, Dashboard, KeyChord, ToastLevel};
use tracing::{debug, info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, Event, EventTarget, KeyboardEvent};

use crate::bootstrap;
use crate::browser::BrowserPage;
use crate::clipboard::BrowserClipboard;
use crate::logging;

type BrowserDashboard = Dashboard<BrowserPage, Client>;

thread_local! {
    static DASHBOARD: RefCell<Option<Rc<BrowserDashboard>>> = const { RefCell::new(None) };
    static LISTENERS: RefCell<Vec<Closure<dyn FnMut(Event)>>> = const { RefCell::new(Vec::new()) };
}

/// Module start: read the page settings, build the dashboard and hook the
/// document events. Widgets start once the DOM is ready.
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let page = BrowserPage::new(window).map_err(|e| to_js(&e))?;
    let settings = page.read_settings();
    let resolved = bootstrap::resolve(&settings);
    let config = resolved.config;

    logging::init(&config.log_filter);
    for e in &resolved.ignored {
        warn!(error = %e, "ignoring dashboard setting");
    }

    let base = bootstrap::api_base(&config, settings.origin.as_deref()).map_err(|e| to_js(&e))?;
    let api = Client::new(base, &TransportConfig::default()).map_err(|e| to_js(&e))?;
    info!(base = %api.base_url(), "dashboard starting");

    let document = page.document().clone();
    let session = Rc::new(Dashboard::new(page, api, config));
    DASHBOARD.with(|slot| *slot.borrow_mut() = Some(session));

    listen(&document, "keydown", on_key_down)?;
    listen(&document, "htmx:afterSwap", |_| {
        if let Some(d) = dashboard() {
            d.after_swap();
        }
    })?;

    if document.ready_state() == "loading" {
        listen(&document, "DOMContentLoaded", |_| on_ready())?;
    } else {
        on_ready();
    }
    Ok(())
}

/// DOM ready: styles, diagrams, status polling and the first alert feed.
fn on_ready() {
    let Some(d) = dashboard() else {
        return;
    };
    d.init();
    if let Some(poll) = d.start_polling() {
        spawn_local(poll);
    }
    spawn_local(async move { d.auto_load_alerts().await });
}

fn on_key_down(event: Event) {
    let Some(key) = event.dyn_ref::<KeyboardEvent>() else {
        return;
    };
    let chord = KeyChord::new(key.key(), key.ctrl_key());
    if dashboard().is_some_and(|d| d.handle_key(&chord)) {
        event.prevent_default();
    }
}

// ── Exports ─────────────────────────────────────────────────────────

#[wasm_bindgen(js_name = showTab)]
pub fn show_tab(id: &str) -> bool {
    dashboard().is_some_and(|d| d.show_tab(id))
}

#[wasm_bindgen(js_name = showAlertTab)]
pub fn show_alert_tab(source: &str) {
    let (Some(d), Some(source)) = (dashboard(), parse_source(source)) else {
        return;
    };
    spawn_local(async move { d.show_alert_tab(source).await });
}

#[wasm_bindgen(js_name = loadAlerts)]
pub fn load_alerts(source: &str) {
    let (Some(d), Some(source)) = (dashboard(), parse_source(source)) else {
        return;
    };
    spawn_local(async move { d.load_alerts(source).await });
}

#[wasm_bindgen(js_name = refreshAlerts)]
pub fn refresh_alerts() {
    if let Some(d) = dashboard() {
        spawn_local(async move { d.refresh_alerts().await });
    }
}

#[wasm_bindgen(js_name = copyCode)]
pub fn copy_code(button: Element) {
    let (Some(d), Some(window)) = (dashboard(), web_sys::window()) else {
        return;
    };
    let clipboard = BrowserClipboard::new(window);
    spawn_local(async move {
        // Failures are already shown on the button.
        let _ = d.copy_code(&clipboard, &button).await;
    });
}

#[wasm_bindgen(js_name = showToast)]
#[allow(clippy::needless_pass_by_value)]
pub fn show_toast(message: &str, level: Option<String>) {
    let Some(d) = dashboard() else {
        return;
    };
    let level = level.as_deref().map(ToastLevel::parse_lossy).unwrap_or_default();
    let message = message.to_owned();
    spawn_local(async move {
        if let Err(e) = d.show_toast(&message, level).await {
            warn!(error = %e, "toast not shown");
        }
    });
}

#[wasm_bindgen(js_name = startAutoRefresh)]
pub fn start_auto_refresh() -> bool {
    match dashboard().and_then(|d| d.start_polling()) {
        Some(poll) => {
            spawn_local(poll);
            true
        }
        None => false,
    }
}

#[wasm_bindgen(js_name = stopAutoRefresh)]
pub fn stop_auto_refresh() -> bool {
    dashboard().is_some_and(|d| d.stop_polling())
}

// ── Helpers ─────────────────────────────────────────────────────────

fn dashboard() -> Option<Rc<BrowserDashboard>> {
    let d = DASHBOARD.with(|slot| slot.borrow().clone());
    if d.is_none() {
        debug!("dashboard not started");
    }
    d
}

fn parse_source(raw: &str) -> Option<AlertSource> {
    match raw.parse() {
        Ok(source) => Some(source),
        Err(_) => {
            warn!(source = raw, "unknown alert source");
            None
        }
    }
}

/// Attach a handler for the page lifetime.
fn listen(
    target: &EventTarget,
    name: &str,
    handler: impl FnMut(Event) + 'static,
) -> Result<(), JsValue> {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())?;
    LISTENERS.with(|listeners| listeners.borrow_mut().push(closure));
    Ok(())
}

fn to_js(err: &impl Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}
