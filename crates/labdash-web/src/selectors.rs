// ── Document selectors ──
//
// Selectors and class names of the server-rendered markup the browser page
// reads and mutates.

/// Container row, keyed by container name.
pub fn row(name: &str) -> String {
    format!("tr[data-container=\"{}\"]", quote(name))
}

/// Status cell of a row (third column).
pub const STATUS_CELL: &str = "td:nth-child(3)";

/// Action cell of a row (fourth column).
pub const ACTION_CELL: &str = "td:nth-child(4)";

/// Primary action button inside the action cell. `neutral` buttons (logs,
/// shell) keep their markup.
pub const ACTION_BUTTON: &str = ".btn:not(.neutral)";

/// Body class htmx sets while a request is in flight.
pub const SWAP_IN_FLIGHT_CLASS: &str = "htmx-request";

/// Class toggled on active tab buttons and panels.
pub const ACTIVE_CLASS: &str = "active";

/// Embedded configuration block.
pub fn config_block() -> String {
    format!(
        "script[type=\"{}\"]#{}",
        labdash_config::EMBED_MIME_TYPE,
        labdash_config::EMBED_ELEMENT_ID
    )
}

/// API base override.
pub fn api_url_meta() -> String {
    format!("meta[name=\"{}\"]", labdash_config::API_URL_META)
}

/// Escape a value for a double-quoted attribute selector.
pub fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '"' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
