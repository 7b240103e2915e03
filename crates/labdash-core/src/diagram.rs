// ── Diagram renderer integration ──
//
// Mermaid is an optional page capability. Without it both hooks are
// no-ops.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::page::DiagramPage;

/// Selector of the elements re-rendered after a partial swap.
pub const DIAGRAM_SELECTOR: &str = ".mermaid";

/// Renderer configuration, serialized in the renderer's own key style.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagramTheme {
    pub start_on_load: bool,
    pub theme: String,
    pub theme_variables: ThemeVariables,
}

/// Fixed dark palette.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeVariables {
    pub primary_color: String,
    pub primary_text_color: String,
    pub primary_border_color: String,
    pub line_color: String,
    pub secondary_color: String,
    pub tertiary_color: String,
}

impl Default for DiagramTheme {
    fn default() -> Self {
        Self {
            start_on_load: true,
            theme: "dark".into(),
            theme_variables: ThemeVariables::default(),
        }
    }
}

impl Default for ThemeVariables {
    fn default() -> Self {
        Self {
            primary_color: "#3b82f6".into(),
            primary_text_color: "#f0f0f0".into(),
            primary_border_color: "#1e3a5f".into(),
            line_color: "#888".into(),
            secondary_color: "#1a1a2e".into(),
            tertiary_color: "#0f0f1a".into(),
        }
    }
}

/// Initialize the renderer on page load. Returns whether it ran.
pub fn init<P: DiagramPage + ?Sized>(page: &P, theme: &DiagramTheme) -> bool {
    if !page.has_diagram_renderer() {
        debug!("no diagram renderer on page");
        return false;
    }
    match page.initialize_diagrams(theme) {
        Ok(()) => true,
        Err(e) => {
            warn!(error = %e, "diagram renderer initialization failed");
            false
        }
    }
}

/// Re-render diagrams after a partial swap. Returns whether it ran.
pub fn after_swap<P: DiagramPage + ?Sized>(page: &P) -> bool {
    if !page.has_diagram_renderer() {
        return false;
    }
    match page.render_diagrams(DIAGRAM_SELECTOR) {
        Ok(()) => true,
        Err(e) => {
            warn!(error = %e, "diagram re-render failed");
            false
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::page::HeadlessPage;

    #[test]
    fn theme_serializes_in_renderer_keys() {
        let json = serde_json::to_value(DiagramTheme::default()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "startOnLoad": true,
                "theme": "dark",
                "themeVariables": {
                    "primaryColor": "#3b82f6",
                    "primaryTextColor": "#f0f0f0",
                    "primaryBorderColor": "#1e3a5f",
                    "lineColor": "#888",
                    "secondaryColor": "#1a1a2e",
                    "tertiaryColor": "#0f0f1a"
                }
            })
        );
    }

    #[test]
    fn hooks_are_no_ops_without_renderer() {
        let page = HeadlessPage::new();
        assert!(!init(&page, &DiagramTheme::default()));
        assert!(!after_swap(&page));
    }

    #[test]
    fn hooks_drive_renderer_when_present() {
        let page = HeadlessPage::new().with_diagram_renderer();
        assert!(init(&page, &DiagramTheme::default()));
        assert!(after_swap(&page));
        assert!(after_swap(&page));
        let diagrams = page.diagrams().unwrap();
        assert_eq!(diagrams.initialized, Some(DiagramTheme::default()));
        assert_eq!(diagrams.renders, 2);
    }
}
