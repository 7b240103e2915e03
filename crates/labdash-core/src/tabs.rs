// ── Tab controller ──

use tracing::debug;

use crate::page::TabsPage;

/// An independent set of tab buttons and panels. Activation in one group
/// never touches the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum TabGroup {
    /// Top-level dashboard tabs (`.tab` / `.tab-content`).
    Page,
    /// Alert source tabs (`.alerts-tabs .tab` / `.alerts-panel`).
    AlertSource,
}

impl TabGroup {
    /// `id` of the panel a tab id activates.
    pub fn panel_id(self, id: &str) -> String {
        match self {
            Self::Page => id.to_owned(),
            Self::AlertSource => format!("alerts-{id}"),
        }
    }

    /// Selector matching every button of the group.
    pub fn buttons_selector(self) -> &'static str {
        match self {
            Self::Page => ".tab[data-tab], .tab[onclick^=\"showTab(\"]",
            Self::AlertSource => ".alerts-tabs .tab[data-source]",
        }
    }

    /// Selector matching the button for `id`.
    pub fn button_selector(self, id: &str) -> String {
        match self {
            Self::Page => format!(".tab[data-tab=\"{id}\"], .tab[onclick=\"showTab('{id}')\"]"),
            Self::AlertSource => format!(".alerts-tabs .tab[data-source=\"{id}\"]"),
        }
    }

    /// Selector matching every panel of the group.
    pub fn panels_selector(self) -> &'static str {
        match self {
            Self::Page => ".tab-content",
            Self::AlertSource => ".alerts-panel",
        }
    }
}

/// Make `id` the single active tab of `group`.
///
/// Returns `false` and leaves the group untouched when no panel matches.
pub fn activate<P: TabsPage + ?Sized>(page: &P, group: TabGroup, id: &str) -> bool {
    let panel = group.panel_id(id);
    if !page.has_tab_panel(group, &panel) {
        debug!(%group, id, "no panel for tab");
        return false;
    }
    page.clear_active_tabs(group);
    page.mark_tab_active(group, id);
    true
}
