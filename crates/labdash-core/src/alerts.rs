// ── Alerts loader ──
//
// Fetches one source's feed and renders it into that source's content
// region. No guard against overlapping loads: the last response to
// resolve wins.

use tracing::debug;

use crate::api::LabApi;
use crate::model::{AlertFeed, AlertSource, Severity};
use crate::page::AlertsPage;

/// Placeholder shown while a feed is being fetched.
pub const LOADING_TEXT: &str = "Loading...";

/// Placeholder shown for an empty feed.
pub const EMPTY_TEXT: &str = "No alerts detected.\n\n\
Run a scan against the target to generate alerts:\n\
nmap -sS -p 21,22,80 <target_ip>";

const BASE_CLASS: &str = "alerts-content";
const LOADING_CLASS: &str = "alerts-content loading";
const ERROR_CLASS: &str = "alerts-content error";

/// What a content region should hold: plain text, or trusted markup built
/// from escaped lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegionContent {
    Text(String),
    Markup(String),
}

/// Visible state of one source's content region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlertsView {
    Loading,
    /// The backend answered with an error for this source.
    Unavailable { source: AlertSource, message: String },
    Empty,
    /// Rendered markup of the alert lines.
    Lines(String),
    /// The fetch itself failed (network or body).
    ConnectionError(String),
}

impl AlertsView {
    pub fn from_feed(source: AlertSource, feed: AlertFeed) -> Self {
        match feed {
            AlertFeed::Unavailable(message) => Self::Unavailable { source, message },
            AlertFeed::Lines(lines) if lines.is_empty() => Self::Empty,
            AlertFeed::Lines(lines) => Self::Lines(render_lines(&lines)),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Unavailable { .. } | Self::ConnectionError(_))
    }

    /// Full class attribute of the region.
    pub fn class_name(&self) -> &'static str {
        match self {
            Self::Loading => LOADING_CLASS,
            _ if self.is_error() => ERROR_CLASS,
            _ => BASE_CLASS,
        }
    }

    pub fn content(&self) -> RegionContent {
        match self {
            Self::Loading => RegionContent::Text(LOADING_TEXT.into()),
            Self::Unavailable { source, message } => RegionContent::Text(format!(
                "Error: {message}\n\nMake sure the {} container is running.",
                source.process_name()
            )),
            Self::Empty => RegionContent::Text(EMPTY_TEXT.into()),
            Self::Lines(markup) => RegionContent::Markup(markup.clone()),
            Self::ConnectionError(reason) => {
                RegionContent::Text(format!("Connection error: {reason}"))
            }
        }
    }
}

/// Escape text for inclusion in HTML element content or attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    escape_html_into(&mut out, text);
    out
}

fn escape_html_into(out: &mut String, s: &str) {
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
}

/// Render lines as severity spans joined with `\n`.
pub fn render_lines(lines: &[String]) -> String {
    let mut out = String::new();
    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let class = Severity::classify(line).css_class();
        out.push_str("<span class=\"");
        out.push_str(class);
        out.push_str("\">");
        escape_html_into(&mut out, line);
        out.push_str("</span>");
    }
    out
}

/// Load `source`'s feed into its content region.
///
/// A page without a region for the source is left alone and no request
/// is made.
pub async fn load<P, A>(page: &P, api: &A, source: AlertSource)
where
    P: AlertsPage + ?Sized,
    A: LabApi + ?Sized,
{
    if !page.has_alerts_region(source) {
        debug!(%source, "no alerts region on page");
        return;
    }
    page.show_alerts(source, &AlertsView::Loading);

    let view = match api.alerts(source).await {
        Ok(feed) => AlertsView::from_feed(source, feed),
        Err(e) => {
            debug!(%source, error = %e, "alert fetch failed");
            AlertsView::ConnectionError(e.to_string())
        }
    };
    page.show_alerts(source, &view);
}
