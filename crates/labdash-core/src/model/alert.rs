// ── Alert domain types ──

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// One of the IDS backends whose alert feed the dashboard can show.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AlertSource {
    #[default]
    Snort,
    Suricata,
    Zeek,
}

impl AlertSource {
    /// All sources in tab order. The first one is auto-loaded on page load.
    pub const ALL: [AlertSource; 3] = [Self::Snort, Self::Suricata, Self::Zeek];

    /// Identifier used in URLs and element ids.
    pub fn id(self) -> &'static str {
        match self {
            Self::Snort => "snort",
            Self::Suricata => "suricata",
            Self::Zeek => "zeek",
        }
    }

    /// Name of the container expected to produce this feed.
    pub fn process_name(self) -> String {
        format!("{}_ids", self.id())
    }

    /// `id` of the source's panel.
    pub fn panel_id(self) -> String {
        format!("alerts-{}", self.id())
    }

    /// `id` of the source's content region.
    pub fn content_id(self) -> String {
        format!("alerts-content-{}", self.id())
    }
}

/// Severity bucket of a single alert line. Derived at render time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    High,
    Medium,
    Plain,
}

const HIGH_MARKERS: [&str; 3] = ["Priority: 1", "CRITICAL", "high"];
const MEDIUM_MARKERS: [&str; 3] = ["Priority: 2", "WARNING", "medium"];

impl Severity {
    /// Classify a raw log line. High markers take priority over medium ones.
    pub fn classify(line: &str) -> Self {
        if HIGH_MARKERS.iter().any(|m| line.contains(m)) {
            Self::High
        } else if MEDIUM_MARKERS.iter().any(|m| line.contains(m)) {
            Self::Medium
        } else {
            Self::Plain
        }
    }

    /// CSS class of the wrapping span.
    pub fn css_class(self) -> &'static str {
        match self {
            Self::High => "alert-priority-high",
            Self::Medium => "alert-priority-medium",
            Self::Plain => "alert-line",
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn source_ids_round_trip_through_strum() {
        for source in AlertSource::ALL {
            assert_eq!(source.id().parse::<AlertSource>().unwrap(), source);
            assert_eq!(source.to_string(), source.id());
        }
        assert!("bro".parse::<AlertSource>().is_err());
    }

    #[test]
    fn element_ids() {
        assert_eq!(AlertSource::Suricata.panel_id(), "alerts-suricata");
        assert_eq!(AlertSource::Zeek.content_id(), "alerts-content-zeek");
        assert_eq!(AlertSource::Snort.process_name(), "snort_ids");
    }

    #[test]
    fn classify_priority_order() {
        assert_eq!(Severity::classify("[Priority: 1] SCAN"), Severity::High);
        assert_eq!(Severity::classify("CRITICAL: fragment overlap"), Severity::High);
        assert_eq!(Severity::classify("severity=high"), Severity::High);
        // A line with both markers is high.
        assert_eq!(Severity::classify("WARNING escalated to CRITICAL"), Severity::High);
        assert_eq!(Severity::classify("[Priority: 2] ICMP"), Severity::Medium);
        assert_eq!(Severity::classify("WARNING: weird"), Severity::Medium);
        assert_eq!(Severity::classify("severity=medium"), Severity::Medium);
        assert_eq!(Severity::classify("[Priority: 3] info"), Severity::Plain);
        // Markers are case-sensitive.
        assert_eq!(Severity::classify("critical"), Severity::Plain);
    }
}
