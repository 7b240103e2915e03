// Wire types for the commander JSON endpoints.
//
// These mirror the server's JSON exactly; `labdash-core` converts them
// into domain types.

use serde::{Deserialize, Serialize};

/// One entry of `GET /api/status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusRecord {
    /// Container name, unique across the lab.
    pub name: String,
    /// Full container id.
    pub id: String,
    /// Free-text runtime status (e.g. `"Up 3 minutes"`, `"Exited (0) 2 hours ago"`).
    pub status: String,
}

/// Raw body of `GET /api/alerts/{source}`.
///
/// The server answers either `{ "error": "..." }` or `{ "alerts": [...] }`.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct AlertsResponse {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub alerts: Option<Vec<String>>,
}

/// Decoded alert feed for one IDS source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlertFeed {
    /// The backend reported an error (typically: the IDS container is down).
    Unavailable(String),
    /// Raw log lines, oldest first.
    Lines(Vec<String>),
}

impl AlertsResponse {
    /// Collapse the two response shapes. A non-empty `error` wins; an
    /// answer with neither field is malformed and returns `None`.
    pub(crate) fn into_feed(self) -> Option<AlertFeed> {
        match (self.error, self.alerts) {
            (Some(err), _) if !err.is_empty() => Some(AlertFeed::Unavailable(err)),
            (_, Some(lines)) => Some(AlertFeed::Lines(lines)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> Option<AlertFeed> {
        serde_json::from_str::<AlertsResponse>(body)
            .ok()
            .and_then(AlertsResponse::into_feed)
    }

    #[test]
    fn error_field_wins_over_alerts() {
        assert_eq!(
            parse(r#"{"error":"no container","alerts":["x"]}"#),
            Some(AlertFeed::Unavailable("no container".into()))
        );
    }

    #[test]
    fn empty_error_falls_through_to_alerts() {
        assert_eq!(
            parse(r#"{"error":"","alerts":[]}"#),
            Some(AlertFeed::Lines(vec![]))
        );
    }

    #[test]
    fn missing_both_fields_is_malformed() {
        assert_eq!(parse("{}"), None);
        assert_eq!(parse(r#"{"error":""}"#), None);
    }
}
