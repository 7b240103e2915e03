// ── Page bootstrap ──
//
// Turn what the server rendered into the page (embedded TOML block,
// `<meta name="labdash:api-url">`, the page origin) into a runtime
// configuration and an API base URL.

use labdash_config::{Config, ConfigError};
use labdash_core::DashboardConfig;
use url::Url;

/// Raw settings read from the document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageSettings {
    /// Text of `<script type="application/toml" id="labdash-config">`.
    pub embedded: Option<String>,
    /// Content of `<meta name="labdash:api-url">`.
    pub meta_api_url: Option<String>,
    /// `window.location.origin`.
    pub origin: Option<String>,
}

/// A configuration built from page settings, with whatever was ignored on
/// the way.
#[derive(Debug)]
pub struct Resolved {
    pub config: DashboardConfig,
    /// Settings rejected in favor of defaults. Reported by the caller once
    /// logging is up.
    pub ignored: Vec<ConfigError>,
}

/// Build the dashboard configuration.
///
/// Priority for the API base: meta tag, then the embedded `api_base`, then
/// the page origin (applied in [`api_base`]). A malformed embedded block
/// falls back to defaults; an invalid meta URL is skipped on its own.
pub fn resolve(settings: &PageSettings) -> Resolved {
    let mut ignored = Vec::new();
    let mut config = match settings.embedded.as_deref().map(labdash_config::load_from_str) {
        Some(Ok(config)) => config,
        Some(Err(e)) => {
            ignored.push(e);
            Config::default()
        }
        None => Config::default(),
    };

    if let Some(meta) = non_empty(settings.meta_api_url.as_deref()) {
        match labdash_config::parse_api_base(meta) {
            Ok(_) => config.api_base = Some(meta.to_owned()),
            Err(e) => ignored.push(e),
        }
    }

    let config = config.to_dashboard_config().unwrap_or_else(|e| {
        ignored.push(e);
        DashboardConfig::default()
    });
    Resolved { config, ignored }
}

/// Base URL the API client talks to.
pub fn api_base(config: &DashboardConfig, origin: Option<&str>) -> Result<Url, ConfigError> {
    if let Some(base) = &config.api_base {
        return Ok(base.clone());
    }
    let origin = non_empty(origin).ok_or_else(|| ConfigError::Validation {
        field: "api_base".into(),
        reason: "no API base configured and the page has no origin".into(),
    })?;
    Url::parse(origin).map_err(|e| ConfigError::Validation {
        field: "api_base".into(),
        reason: format!("{e}: {origin}"),
    })
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use labdash_core::PollingStrategy;
    use pretty_assertions::assert_eq;

    use super::*;

    fn settings(embedded: Option<&str>, meta: Option<&str>) -> PageSettings {
        PageSettings {
            embedded: embedded.map(str::to_owned),
            meta_api_url: meta.map(str::to_owned),
            origin: Some("http://lab.local:3000".into()),
        }
    }

    #[test]
    fn bare_page_uses_defaults_and_origin() {
        let s = settings(None, None);
        let Resolved { config, ignored } = resolve(&s);
        assert!(ignored.is_empty());
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(
            api_base(&config, s.origin.as_deref()).unwrap().as_str(),
            "http://lab.local:3000/"
        );
    }

    #[test]
    fn embedded_block_selects_strategy() {
        let config = resolve(&settings(
            Some("[polling]\nstrategy = \"delegate-refresh\"\n"),
            None,
        ))
        .config;
        assert_eq!(
            config.polling,
            PollingStrategy::DelegateRefresh {
                interval: Duration::from_secs(30),
                event_name: "refresh".into(),
            }
        );
    }

    #[test]
    fn meta_tag_wins_over_embedded_base() {
        let config = resolve(&settings(
            Some("api_base = \"http://embedded:1\"\n"),
            Some("http://meta:2/lab"),
        ))
        .config;
        assert_eq!(
            api_base(&config, None).unwrap().as_str(),
            "http://meta:2/lab"
        );
    }

    #[test]
    fn broken_embedded_block_falls_back() {
        let broken = resolve(&settings(Some("polling = ["), Some("  ")));
        assert_eq!(broken.config, DashboardConfig::default());
        assert_eq!(broken.ignored.len(), 1);

        let invalid = resolve(&settings(Some("[timings]\ntoast_duration_ms = 0\n"), None));
        assert_eq!(invalid.config, DashboardConfig::default());
        assert!(matches!(
            invalid.ignored.as_slice(),
            [ConfigError::Validation { field, .. }] if field == "timings.toast_duration_ms"
        ));
    }

    #[test]
    fn non_http_meta_url_is_rejected() {
        let resolved = resolve(&settings(None, Some("ftp://lab")));
        assert!(resolved.config.api_base.is_none());
        assert_eq!(resolved.ignored.len(), 1);
    }

    #[test]
    fn bad_meta_url_keeps_embedded_settings() {
        let embedded = "[polling]\nstrategy = \"delegate-refresh\"\n";
        for meta in ["ftp://lab", "/lab"] {
            let Resolved { config, ignored } = resolve(&settings(Some(embedded), Some(meta)));
            assert_eq!(
                config.polling,
                PollingStrategy::DelegateRefresh {
                    interval: Duration::from_secs(30),
                    event_name: "refresh".into(),
                },
                "meta {meta:?}"
            );
            assert!(config.api_base.is_none());
            assert!(matches!(
                ignored.as_slice(),
                [ConfigError::Validation { field, .. }] if field == "api_base"
            ));
        }
    }

    #[test]
    fn bad_meta_url_keeps_embedded_base() {
        let config = resolve(&settings(
            Some("api_base = \"http://embedded:1\"\n"),
            Some("ftp://lab"),
        ))
        .config;
        assert_eq!(
            api_base(&config, None).unwrap().as_str(),
            "http://embedded:1/"
        );
    }

    #[test]
    fn missing_origin_is_an_error() {
        let err = api_base(&DashboardConfig::default(), None).unwrap_err();
        assert!(matches!(err, ConfigError::Validation { ref field, .. } if field == "api_base"));
    }
}
