//! Configuration for the IDS Lab Commander dashboard.
//!
//! A small TOML document, layered with `figment` over built-in defaults,
//! validated, and translated to `labdash_core::DashboardConfig`. The
//! server embeds the document in the page (see [`render_embed`]); the
//! browser entry reads it back with [`load_from_str`]. Native tools load
//! it from a file with `LABDASH_` environment overrides.

use std::path::Path;
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;
use url::Url;

use labdash_core::config::{
    ALERT_AUTO_LOAD_DELAY_MS, COPY_REVERT_DELAY_MS, DELEGATE_POLL_INTERVAL_MS, LOG_FILTER,
    POLL_INTERVAL_MS, REFRESH_EVENT, STATUS_ENDPOINT, TOAST_DURATION_MS, TOAST_EXIT_MS,
};
use labdash_core::{DashboardConfig, DiagramTheme, PollingStrategy, Timings};

/// `id` of the `<script>` element carrying the embedded document.
pub const EMBED_ELEMENT_ID: &str = "labdash-config";
/// MIME type of the embedded document.
pub const EMBED_MIME_TYPE: &str = "application/toml";
/// `<meta>` name that overrides `api_base` from the page head.
pub const API_URL_META: &str = "labdash:api-url";
/// Prefix of environment overrides; nested keys use `__`
/// (`LABDASH_POLLING__INTERVAL_MS`).
pub const ENV_PREFIX: &str = "LABDASH_";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

impl ConfigError {
    fn invalid(field: &str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Commander root URL. Unset means the page's own origin.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,

    /// `tracing` filter directive for the browser console.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    #[serde(default)]
    pub polling: Polling,

    #[serde(default)]
    pub timings: TimingsConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: None,
            log_filter: default_log_filter(),
            polling: Polling::default(),
            timings: TimingsConfig::default(),
        }
    }
}

fn default_log_filter() -> String {
    LOG_FILTER.into()
}

/// Which polling strategy a deployment uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    #[default]
    SelfFetch,
    DelegateRefresh,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Polling {
    #[serde(default)]
    pub strategy: Strategy,

    /// Tick period. Unset picks the strategy's default (3 s self-fetch,
    /// 30 s delegate-refresh).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval_ms: Option<u64>,

    /// Status endpoint (self-fetch only).
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Body event name (delegate-refresh only).
    #[serde(default = "default_event_name")]
    pub event_name: String,
}

impl Default for Polling {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            interval_ms: None,
            endpoint: default_endpoint(),
            event_name: default_event_name(),
        }
    }
}

fn default_endpoint() -> String {
    STATUS_ENDPOINT.into()
}
fn default_event_name() -> String {
    REFRESH_EVENT.into()
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TimingsConfig {
    #[serde(default = "default_toast_duration")]
    pub toast_duration_ms: u64,
    #[serde(default = "default_toast_exit")]
    pub toast_exit_ms: u64,
    #[serde(default = "default_copy_revert_delay")]
    pub copy_revert_delay_ms: u64,
    #[serde(default = "default_alert_auto_load_delay")]
    pub alert_auto_load_delay_ms: u64,
}

impl Default for TimingsConfig {
    fn default() -> Self {
        Self {
            toast_duration_ms: TOAST_DURATION_MS,
            toast_exit_ms: TOAST_EXIT_MS,
            copy_revert_delay_ms: COPY_REVERT_DELAY_MS,
            alert_auto_load_delay_ms: ALERT_AUTO_LOAD_DELAY_MS,
        }
    }
}

fn default_toast_duration() -> u64 {
    TOAST_DURATION_MS
}
fn default_toast_exit() -> u64 {
    TOAST_EXIT_MS
}
fn default_copy_revert_delay() -> u64 {
    COPY_REVERT_DELAY_MS
}
fn default_alert_auto_load_delay() -> u64 {
    ALERT_AUTO_LOAD_DELAY_MS
}

// ── Config loading ──────────────────────────────────────────────────

/// Load a config from a TOML document layered over the defaults.
///
/// This is the browser path: no files, no environment.
pub fn load_from_str(document: &str) -> Result<Config, ConfigError> {
    let config: Config = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::string(document))
        .extract()?;
    config.validate()?;
    Ok(config)
}

/// Load a config from a TOML file, then `LABDASH_*` environment overrides.
pub fn load_from_file(path: &Path) -> Result<Config, ConfigError> {
    let document = std::fs::read_to_string(path)?;
    debug!(path = %path.display(), "loading dashboard config");
    let config: Config = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::string(&document))
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
        .extract()?;
    config.validate()?;
    Ok(config)
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write it to `path`.
pub fn save(path: &Path, cfg: &Config) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, toml::to_string_pretty(cfg)?)?;
    Ok(())
}

/// Render the config as the `<script>` block the server template embeds.
pub fn render_embed(cfg: &Config) -> Result<String, ConfigError> {
    let document = toml::to_string_pretty(cfg)?;
    if document.contains("</") {
        return Err(ConfigError::invalid(
            "config",
            "values must not contain `</` when embedded in a page",
        ));
    }
    Ok(format!(
        "<script type=\"{EMBED_MIME_TYPE}\" id=\"{EMBED_ELEMENT_ID}\">\n{document}</script>"
    ))
}

// ── Validation and translation ──────────────────────────────────────

impl Config {
    /// Check every field that the runtime cannot recover from.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(base) = &self.api_base {
            parse_api_base(base)?;
        }

        if self.polling.interval_ms == Some(0) {
            return Err(ConfigError::invalid(
                "polling.interval_ms",
                "must be greater than zero",
            ));
        }
        match self.polling.strategy {
            Strategy::SelfFetch if self.polling.endpoint.trim().is_empty() => {
                return Err(ConfigError::invalid("polling.endpoint", "must not be empty"));
            }
            Strategy::DelegateRefresh if self.polling.event_name.trim().is_empty() => {
                return Err(ConfigError::invalid("polling.event_name", "must not be empty"));
            }
            _ => {}
        }

        let t = &self.timings;
        for (field, value) in [
            ("timings.toast_duration_ms", t.toast_duration_ms),
            ("timings.toast_exit_ms", t.toast_exit_ms),
            ("timings.copy_revert_delay_ms", t.copy_revert_delay_ms),
            ("timings.alert_auto_load_delay_ms", t.alert_auto_load_delay_ms),
        ] {
            if value == 0 {
                return Err(ConfigError::invalid(field, "must be greater than zero"));
            }
        }
        Ok(())
    }

    /// Validate and build the runtime configuration.
    pub fn to_dashboard_config(&self) -> Result<DashboardConfig, ConfigError> {
        self.validate()?;

        let api_base = self.api_base.as_deref().map(parse_api_base).transpose()?;
        let polling = match self.polling.strategy {
            Strategy::SelfFetch => PollingStrategy::SelfFetch {
                interval: Duration::from_millis(
                    self.polling.interval_ms.unwrap_or(POLL_INTERVAL_MS),
                ),
                endpoint: self.polling.endpoint.clone(),
            },
            Strategy::DelegateRefresh => PollingStrategy::DelegateRefresh {
                interval: Duration::from_millis(
                    self.polling.interval_ms.unwrap_or(DELEGATE_POLL_INTERVAL_MS),
                ),
                event_name: self.polling.event_name.clone(),
            },
        };
        let t = &self.timings;

        Ok(DashboardConfig {
            api_base,
            polling,
            timings: Timings {
                toast_duration: Duration::from_millis(t.toast_duration_ms),
                toast_exit: Duration::from_millis(t.toast_exit_ms),
                copy_revert_delay: Duration::from_millis(t.copy_revert_delay_ms),
                alert_auto_load_delay: Duration::from_millis(t.alert_auto_load_delay_ms),
            },
            diagram: DiagramTheme::default(),
            log_filter: self.log_filter.clone(),
        })
    }
}

/// Parse an API base URL, accepting only `http` and `https`.
pub fn parse_api_base(raw: &str) -> Result<Url, ConfigError> {
    let url =
        Url::parse(raw).map_err(|e| ConfigError::invalid("api_base", format!("{e}: {raw}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::invalid(
            "api_base",
            format!("expected an http(s) URL, got '{raw}'"),
        ));
    }
    Ok(url)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let cfg = load_from_str("").unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.to_dashboard_config().unwrap().polling, PollingStrategy::default());
    }

    #[test]
    fn delegate_strategy_uses_its_own_default_interval() {
        let cfg = load_from_str(
            r#"
            [polling]
            strategy = "delegate-refresh"
            "#,
        )
        .unwrap();
        let runtime = cfg.to_dashboard_config().unwrap();
        assert_eq!(runtime.polling, PollingStrategy::delegate_refresh());
    }

    #[test]
    fn zero_interval_is_rejected() {
        let err = load_from_str("[polling]\ninterval_ms = 0\n").unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation { ref field, .. } if field == "polling.interval_ms"),
            "{err}"
        );
    }

    #[test]
    fn zero_duration_is_rejected() {
        let err = load_from_str("[timings]\ncopy_revert_delay_ms = 0\n").unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid timings.copy_revert_delay_ms: must be greater than zero"
        );
    }

    #[test]
    fn empty_event_name_only_matters_for_delegate() {
        assert!(load_from_str("[polling]\nevent_name = \"\"\n").is_ok());
        let err = load_from_str("[polling]\nstrategy = \"delegate-refresh\"\nevent_name = \" \"\n")
            .unwrap_err();
        assert!(matches!(err, ConfigError::Validation { .. }));
    }

    #[test]
    fn api_base_must_be_http() {
        assert!(load_from_str("api_base = \"http://localhost:3000\"").is_ok());
        assert!(load_from_str("api_base = \"not a url\"").is_err());
        assert!(load_from_str("api_base = \"ftp://lab\"").is_err());
    }

    #[test]
    fn wrong_types_surface_as_figment_errors() {
        let err = load_from_str("[polling]\ninterval_ms = \"fast\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Figment(_)));
    }

    #[test]
    fn embed_round_trips_through_loader() {
        let cfg = Config {
            api_base: Some("http://commander:3000".into()),
            polling: Polling {
                interval_ms: Some(5_000),
                ..Polling::default()
            },
            ..Config::default()
        };
        let block = render_embed(&cfg).unwrap();
        assert!(block.starts_with("<script type=\"application/toml\" id=\"labdash-config\">\n"));
        assert!(block.ends_with("</script>"));

        let inner = block
            .trim_start_matches(|c| c != '\n')
            .trim_end_matches("</script>");
        assert_eq!(load_from_str(inner).unwrap(), cfg);
    }

    #[test]
    fn embed_refuses_closing_tags() {
        let cfg = Config {
            log_filter: "</script><script>alert(1)".into(),
            ..Config::default()
        };
        assert!(matches!(
            render_embed(&cfg),
            Err(ConfigError::Validation { .. })
        ));
    }
}
