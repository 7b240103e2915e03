#![allow(clippy::unwrap_used)]

use std::time::Duration;

use figment::Jail;
use pretty_assertions::assert_eq;

use labdash_config::{Config, ConfigError, Strategy, load_from_file, save};
use labdash_core::PollingStrategy;

// ── Helpers ─────────────────────────────────────────────────────────

const LAB_CONFIG: &str = r#"
api_base = "http://localhost:3000"
log_filter = "labdash=debug"

[polling]
strategy = "self-fetch"
interval_ms = 2000

[timings]
toast_duration_ms = 5000
"#;

// ── File loading ────────────────────────────────────────────────────

#[test]
fn file_values_layer_over_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dashboard.toml");
    std::fs::write(&path, LAB_CONFIG).unwrap();

    let cfg = load_from_file(&path).unwrap();
    assert_eq!(cfg.log_filter, "labdash=debug");
    assert_eq!(cfg.polling.interval_ms, Some(2_000));
    assert_eq!(cfg.timings.toast_duration_ms, 5_000);
    assert_eq!(cfg.timings.toast_exit_ms, 300);

    let runtime = cfg.to_dashboard_config().unwrap();
    assert_eq!(runtime.api_base.unwrap().as_str(), "http://localhost:3000/");
    assert_eq!(
        runtime.polling,
        PollingStrategy::SelfFetch {
            interval: Duration::from_secs(2),
            endpoint: "/api/status".into(),
        }
    );
    assert_eq!(runtime.timings.toast_duration, Duration::from_secs(5));
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_from_file(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)), "{err}");
}

#[test]
fn environment_overrides_file() {
    Jail::expect_with(|jail| {
        jail.create_file("dashboard.toml", LAB_CONFIG)?;
        jail.set_env("LABDASH_POLLING__STRATEGY", "delegate-refresh");
        jail.set_env("LABDASH_POLLING__INTERVAL_MS", "45000");
        jail.set_env("LABDASH_LOG_FILTER", "warn");

        let cfg = load_from_file(&jail.directory().join("dashboard.toml")).unwrap();
        assert_eq!(cfg.polling.strategy, Strategy::DelegateRefresh);
        assert_eq!(cfg.log_filter, "warn");
        assert_eq!(
            cfg.to_dashboard_config().unwrap().polling,
            PollingStrategy::DelegateRefresh {
                interval: Duration::from_secs(45),
                event_name: "refresh".into(),
            }
        );
        Ok(())
    });
}

#[test]
fn environment_cannot_bypass_validation() {
    Jail::expect_with(|jail| {
        jail.create_file("dashboard.toml", "")?;
        jail.set_env("LABDASH_TIMINGS__TOAST_EXIT_MS", "0");

        let err = load_from_file(&jail.directory().join("dashboard.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Validation { .. }), "{err}");
        Ok(())
    });
}

// ── Saving ──────────────────────────────────────────────────────────

#[test]
fn saved_config_loads_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("dashboard.toml");
    let cfg = Config {
        api_base: Some("https://lab.example".into()),
        ..Config::default()
    };

    save(&path, &cfg).unwrap();
    assert_eq!(load_from_file(&path).unwrap(), cfg);
}
