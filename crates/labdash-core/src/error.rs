// ── Core error types ──
//
// User-facing errors from labdash-core. Widgets render these inline
// (alerts panel, copy button) or swallow them (status poller), so the
// `Display` text is what an operator reads on the page.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("cannot reach commander: {reason}")]
    ConnectionFailed { reason: String },

    #[error("request timed out")]
    Timeout,

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("API error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if the server answered).
        status: Option<u16>,
    },

    #[error("unexpected response: {message}")]
    Malformed { message: String },

    // ── Browser capabilities ─────────────────────────────────────────
    #[error("clipboard write failed: {message}")]
    Clipboard { message: String },

    #[error("page element missing: {what}")]
    PageUnavailable { what: String },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    /// Status code of the commander's answer, when it answered with one.
    pub fn http_status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => *status,
            _ => None,
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<labdash_api::Error> for CoreError {
    fn from(err: labdash_api::Error) -> Self {
        match err {
            labdash_api::Error::Transport(ref e) if e.is_timeout() => CoreError::Timeout,
            labdash_api::Error::Transport(e) => CoreError::ConnectionFailed {
                reason: e.to_string(),
            },
            labdash_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("invalid URL: {e}"),
            },
            labdash_api::Error::Build(message) => CoreError::Config { message },
            labdash_api::Error::Http { status, body } => CoreError::Api {
                message: if body.is_empty() {
                    format!("HTTP {status}")
                } else {
                    format!("HTTP {status}: {body}")
                },
                status: Some(status),
            },
            labdash_api::Error::Deserialization { message, body: _ } => {
                CoreError::Malformed { message }
            }
        }
    }
}
