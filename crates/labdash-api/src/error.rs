use thiserror::Error;

/// Top-level error type for the `labdash-api` crate.
///
/// Covers every failure mode of the commander endpoints: transport,
/// URL construction, non-success HTTP status, and malformed bodies.
/// `labdash-core` maps these into user-facing messages.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, aborted fetch, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Client construction failed (TLS backend, invalid header value).
    #[error("Failed to build HTTP client: {0}")]
    Build(String),

    // ── Server ──────────────────────────────────────────────────────
    /// The commander answered with a non-success status.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}
