// Commander HTTP client
//
// Wraps `reqwest::Client` with commander URL construction and JSON
// decoding. The same client runs natively (tests, CLI tools) and in the
// browser, where reqwest delegates to `fetch`.

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::models::{AlertFeed, AlertsResponse, StatusRecord};
use crate::transport::TransportConfig;

/// Default path of the aggregate status endpoint.
pub const STATUS_PATH: &str = "/api/status";

/// Raw HTTP client for the commander's JSON endpoints.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    base_url: Url,
}

impl Client {
    /// Create a new client from a `TransportConfig`.
    ///
    /// `base_url` is the commander root (e.g. `http://localhost:3000`).
    /// A path prefix is kept, so `http://host/lab` resolves endpoints
    /// under `/lab/api/...`.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self { http, base_url })
    }

    /// Create a client around a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// The commander base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build a full URL for an absolute endpoint path: `{base}{path}`.
    pub(crate) fn endpoint_url(&self, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        Ok(Url::parse(&format!("{base}/{path}"))?)
    }

    // ── Endpoints ────────────────────────────────────────────────────

    /// Fetch the aggregate container status.
    ///
    /// `GET /api/status`
    pub async fn container_status(&self) -> Result<Vec<StatusRecord>, Error> {
        self.container_status_at(STATUS_PATH).await
    }

    /// Fetch the aggregate container status from a non-default endpoint.
    pub async fn container_status_at(&self, endpoint: &str) -> Result<Vec<StatusRecord>, Error> {
        let url = self.endpoint_url(endpoint)?;
        debug!("fetching container status");
        self.get_json(url).await
    }

    /// Fetch the alert log of one IDS source.
    ///
    /// `GET /api/alerts/{source}`
    pub async fn alerts(&self, source: &str) -> Result<AlertFeed, Error> {
        let url = self.endpoint_url(&format!("api/alerts/{source}"))?;
        debug!(source, "fetching alerts");
        let (status, body) = self.get_text(url).await?;

        // A failing backend may still answer `{ "error": ... }` with a 5xx.
        let message = match serde_json::from_str(&body).map(AlertsResponse::into_feed) {
            Ok(Some(feed)) => return Ok(feed),
            Ok(None) => "response carries neither `error` nor `alerts`".to_owned(),
            Err(e) => format!("{e} (body preview: {:?})", preview(&body)),
        };
        if !status.is_success() {
            return Err(Error::Http {
                status: status.as_u16(),
                body: preview(&body).to_owned(),
            });
        }
        Err(Error::Deserialization { message, body })
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a GET request and return the status with the raw body.
    async fn get_text(&self, url: Url) -> Result<(StatusCode, String), Error> {
        debug!("GET {}", url);

        let resp = self.http.get(url).send().await?;
        let status = resp.status();
        let body = if status.is_success() {
            resp.text().await?
        } else {
            resp.text().await.unwrap_or_default()
        };
        Ok((status, body))
    }

    /// Send a GET request and decode the JSON body.
    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        let (status, body) = self.get_text(url).await?;

        if !status.is_success() {
            return Err(Error::Http {
                status: status.as_u16(),
                body: preview(&body).to_owned(),
            });
        }

        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: format!("{e} (body preview: {:?})", preview(&body)),
            body: body.clone(),
        })
    }
}

/// First 200 bytes of a body, cut on a char boundary.
fn preview(body: &str) -> &str {
    let mut end = body.len().min(200);
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn client(base: &str) -> Client {
        Client::with_client(reqwest::Client::new(), Url::parse(base).unwrap())
    }

    #[test]
    fn endpoint_url_joins_root() {
        let c = client("http://localhost:3000");
        assert_eq!(
            c.endpoint_url("/api/status").unwrap().as_str(),
            "http://localhost:3000/api/status"
        );
    }

    #[test]
    fn endpoint_url_keeps_path_prefix() {
        let c = client("http://lab.local/commander/");
        assert_eq!(
            c.endpoint_url("api/alerts/zeek").unwrap().as_str(),
            "http://lab.local/commander/api/alerts/zeek"
        );
    }

    #[test]
    fn preview_respects_char_boundaries() {
        let body = "é".repeat(150);
        let cut = preview(&body);
        assert!(cut.len() <= 200);
        assert!(cut.chars().all(|c| c == 'é'));
    }
}
