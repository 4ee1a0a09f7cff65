// src/core/net.rs
// HTTPS GET + JSON decode over reqwest.

use reqwest::Client;
use serde_json::Value;

use crate::config::consts::{HTTP_TIMEOUT, USER_AGENT};
use crate::error::ScrapeError;

pub fn http_client() -> Result<Client, ScrapeError> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(HTTP_TIMEOUT)
        .build()
        .map_err(|e| ScrapeError::UpstreamUnavailable { url: s!(), reason: e.to_string() })
}

/// Single GET, no retry.
/// Transport failure or a non-2xx status → `UpstreamUnavailable`;
/// a body that is not JSON → `MalformedMetadata`.
pub async fn get_json(client: &Client, url: &str) -> Result<Value, ScrapeError> {
    let resp = client
        .get(url)
        .send()
        .await
        .map_err(|e| ScrapeError::UpstreamUnavailable { url: s!(url), reason: e.to_string() })?;

    let status = resp.status();
    if !status.is_success() {
        return Err(ScrapeError::UpstreamUnavailable {
            url: s!(url),
            reason: format!("HTTP {status}"),
        });
    }

    let body = resp
        .text()
        .await
        .map_err(|e| ScrapeError::UpstreamUnavailable { url: s!(url), reason: e.to_string() })?;

    serde_json::from_str(&body)
        .map_err(|e| ScrapeError::MalformedMetadata { url: s!(url), reason: e.to_string() })
}
