use std::time::Duration;

use reqwest::blocking::Client;
use serde_json::Value;

use gpolyutil::{Error, Result};

/// GETs a URL and parses the response as JSON. Any failure, including a non-2xx status or a
/// response that isn't JSON, is a `Network` error carrying whatever the server sent back. There
/// are no retries.
pub fn fetch_json(url: &str) -> Result<Value> {
    let network = |reason: String| Error::Network {
        url: url.to_string(),
        reason,
    };

    let client = Client::builder()
        .timeout(Duration::from_secs(60))
        .build()
        .map_err(|err| network(err.to_string()))?;
    let resp = client
        .get(url)
        .send()
        .map_err(|err| network(err.to_string()))?;
    let status = resp.status();
    let body = resp.text().map_err(|err| network(err.to_string()))?;
    if !status.is_success() {
        return Err(network(format!("status {}, response {}", status, body)));
    }
    serde_json::from_str(&body)
        .map_err(|err| network(format!("response isn't JSON ({}): {}", err, body)))
}
