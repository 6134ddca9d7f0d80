//! HTTPS response header retrieval.

use std::collections::BTreeMap;

use crate::error_handling::ProbeError;

/// Fetches the HTTPS response headers for a domain.
///
/// Issues a HEAD request for the root path over HTTPS with default
/// certificate validation and flattens the response headers into a map
/// (duplicate header names collapse to the last value seen). Redirects are
/// not followed: a 3xx answer is reported as-is, `Location` included.
///
/// Any failure is returned as a [`ProbeError`] value; the driver prints it as
/// the section's single `Error` entry. The underlying connection is released
/// on every path by `reqwest`'s RAII handling, including the case where no
/// connection was ever established.
pub async fn fetch_headers(
    client: &reqwest::Client,
    domain: &str,
) -> Result<BTreeMap<String, String>, ProbeError> {
    let url = format!("https://{domain}/");
    fetch_headers_from_url(client, &url).await
}

pub(crate) async fn fetch_headers_from_url(
    client: &reqwest::Client,
    url: &str,
) -> Result<BTreeMap<String, String>, ProbeError> {
    log::debug!("fetching headers from {url}");
    let response = client
        .head(url)
        .send()
        .await
        .map_err(classify_request_error)?;

    let mut headers = BTreeMap::new();
    for (name, value) in response.headers() {
        headers.insert(
            name.as_str().to_string(),
            value.to_str().unwrap_or_default().to_string(),
        );
    }
    Ok(headers)
}

/// Maps a `reqwest` failure onto the probe error taxonomy.
///
/// Connect and timeout failures (TLS handshake failures surface through
/// `is_connect` as well) become [`ProbeError::Connection`]; everything else,
/// such as a non-HTTP response, becomes [`ProbeError::Protocol`].
fn classify_request_error(e: reqwest::Error) -> ProbeError {
    if e.is_connect() || e.is_timeout() {
        ProbeError::Connection(e.to_string())
    } else {
        ProbeError::Protocol(e.to_string())
    }
}
