//! Blocking HTTP GET of a source list.
//!
//! Uses the curl crate (libcurl). One request per call, no retries; the
//! caller decides whether a failure is fatal.

use crate::config::HttpConfig;
use std::time::Duration;
use thiserror::Error;

/// Failure of a single GET.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Curl reported an error (bad URL, DNS, connect, timeout, ...).
    #[error("{0}")]
    Transport(#[from] curl::Error),
    /// HTTP response had a non-2xx status.
    #[error("HTTP {0}")]
    Status(u32),
}

/// Performs a GET and returns the body as text.
///
/// Follows redirects. Invalid UTF-8 is replaced rather than rejected, since
/// only ASCII URLs are extracted from the body.
pub fn fetch_text(url: &str, http: &HttpConfig) -> Result<String, FetchError> {
    let mut body: Vec<u8> = Vec::new();

    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.get(true)?;
    easy.follow_location(true)?;
    easy.max_redirections(10)?;
    easy.connect_timeout(Duration::from_secs(http.connect_timeout_secs))?;
    easy.timeout(Duration::from_secs(http.timeout_secs))?;
    if let Some(ua) = &http.user_agent {
        easy.useragent(ua)?;
    }

    {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| {
            body.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer.perform()?;
    }

    let code = easy.response_code()?;
    if !(200..300).contains(&code) {
        return Err(FetchError::Status(code));
    }

    tracing::debug!(bytes = body.len(), "fetched source list");
    Ok(String::from_utf8_lossy(&body).into_owned())
}
