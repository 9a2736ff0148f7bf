//! Link harvester: fetch each region's source list and persist its hosts.
//!
//! Output is one host per line, sorted and duplicate-free. An empty result
//! still produces an (empty) file.

mod extract;

pub use extract::{extract_host, extract_hosts};

use crate::config::HttpConfig;
use crate::error::HarvestError;
use crate::fetch::{self, FetchError};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

/// Query parameter carrying the token.
pub const TOKEN_PARAM: &str = "token";

/// Fetches source lists with a validated token.
#[derive(Debug, Clone)]
pub struct Harvester<'a> {
    http: &'a HttpConfig,
    token: String,
}

impl<'a> Harvester<'a> {
    /// Fails with [`HarvestError::MissingToken`] if `token` is unset or blank,
    /// so no request is ever made without one. The token is sent as given.
    pub fn new(
        http: &'a HttpConfig,
        token_var: &str,
        token: Option<&str>,
    ) -> Result<Self, HarvestError> {
        match token {
            Some(t) if !t.trim().is_empty() => Ok(Self {
                http,
                token: t.to_string(),
            }),
            _ => {
                tracing::error!("token is not set; check the {} environment variable", token_var);
                Err(HarvestError::MissingToken {
                    var: token_var.to_string(),
                })
            }
        }
    }

    /// Downloads `source_url` and writes its sorted unique hosts to `dest`.
    /// Returns the number of hosts written.
    pub fn harvest(&self, source_url: &str, dest: &Path) -> Result<usize, HarvestError> {
        let full_url = token_url(source_url, &self.token)?;
        let body = fetch::fetch_text(&full_url, self.http).map_err(|e| {
            tracing::error!(url = %source_url, "download failed: {}", e);
            match e {
                FetchError::Transport(source) => HarvestError::Transport {
                    url: source_url.to_string(),
                    source,
                },
                FetchError::Status(code) => HarvestError::Status {
                    url: source_url.to_string(),
                    code,
                },
            }
        })?;

        let hosts = extract_hosts(&body);
        write_links(dest, &hosts)?;
        tracing::info!(url = %source_url, path = %dest.display(), "harvested {} host(s)", hosts.len());
        Ok(hosts.len())
    }
}

/// Appends `token=<token>` to the query of `source_url`.
pub fn token_url(source_url: &str, token: &str) -> Result<String, HarvestError> {
    let mut url = url::Url::parse(source_url).map_err(|source| HarvestError::InvalidUrl {
        url: source_url.to_string(),
        source,
    })?;
    url.query_pairs_mut().append_pair(TOKEN_PARAM, token);
    Ok(url.into())
}

/// Overwrites `dest` with one link per line, creating the parent directory.
pub fn write_links(dest: &Path, links: &BTreeSet<String>) -> Result<(), HarvestError> {
    let io_err = |source| HarvestError::Io {
        path: dest.to_path_buf(),
        source,
    };
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    let mut out = String::new();
    for link in links {
        out.push_str(link);
        out.push('\n');
    }
    fs::write(dest, out).map_err(io_err)
}
