//! Error taxonomy for the pipeline.
//!
//! Harvest failures are fatal for the whole run. Expander and assembler
//! problems are confined to one region and reported as [`RegionSkip`].

use std::path::PathBuf;
use thiserror::Error;

/// Fatal error raised by the link harvester.
#[derive(Debug, Error)]
pub enum HarvestError {
    /// The source token is unset or blank. Raised before any network call.
    #[error("token is not set; export {var} before running")]
    MissingToken { var: String },

    /// The configured source URL could not be parsed.
    #[error("invalid source URL {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// libcurl failed before a response was received (DNS, connect, timeout).
    #[error("download from {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: curl::Error,
    },

    /// The server answered with a non-2xx status.
    #[error("download from {url} returned HTTP {code}")]
    Status { url: String, code: u32 },

    /// Writing the harvested link file failed.
    #[error("write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl HarvestError {
    /// True for configuration problems (missing token, bad URL).
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            HarvestError::MissingToken { .. } | HarvestError::InvalidUrl { .. }
        )
    }

    /// True for transport failures and non-success HTTP statuses.
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            HarvestError::Transport { .. } | HarvestError::Status { .. }
        )
    }
}

/// Reason a region was left out by the expander or the assembler.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegionSkip {
    #[error("template not found: {}", .0.display())]
    MissingTemplate(PathBuf),

    #[error("no links in {}", .0.display())]
    EmptyLinks(PathBuf),

    #[error("region file not found: {}", .0.display())]
    MissingRegionFile(PathBuf),
}
