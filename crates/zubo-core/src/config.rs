use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// File name looked up in the working directory when no `--config` is given.
pub const CONFIG_FILE_NAME: &str = "zubo.toml";

/// HTTP parameters for fetching source lists (optional `[http]` section).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Connect timeout in seconds.
    pub connect_timeout_secs: u64,
    /// Whole-transfer timeout in seconds.
    pub timeout_secs: u64,
    /// Optional `User-Agent` header; libcurl sends none by default.
    pub user_agent: Option<String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 15,
            timeout_secs: 60,
            user_agent: None,
        }
    }
}

/// One region: where its host list comes from and where the harvested links go.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Region name, e.g. `天津联通`.
    pub name: String,
    /// Remote endpoint serving the plaintext source list.
    pub url: String,
    /// Harvester output, relative to the working directory.
    pub path: PathBuf,
}

impl SourceConfig {
    pub fn new(name: &str, url: &str, path: &str) -> Self {
        Self {
            name: name.to_string(),
            url: url.to_string(),
            path: PathBuf::from(path),
        }
    }

    /// File name shared by the link file, the template, and the expanded output.
    pub fn file_name(&self) -> Option<&std::ffi::OsStr> {
        self.path.file_name()
    }
}

/// Global configuration, loaded from `zubo.toml` when present.
///
/// Every key is optional; missing keys take the built-in defaults, which
/// reproduce the stock three-region setup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ZuboConfig {
    /// Environment variable holding the source token.
    pub token_env: String,
    /// Harvester output directory.
    pub ip_dir: PathBuf,
    /// Directory holding one template per region.
    pub template_dir: PathBuf,
    /// Expander output directory, read back by the assembler.
    pub output_dir: PathBuf,
    /// Final playlist path.
    pub playlist_path: PathBuf,
    /// Extension (without dot) of link files the expander picks up.
    pub link_extension: String,
    /// Literal token replaced by each harvested link.
    pub placeholder: String,
    /// EPG reference written into the `#EXTM3U` header.
    pub epg_url: String,
    /// Group title of the trailing update-time entry.
    pub update_group: String,
    /// Stream URL of the trailing update-time entry.
    pub fallback_stream_url: String,
    /// Offset from UTC, in hours, for the update-time stamp.
    pub utc_offset_hours: i32,
    pub http: HttpConfig,
    /// Regions, processed in this order.
    pub sources: Vec<SourceConfig>,
}

impl Default for ZuboConfig {
    fn default() -> Self {
        Self {
            token_env: "IPTV_TOKEN".to_string(),
            ip_dir: PathBuf::from("ip"),
            template_dir: PathBuf::from("template"),
            output_dir: PathBuf::from("zubo"),
            playlist_path: PathBuf::from("zubo.m3u"),
            link_extension: "txt".to_string(),
            placeholder: "ipipip".to_string(),
            epg_url: "http://e.erw.cc/e.xml".to_string(),
            update_group: "更新时间".to_string(),
            fallback_stream_url: "http://play.jinnantv.top/live/JNTV1.m3u8".to_string(),
            utc_offset_hours: 8,
            http: HttpConfig::default(),
            sources: default_sources(),
        }
    }
}

fn default_sources() -> Vec<SourceConfig> {
    vec![
        SourceConfig::new(
            "天津联通",
            "https://taoiptv.com/lives/12024.txt",
            "ip/天津联通.txt",
        ),
        SourceConfig::new(
            "北京联通",
            "https://taoiptv.com/lives/11024.txt",
            "ip/北京联通.txt",
        ),
        SourceConfig::new(
            "山东电信",
            "https://taoiptv.com/lives/37023.txt",
            "ip/山东电信.txt",
        ),
    ]
}

/// Load configuration.
///
/// An explicit path must exist. Without one, `<workdir>/zubo.toml` is used if
/// present, else the built-in defaults.
pub fn load(explicit: Option<&Path>, workdir: &Path) -> Result<ZuboConfig> {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => {
            let candidate = workdir.join(CONFIG_FILE_NAME);
            if !candidate.exists() {
                tracing::debug!("no {} in {}, using defaults", CONFIG_FILE_NAME, workdir.display());
                return Ok(ZuboConfig::default());
            }
            candidate
        }
    };
    let data =
        fs::read_to_string(&path).with_context(|| format!("read config {}", path.display()))?;
    let cfg: ZuboConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    tracing::info!("loaded config from {}", path.display());
    Ok(cfg)
}

/// Reads the source token from the configured environment variable.
/// Unset and blank values both yield `None`.
pub fn read_token(cfg: &ZuboConfig) -> Option<String> {
    std::env::var(&cfg.token_env)
        .ok()
        .filter(|t| !t.trim().is_empty())
}

/// Configured paths resolved against the working directory.
#[derive(Debug, Clone)]
pub struct Layout {
    pub workdir: PathBuf,
    pub ip_dir: PathBuf,
    pub template_dir: PathBuf,
    pub output_dir: PathBuf,
    pub playlist_path: PathBuf,
}

impl Layout {
    pub fn resolve(cfg: &ZuboConfig, workdir: &Path) -> Self {
        Self {
            workdir: workdir.to_path_buf(),
            ip_dir: workdir.join(&cfg.ip_dir),
            template_dir: workdir.join(&cfg.template_dir),
            output_dir: workdir.join(&cfg.output_dir),
            playlist_path: workdir.join(&cfg.playlist_path),
        }
    }

    /// Harvester destination for `source`.
    pub fn source_path(&self, source: &SourceConfig) -> PathBuf {
        self.workdir.join(&source.path)
    }
}
