//! Playlist assembler: concatenate expanded region files into one M3U.
//!
//! Regions are read in configured order. The current group carries over from
//! one region file to the next until another `#genre#` line replaces it.
//! The playlist always ends with a synthetic update-time entry.

mod line;

pub use line::{SourceLine, GENRE_MARKER};

use crate::config::{SourceConfig, ZuboConfig};
use crate::error::RegionSkip;
use crate::text::split_lines;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::fs;
use std::path::{Path, PathBuf};

/// Format of the update-time entry name.
pub const UPDATE_TIME_FORMAT: &str = "%Y/%m/%d %H:%M";

/// Fixed values written around the channel entries.
#[derive(Debug, Clone)]
pub struct PlaylistOptions {
    pub epg_url: String,
    pub update_group: String,
    pub fallback_stream_url: String,
    pub utc_offset_hours: i32,
}

impl From<&ZuboConfig> for PlaylistOptions {
    fn from(cfg: &ZuboConfig) -> Self {
        Self {
            epg_url: cfg.epg_url.clone(),
            update_group: cfg.update_group.clone(),
            fallback_stream_url: cfg.fallback_stream_url.clone(),
            utc_offset_hours: cfg.utc_offset_hours,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistEntry {
    pub group: String,
    pub name: String,
    pub url: String,
}

/// Extended M3U document.
#[derive(Debug, Clone)]
pub struct Playlist {
    pub epg_url: String,
    pub entries: Vec<PlaylistEntry>,
}

impl Playlist {
    pub fn new(epg_url: &str) -> Self {
        Self {
            epg_url: epg_url.to_string(),
            entries: Vec::new(),
        }
    }

    /// Appends one channel per channel line, tagging it with the group in
    /// `current_group`, which group lines update in place.
    pub fn extend_from_lines<'a, I>(&mut self, lines: I, current_group: &mut String)
    where
        I: IntoIterator<Item = &'a str>,
    {
        for line in lines.into_iter().filter_map(SourceLine::parse) {
            match line {
                SourceLine::Group(g) => *current_group = g.to_string(),
                SourceLine::Channel { name, url } => self.entries.push(PlaylistEntry {
                    group: current_group.clone(),
                    name: name.to_string(),
                    url: url.to_string(),
                }),
            }
        }
    }

    pub fn render(&self) -> String {
        let mut out = format!("#EXTM3U url-tvg=\"{}\"\n", self.epg_url);
        for e in &self.entries {
            out.push_str(&format!(
                "#EXTINF:-1 group-title=\"{}\",{}\n{}\n",
                e.group, e.name, e.url
            ));
        }
        out
    }
}

/// `now` shifted by `offset_hours`, formatted as `YYYY/MM/DD HH:MM`.
pub fn format_update_time(now: DateTime<Utc>, offset_hours: i32) -> String {
    (now + chrono::Duration::hours(i64::from(offset_hours)))
        .format(UPDATE_TIME_FORMAT)
        .to_string()
}

/// Outcome of [`assemble`].
#[derive(Debug)]
pub struct AssembleReport {
    pub playlist: Playlist,
    /// Region names whose file was read.
    pub included: Vec<String>,
    pub skipped: Vec<RegionSkip>,
    /// Region files that could not be read: (path, message).
    pub failed: Vec<(PathBuf, String)>,
}

/// Builds the playlist from `<output_dir>/<source file name>` for each source
/// and writes it to `playlist_path`.
pub fn assemble(
    sources: &[SourceConfig],
    output_dir: &Path,
    playlist_path: &Path,
    opts: &PlaylistOptions,
) -> Result<AssembleReport> {
    assemble_at(sources, output_dir, playlist_path, opts, Utc::now())
}

/// Like [`assemble`] with an explicit clock.
pub fn assemble_at(
    sources: &[SourceConfig],
    output_dir: &Path,
    playlist_path: &Path,
    opts: &PlaylistOptions,
    now: DateTime<Utc>,
) -> Result<AssembleReport> {
    tracing::info!(path = %playlist_path.display(), "assembling playlist from {}", output_dir.display());

    let mut report = AssembleReport {
        playlist: Playlist::new(&opts.epg_url),
        included: Vec::new(),
        skipped: Vec::new(),
        failed: Vec::new(),
    };
    let mut current_group = String::new();

    for source in sources {
        let Some(file_name) = source.file_name() else {
            tracing::warn!(region = %source.name, "source path has no file name, skipping");
            report
                .skipped
                .push(RegionSkip::MissingRegionFile(source.path.clone()));
            continue;
        };
        let region_path = output_dir.join(file_name);
        if !region_path.exists() {
            tracing::warn!(path = %region_path.display(), "region file not found, skipping");
            report.skipped.push(RegionSkip::MissingRegionFile(region_path));
            continue;
        }

        tracing::info!(path = %region_path.display(), "reading region {}", source.name);
        match fs::read_to_string(&region_path) {
            Ok(text) => {
                report
                    .playlist
                    .extend_from_lines(split_lines(&text), &mut current_group);
                report.included.push(source.name.clone());
            }
            Err(e) => {
                tracing::error!(path = %region_path.display(), "read failed: {}", e);
                report.failed.push((region_path, e.to_string()));
            }
        }
    }

    report.playlist.entries.push(PlaylistEntry {
        group: opts.update_group.clone(),
        name: format_update_time(now, opts.utc_offset_hours),
        url: opts.fallback_stream_url.clone(),
    });

    if let Some(parent) = playlist_path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    fs::write(playlist_path, report.playlist.render())
        .with_context(|| format!("write {}", playlist_path.display()))?;
    tracing::info!(
        path = %playlist_path.display(),
        "playlist written with {} entr(ies)",
        report.playlist.entries.len()
    );
    Ok(report)
}
