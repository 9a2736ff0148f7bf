//! Full run: harvest every region, expand templates, assemble the playlist.
//!
//! Harvest errors abort the run. Expand and assemble problems are reported
//! per region in the summary.

use crate::config::{Layout, ZuboConfig};
use crate::expand::{self, ExpandReport};
use crate::harvest::Harvester;
use crate::playlist::{self, AssembleReport, PlaylistOptions};
use anyhow::Result;

#[derive(Debug)]
pub struct RunSummary {
    /// (region name, hosts harvested), in configured order.
    pub harvested: Vec<(String, usize)>,
    pub expand: ExpandReport,
    pub assemble: AssembleReport,
}

/// Stage 1 only. Fails before any request if the token is missing.
pub fn harvest_all(
    cfg: &ZuboConfig,
    layout: &Layout,
    token: Option<&str>,
) -> Result<Vec<(String, usize)>> {
    let harvester = Harvester::new(&cfg.http, &cfg.token_env, token)?;
    let mut harvested = Vec::with_capacity(cfg.sources.len());
    for source in &cfg.sources {
        let count = harvester.harvest(&source.url, &layout.source_path(source))?;
        harvested.push((source.name.clone(), count));
    }
    Ok(harvested)
}

/// Stage 2 only.
pub fn expand_all(cfg: &ZuboConfig, layout: &Layout) -> Result<ExpandReport> {
    expand::expand_all(
        &layout.ip_dir,
        &layout.template_dir,
        &layout.output_dir,
        &cfg.link_extension,
        &cfg.placeholder,
    )
}

/// Stage 3 only.
pub fn assemble(cfg: &ZuboConfig, layout: &Layout) -> Result<AssembleReport> {
    playlist::assemble(
        &cfg.sources,
        &layout.output_dir,
        &layout.playlist_path,
        &PlaylistOptions::from(cfg),
    )
}

pub fn run(cfg: &ZuboConfig, layout: &Layout, token: Option<&str>) -> Result<RunSummary> {
    let harvested = harvest_all(cfg, layout, token)?;
    let expanded = expand_all(cfg, layout)?;
    let assembled = assemble(cfg, layout)?;
    Ok(RunSummary {
        harvested,
        expand: expanded,
        assemble: assembled,
    })
}
