//! `zubo run` – the whole pipeline.

use anyhow::Result;
use zubo_core::config::{self, Layout, ZuboConfig};
use zubo_core::pipeline;

use super::assemble::print_assemble;
use super::expand::print_expand;
use super::harvest::print_harvested;

pub fn run_pipeline(cfg: &ZuboConfig, layout: &Layout) -> Result<()> {
    let token = config::read_token(cfg);
    let summary = pipeline::run(cfg, layout, token.as_deref())?;
    print_harvested(&summary.harvested);
    print_expand(&summary.expand);
    print_assemble(&summary.assemble, &layout.playlist_path);
    Ok(())
}
