//! `zubo harvest` – fetch source lists and write host files.

use anyhow::Result;
use zubo_core::config::{self, Layout, ZuboConfig};
use zubo_core::pipeline;

pub fn run_harvest(cfg: &ZuboConfig, layout: &Layout) -> Result<()> {
    let token = config::read_token(cfg);
    let harvested = pipeline::harvest_all(cfg, layout, token.as_deref())?;
    print_harvested(&harvested);
    Ok(())
}

pub(super) fn print_harvested(harvested: &[(String, usize)]) {
    for (name, count) in harvested {
        println!("{:<12} {} host(s)", name, count);
    }
}
