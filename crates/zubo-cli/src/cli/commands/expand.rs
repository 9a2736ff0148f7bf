//! `zubo expand` – expand region templates.

use anyhow::Result;
use zubo_core::config::{Layout, ZuboConfig};
use zubo_core::expand::ExpandReport;
use zubo_core::pipeline;

pub fn run_expand(cfg: &ZuboConfig, layout: &Layout) -> Result<()> {
    let report = pipeline::expand_all(cfg, layout)?;
    print_expand(&report);
    Ok(())
}

pub(super) fn print_expand(report: &ExpandReport) {
    for path in &report.written {
        println!("wrote   {}", path.display());
    }
    for skip in &report.skipped {
        println!("skipped {}", skip);
    }
    for (name, msg) in &report.failed {
        println!("failed  {}: {}", name, msg);
    }
}
