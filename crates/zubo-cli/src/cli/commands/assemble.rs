//! `zubo assemble` – write the final playlist.

use anyhow::Result;
use std::path::Path;
use zubo_core::config::{Layout, ZuboConfig};
use zubo_core::pipeline;
use zubo_core::playlist::AssembleReport;

pub fn run_assemble(cfg: &ZuboConfig, layout: &Layout) -> Result<()> {
    let report = pipeline::assemble(cfg, layout)?;
    print_assemble(&report, &layout.playlist_path);
    Ok(())
}

pub(super) fn print_assemble(report: &AssembleReport, playlist_path: &Path) {
    for skip in &report.skipped {
        println!("skipped {}", skip);
    }
    for (path, msg) in &report.failed {
        println!("failed  {}: {}", path.display(), msg);
    }
    println!(
        "{} written: {} entr(ies) from {} region(s)",
        playlist_path.display(),
        report.playlist.entries.len(),
        report.included.len()
    );
}
