//! `zubo sources` – show configured regions.

use zubo_core::config::{Layout, ZuboConfig};

pub fn run_sources(cfg: &ZuboConfig, layout: &Layout) {
    if cfg.sources.is_empty() {
        println!("No sources configured.");
        return;
    }
    println!("{:<12} {:<45} {}", "REGION", "URL", "PATH");
    for s in &cfg.sources {
        println!(
            "{:<12} {:<45} {}",
            s.name,
            s.url,
            layout.source_path(s).display()
        );
    }
}
