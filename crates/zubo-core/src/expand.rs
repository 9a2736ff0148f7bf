//! Template expander: one copy of a region's template per harvested link.
//!
//! Regions are matched by file name across the link, template, and output
//! directories. A missing template, an empty link file, or an unreadable file
//! skips that region only.

use crate::error::RegionSkip;
use crate::text::split_lines;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Outcome of [`expand_all`], one entry per link file seen.
#[derive(Debug, Default)]
pub struct ExpandReport {
    /// Output files written.
    pub written: Vec<PathBuf>,
    /// Regions skipped with a warning.
    pub skipped: Vec<RegionSkip>,
    /// Regions that failed with an I/O or decode error: (file name, message).
    pub failed: Vec<(String, String)>,
}

/// Replaces every occurrence of `placeholder` in `template` with `link`.
pub fn expand_template(template: &str, placeholder: &str, link: &str) -> String {
    template.replace(placeholder, link)
}

/// Expands `template` once per link; each expansion is followed by a blank line.
pub fn expand_links(template: &str, placeholder: &str, links: &[String]) -> String {
    let mut out = String::new();
    for link in links {
        out.push_str(&expand_template(template, placeholder, link));
        out.push_str("\n\n");
    }
    out
}

/// Trimmed, non-empty lines of a link file.
pub fn read_links(path: &Path) -> std::io::Result<Vec<String>> {
    let data = fs::read_to_string(path)?;
    Ok(split_lines(&data)
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect())
}

/// Expands every `*.<extension>` file in `ip_dir` against the same-named
/// template in `template_dir`, writing to the same name in `output_dir`.
///
/// Only an unreadable `ip_dir` (or an uncreatable `output_dir`) is an error.
pub fn expand_all(
    ip_dir: &Path,
    template_dir: &Path,
    output_dir: &Path,
    extension: &str,
    placeholder: &str,
) -> Result<ExpandReport> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("create {}", output_dir.display()))?;

    let mut report = ExpandReport::default();
    let mut names: Vec<String> = Vec::new();
    for entry in fs::read_dir(ip_dir)
        .with_context(|| format!("read dir {}", ip_dir.display()))?
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_file())
    {
        let file_name = entry.file_name();
        if !Path::new(&file_name).extension().is_some_and(|x| x == extension) {
            continue;
        }
        match file_name.into_string() {
            Ok(name) => names.push(name),
            Err(raw) => {
                let lossy = raw.to_string_lossy().into_owned();
                tracing::warn!(file = %lossy, "file name is not valid UTF-8, skipping");
                report
                    .failed
                    .push((lossy, "file name is not valid UTF-8".to_string()));
            }
        }
    }
    names.sort();

    for name in names {
        tracing::info!("processing {}", name);
        let ip_path = ip_dir.join(&name);
        let template_path = template_dir.join(&name);
        let out_path = output_dir.join(&name);

        if !template_path.exists() {
            tracing::warn!(path = %template_path.display(), "template not found, skipping");
            report.skipped.push(RegionSkip::MissingTemplate(template_path));
            continue;
        }

        match expand_region(&ip_path, &template_path, &out_path, placeholder) {
            Ok(Some(count)) => {
                tracing::info!(path = %out_path.display(), "wrote {} expansion(s)", count);
                report.written.push(out_path);
            }
            Ok(None) => {
                tracing::warn!(path = %ip_path.display(), "no links found, skipping");
                report.skipped.push(RegionSkip::EmptyLinks(ip_path));
            }
            Err(e) => {
                tracing::error!(file = %name, "expand failed: {:#}", e);
                report.failed.push((name, format!("{:#}", e)));
            }
        }
    }
    Ok(report)
}

/// Returns `Ok(None)` when the link file has no links; nothing is written then.
fn expand_region(
    ip_path: &Path,
    template_path: &Path,
    out_path: &Path,
    placeholder: &str,
) -> Result<Option<usize>> {
    let links = read_links(ip_path).with_context(|| format!("read {}", ip_path.display()))?;
    if links.is_empty() {
        return Ok(None);
    }
    let template = fs::read_to_string(template_path)
        .with_context(|| format!("read {}", template_path.display()))?;
    let content = expand_links(&template, placeholder, &links);
    fs::write(out_path, content).with_context(|| format!("write {}", out_path.display()))?;
    Ok(Some(links.len()))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Dirs {
        _root: tempfile::TempDir,
        ip: PathBuf,
        template: PathBuf,
        out: PathBuf,
    }

    fn dirs() -> Dirs {
        let root = tempfile::tempdir().unwrap();
        let ip = root.path().join("ip");
        let template = root.path().join("template");
        let out = root.path().join("zubo");
        fs::create_dir_all(&ip).unwrap();
        fs::create_dir_all(&template).unwrap();
        Dirs {
            _root: root,
            ip,
            template,
            out,
        }
    }

    fn run(d: &Dirs) -> ExpandReport {
        expand_all(&d.ip, &d.template, &d.out, "txt", "ipipip").unwrap()
    }

    #[test]
    fn replaces_every_placeholder() {
        let t = "a,http://ipipip/rtp/1\nb,http://ipipip/udp/2";
        assert_eq!(
            expand_template(t, "ipipip", "1.2.3.4:80"),
            "a,http://1.2.3.4:80/rtp/1\nb,http://1.2.3.4:80/udp/2"
        );
    }

    #[test]
    fn template_without_placeholder_is_unchanged() {
        assert_eq!(expand_template("static", "ipipip", "h"), "static");
        let out = expand_links("static", "ipipip", &["h1".to_string(), "h2".to_string()]);
        assert_eq!(out, "static\n\nstatic\n\n");
    }

    #[test]
    fn n_links_give_n_blocks() {
        let d = dirs();
        fs::write(d.ip.join("r.txt"), "h1\n  h2  \n\nh3\n").unwrap();
        fs::write(d.template.join("r.txt"), "G,#genre#\nc,http://ipipip/rtp/x").unwrap();
        let report = run(&d);
        assert_eq!(report.written, vec![d.out.join("r.txt")]);
        let out = fs::read_to_string(d.out.join("r.txt")).unwrap();
        let blocks: Vec<&str> = out.split("\n\n").filter(|b| !b.is_empty()).collect();
        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[1], "G,#genre#\nc,http://h2/rtp/x");
    }

    #[test]
    fn missing_template_skips_region_and_continues() {
        let d = dirs();
        fs::write(d.ip.join("a.txt"), "h1\n").unwrap();
        fs::write(d.ip.join("b.txt"), "h2\n").unwrap();
        fs::write(d.template.join("b.txt"), "x ipipip").unwrap();
        let report = run(&d);
        assert_eq!(
            report.skipped,
            vec![RegionSkip::MissingTemplate(d.template.join("a.txt"))]
        );
        assert!(!d.out.join("a.txt").exists());
        assert_eq!(fs::read_to_string(d.out.join("b.txt")).unwrap(), "x h2\n\n");
    }

    #[test]
    fn empty_link_file_skips_region() {
        let d = dirs();
        fs::write(d.ip.join("e.txt"), "\n   \n").unwrap();
        fs::write(d.template.join("e.txt"), "ipipip").unwrap();
        let report = run(&d);
        assert_eq!(report.skipped, vec![RegionSkip::EmptyLinks(d.ip.join("e.txt"))]);
        assert!(!d.out.join("e.txt").exists());
    }

    #[test]
    fn undecodable_file_is_isolated() {
        let d = dirs();
        fs::write(d.ip.join("bad.txt"), "h1\n").unwrap();
        fs::write(d.template.join("bad.txt"), [0xffu8, 0xfe, 0x00]).unwrap();
        fs::write(d.ip.join("good.txt"), "h2\n").unwrap();
        fs::write(d.template.join("good.txt"), "ipipip").unwrap();
        let report = run(&d);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0, "bad.txt");
        assert_eq!(report.written, vec![d.out.join("good.txt")]);
    }

    #[test]
    fn other_extensions_are_ignored_and_output_overwritten() {
        let d = dirs();
        fs::write(d.ip.join("r.txt"), "h\n").unwrap();
        fs::write(d.ip.join("notes.md"), "h\n").unwrap();
        fs::write(d.template.join("r.txt"), "ipipip").unwrap();
        fs::create_dir_all(&d.out).unwrap();
        fs::write(d.out.join("r.txt"), "old content that is longer").unwrap();
        let report = run(&d);
        assert_eq!(report.written.len(), 1);
        assert!(report.skipped.is_empty());
        assert_eq!(fs::read_to_string(d.out.join("r.txt")).unwrap(), "h\n\n");
    }

    #[test]
    fn bare_carriage_return_link_file() {
        let d = dirs();
        fs::write(d.ip.join("r.txt"), "h1\rh2\r").unwrap();
        fs::write(d.template.join("r.txt"), "ipipip").unwrap();
        run(&d);
        assert_eq!(fs::read_to_string(d.out.join("r.txt")).unwrap(), "h1\n\nh2\n\n");
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_file_name_is_reported() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let d = dirs();
        let name = OsStr::from_bytes(b"bad\xff.txt");
        if fs::write(d.ip.join(name), "h1\n").is_err() {
            // Some filesystems refuse non-UTF-8 names.
            return;
        }
        fs::write(d.ip.join("ok.txt"), "h2\n").unwrap();
        fs::write(d.template.join("ok.txt"), "ipipip").unwrap();
        let report = run(&d);
        assert_eq!(report.failed.len(), 1);
        assert!(report.failed[0].0.starts_with("bad"));
        assert_eq!(report.written, vec![d.out.join("ok.txt")]);
    }

    #[test]
    fn missing_ip_dir_is_error() {
        let d = dirs();
        let missing = d.ip.join("nope");
        assert!(expand_all(&missing, &d.template, &d.out, "txt", "ipipip").is_err());
    }
}
