//! Host extraction from a source list body.

use crate::text::split_lines;
use std::collections::BTreeSet;

macro_rules! regex {
    ($re:literal $(,)?) => {{
        static RE: std::sync::OnceLock<regex::Regex> = std::sync::OnceLock::new();
        RE.get_or_init(|| regex::Regex::new($re).unwrap())
    }};
}

/// Host segment of the first `http(s)://<host>/rtp/` or `/udp/` URL in `line`.
pub fn extract_host(line: &str) -> Option<&str> {
    regex!(r"https?://(.*?)/(?:rtp|udp)/")
        .captures(line)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// All distinct hosts in `body`, one candidate per line. Non-matching lines
/// contribute nothing.
pub fn extract_hosts(body: &str) -> BTreeSet<String> {
    split_lines(body)
        .filter_map(extract_host)
        .map(str::to_string)
        .collect()
}
