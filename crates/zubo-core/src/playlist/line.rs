//! Classification of expanded region lines.

/// Suffix marking a group line, e.g. `央视,#genre#`.
pub const GENRE_MARKER: &str = "#genre#";

/// One meaningful line of an expanded region file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLine<'a> {
    /// Switches the current group for the channels that follow.
    Group(&'a str),
    /// A `name,url` pair.
    Channel { name: &'a str, url: &'a str },
}

impl<'a> SourceLine<'a> {
    /// Returns `None` for blank lines and for channel lines with fewer than
    /// two comma-separated fields. Fields past the second are ignored.
    pub fn parse(line: &'a str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        let mut fields = line.split(',');
        let first = fields.next().unwrap_or_default().trim();
        if line.ends_with(GENRE_MARKER) {
            return Some(SourceLine::Group(first));
        }
        let url = fields.next()?.trim();
        Some(SourceLine::Channel { name: first, url })
    }
}
