//! Line splitting shared by the pipeline stages.

/// Splits on `\n` and on `\r`, so `\n`, `\r\n` and bare `\r` endings all
/// separate lines. A `\r\n` pair yields an extra empty piece; every caller
/// skips blank lines.
pub fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split(['\n', '\r'])
}
