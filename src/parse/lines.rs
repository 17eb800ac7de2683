/// Split raw multi-line text into trimmed, non-empty lines, preserving order.
///
/// `\r\n` line endings are handled by the trim.
pub fn parse_lines(raw: &str) -> Vec<String> {
    raw.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
