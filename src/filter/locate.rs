use once_cell::sync::Lazy;
use regex::bytes::Regex;

/// Syntax of an ISO 8601 timestamp as it appears in log lines. Only the shape is
/// checked here; calendar validity is left to the parser.
const TIMESTAMP_PATTERN: &str =
    r"[0-9]{4}-[0-9]{2}-[0-9]{2}T[0-9]{2}:[0-9]{2}:[0-9]{2}(?:\.[0-9]{1,6})?(?:Z|[-+][0-9]{2}:[0-9]{2})";

// Matched over bytes so lines that are not valid UTF-8 can still be scanned.
static TIMESTAMP_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(TIMESTAMP_PATTERN).expect("timestamp pattern is a valid regex")
});

/// A substring of a line that looks like a timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate<'a> {
    pub text: &'a str,
    /// Byte offset of `text` within the line.
    pub start: usize,
}

impl Candidate<'_> {
    pub fn end(&self) -> usize {
        self.start + self.text.len()
    }
}

/// Find every timestamp-shaped substring in `line`, left to right, without overlaps.
pub fn locate(line: &str) -> Vec<Candidate<'_>> {
    locate_bytes(line.as_bytes())
}

/// [`locate`] over raw bytes. Every match is ASCII, so candidates are still text.
pub fn locate_bytes(line: &[u8]) -> Vec<Candidate<'_>> {
    TIMESTAMP_RE
        .find_iter(line)
        .filter_map(|m| {
            let text = std::str::from_utf8(m.as_bytes()).ok()?;
            Some(Candidate {
                text,
                start: m.start(),
            })
        })
        .collect()
}
