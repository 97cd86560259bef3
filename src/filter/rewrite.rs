use std::io::{self, BufRead, Write};

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::error::FilterError;
use crate::filter::locate::locate_bytes;
use crate::filter::parse::parse_timestamp;
use crate::util::time::relative_time;

/// Source of the "now" instant that elapsed time is measured against.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RewriteStats {
    pub lines: u64,
    /// Candidates replaced with a relative time.
    pub rewritten: u64,
    /// Candidates left untouched because no layout accepted them.
    pub skipped: u64,
}

/// Replace every parseable timestamp in `line` with its relative time.
pub fn rewrite_line(line: &str, now: &DateTime<Utc>) -> String {
    let mut stats = RewriteStats::default();
    rewrite_line_with_stats(line, now, &mut stats)
}

/// Like [`rewrite_line`], accumulating candidate counts into `stats`.
pub fn rewrite_line_with_stats(
    line: &str,
    now: &DateTime<Utc>,
    stats: &mut RewriteStats,
) -> String {
    let rewritten = rewrite_bytes_with_stats(line.as_bytes(), now, stats);
    // Only ASCII is spliced in at ASCII boundaries, so valid input stays valid.
    String::from_utf8(rewritten)
        .unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned())
}

/// Rewrite a line that may not be valid UTF-8. Bytes outside candidates are
/// copied through untouched.
///
/// The output is rebuilt front to back from candidate positions, so each
/// occurrence is replaced exactly once and replacement text is never rescanned.
pub fn rewrite_bytes_with_stats(
    line: &[u8],
    now: &DateTime<Utc>,
    stats: &mut RewriteStats,
) -> Vec<u8> {
    let candidates = locate_bytes(line);
    if candidates.is_empty() {
        return line.to_vec();
    }

    let mut out = Vec::with_capacity(line.len());
    let mut cursor = 0;

    for candidate in candidates {
        out.extend_from_slice(&line[cursor..candidate.start]);
        match parse_timestamp(candidate.text) {
            Ok(parsed) => {
                out.extend_from_slice(relative_time(&parsed.at, now).as_bytes());
                stats.rewritten += 1;
            }
            Err(_) => {
                out.extend_from_slice(candidate.text.as_bytes());
                stats.skipped += 1;
            }
        }
        cursor = candidate.end();
    }

    out.extend_from_slice(&line[cursor..]);
    out
}

/// Strip a trailing `\n` or `\r\n`.
fn trim_line_ending(buf: &[u8]) -> &[u8] {
    let line = buf.strip_suffix(b"\n").unwrap_or(buf);
    line.strip_suffix(b"\r").unwrap_or(line)
}

fn write_line<W: Write>(output: &mut W, line: &[u8]) -> io::Result<()> {
    output.write_all(line)?;
    output.write_all(b"\n")?;
    output.flush()
}

/// Stream `input` to `output` line by line until end-of-stream, rewriting
/// timestamps relative to `clock`. Output is flushed after every line.
///
/// Lines are handled as bytes; invalid UTF-8 is passed through, not treated
/// as a read failure.
pub fn run<R, W, C>(mut input: R, mut output: W, clock: &C) -> Result<RewriteStats, FilterError>
where
    R: BufRead,
    W: Write,
    C: Clock + ?Sized,
{
    let mut stats = RewriteStats::default();
    let mut buf = Vec::new();
    info!("Filtering input");

    loop {
        buf.clear();
        let read = input
            .read_until(b'\n', &mut buf)
            .map_err(|source| FilterError::Read { source })?;
        if read == 0 {
            break;
        }

        let line = trim_line_ending(&buf);
        let rewritten = rewrite_bytes_with_stats(line, &clock.now(), &mut stats);
        stats.lines += 1;

        write_line(&mut output, &rewritten).map_err(|source| FilterError::Write { source })?;
    }

    debug!(
        lines = stats.lines,
        rewritten = stats.rewritten,
        skipped = stats.skipped,
        "Input exhausted"
    );
    Ok(stats)
}
