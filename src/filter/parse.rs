use chrono::{DateTime, FixedOffset, NaiveDateTime, Timelike};
use tracing::debug;

use crate::error::ParseError;

/// Longest fractional-seconds part accepted (microsecond precision).
const MAX_FRACTION_DIGITS: usize = 6;

/// chrono encodes a leap second (`:60`) as a nanosecond count past this.
const NANOS_PER_SECOND: u32 = 1_000_000_000;

/// The accepted timestamp layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutKind {
    /// `2006-01-02T15:04:05Z`
    UtcBasic,
    /// `2006-01-02T15:04:05.999999Z`
    UtcFractional,
    /// `2006-01-02T15:04:05.999999-07:00`
    OffsetFractional,
    /// `2006-01-02T15:04:05-07:00`
    OffsetBasic,
}

#[derive(Debug, Clone, Copy)]
pub struct Layout {
    pub kind: LayoutKind,
    format: &'static str,
}

/// Layouts in the order they are tried. The first one that consumes the whole
/// input wins, so reordering this table changes which layout is reported.
pub const LAYOUTS: [Layout; 4] = [
    Layout {
        kind: LayoutKind::UtcBasic,
        format: "%Y-%m-%dT%H:%M:%SZ",
    },
    Layout {
        kind: LayoutKind::UtcFractional,
        format: "%Y-%m-%dT%H:%M:%S%.fZ",
    },
    Layout {
        kind: LayoutKind::OffsetFractional,
        format: "%Y-%m-%dT%H:%M:%S%.f%:z",
    },
    Layout {
        kind: LayoutKind::OffsetBasic,
        format: "%Y-%m-%dT%H:%M:%S%:z",
    },
];

/// An absolute instant together with the layout that produced it. The offset
/// written in the text is kept as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedInstant {
    pub at: DateTime<FixedOffset>,
    pub layout: LayoutKind,
}

impl Layout {
    fn parse(&self, s: &str) -> Option<DateTime<FixedOffset>> {
        match self.kind {
            LayoutKind::UtcBasic => NaiveDateTime::parse_from_str(s, self.format)
                .ok()
                .map(|naive| naive.and_utc().fixed_offset()),
            LayoutKind::UtcFractional => {
                if fraction_digits(s) > MAX_FRACTION_DIGITS {
                    return None;
                }
                NaiveDateTime::parse_from_str(s, self.format)
                    .ok()
                    .map(|naive| naive.and_utc().fixed_offset())
            }
            LayoutKind::OffsetFractional => {
                if fraction_digits(s) > MAX_FRACTION_DIGITS {
                    return None;
                }
                DateTime::parse_from_str(s, self.format).ok()
            }
            LayoutKind::OffsetBasic => DateTime::parse_from_str(s, self.format).ok(),
        }
    }
}

/// Number of digits following the seconds field's decimal point, if any.
fn fraction_digits(s: &str) -> usize {
    // The seconds field ends at byte 19 in every accepted layout.
    match s.get(19..) {
        Some(rest) if rest.starts_with('.') => rest[1..]
            .bytes()
            .take_while(|b| b.is_ascii_digit())
            .count(),
        _ => 0,
    }
}

/// Interpret a timestamp candidate by trying each entry of [`LAYOUTS`] in order.
pub fn parse_timestamp(s: &str) -> Result<ParsedInstant, ParseError> {
    for layout in &LAYOUTS {
        // Second 60 is out of range, not a leap second.
        if let Some(at) = layout
            .parse(s)
            .filter(|at| at.nanosecond() < NANOS_PER_SECOND)
        {
            return Ok(ParsedInstant {
                at,
                layout: layout.kind,
            });
        }
    }

    debug!(input = s, "No layout matched timestamp candidate");
    Err(ParseError::Unrecognized {
        input: s.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fraction_digits_counts_after_seconds() {
        assert_eq!(fraction_digits("2023-01-01T00:00:00Z"), 0);
        assert_eq!(fraction_digits("2023-01-01T00:00:00.5Z"), 1);
        assert_eq!(fraction_digits("2023-01-01T00:00:00.123456+02:00"), 6);
        assert_eq!(fraction_digits("2023-01-01T00:00:00.1234567Z"), 7);
        assert_eq!(fraction_digits("short"), 0);
    }
}
