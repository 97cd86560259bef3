pub mod locate;
pub mod parse;
pub mod rewrite;

pub use locate::{Candidate, locate, locate_bytes};
pub use parse::{LAYOUTS, Layout, LayoutKind, ParsedInstant, parse_timestamp};
pub use rewrite::{
    Clock, FixedClock, RewriteStats, SystemClock, rewrite_bytes_with_stats, rewrite_line,
    rewrite_line_with_stats, run,
};
