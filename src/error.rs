use std::io;
use thiserror::Error;

/// A located candidate that none of the accepted layouts could interpret.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unrecognized timestamp format: {input}")]
    Unrecognized { input: String },
}

/// Errors that stop the streaming filter.
#[derive(Debug, Error)]
pub enum FilterError {
    #[error("{source}")]
    Read {
        #[source]
        source: io::Error,
    },
    #[error("Failed to write output: {source}")]
    Write {
        #[source]
        source: io::Error,
    },
}
