use std::fmt;

/// Errors raised while building a [`Re`](crate::Re).
///
/// Everything else in the crate reports absence through `Option`/empty
/// collections instead of an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A flag character outside of `i`, `m`, `s`, `g`.
    UnsupportedFlag { flag: char, flags: String },
    /// The matching engine rejected the pattern.
    InvalidPattern { pattern: String, message: String },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnsupportedFlag { flag, flags } => {
                write!(f, "unsupported flag '{flag}' in \"{flags}\" (expected any of \"imsg\")")
            }
            Error::InvalidPattern { pattern, message } => {
                write!(f, "invalid pattern /{pattern}/: {message}")
            }
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;
