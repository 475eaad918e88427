//! Error types for parsing and tree manipulation.

use crate::value::Kind;
use thiserror::Error;

/// Errors produced by the sandbox-json core.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonError {
    /// The input was malformed, truncated, or started with an unrecognized byte.
    /// `offset` is the byte position where parsing gave up.
    #[error("JSON parse error at byte {offset}: {reason}")]
    Parse { offset: usize, reason: ParseReason },

    /// A container operation was applied to a value of the wrong kind,
    /// e.g. appending a child to a number.
    #[error("expected {expected}, found {found}")]
    WrongKind { expected: &'static str, found: Kind },
}

/// Why a parse attempt failed. Carries no heap data so the failure path
/// never allocates.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseReason {
    #[error("unexpected end of input")]
    UnexpectedEnd,

    #[error("unexpected byte 0x{0:02x}")]
    UnexpectedByte(u8),

    #[error("invalid number")]
    InvalidNumber,

    #[error("unterminated string")]
    UnterminatedString,

    #[error("string is not valid UTF-8")]
    InvalidUtf8,

    #[error("expected ':' after object key")]
    ExpectedColon,

    #[error("expected string key")]
    ExpectedKey,

    #[error("nesting deeper than {0} levels")]
    TooDeep(usize),
}

impl JsonError {
    /// Byte offset of a parse failure, `None` for other errors.
    pub fn offset(&self) -> Option<usize> {
        match self {
            JsonError::Parse { offset, .. } => Some(*offset),
            JsonError::WrongKind { .. } => None,
        }
    }

    /// Returns true if this error came from the parser.
    pub fn is_parse(&self) -> bool {
        matches!(self, JsonError::Parse { .. })
    }
}

/// Convenience alias used throughout sandbox-json.
pub type Result<T> = std::result::Result<T, JsonError>;
