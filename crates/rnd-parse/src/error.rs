//! Error types for RND/MD parsing and mission linking.

use thiserror::Error;

/// Errors raised while parsing an RND or MD file.
///
/// `Syntax`, `Schema`, and `Reference` all abort the parse and carry the
/// 1-based line number of the offending line, the idiomatic replacement for
/// carrying a line number rather than printing straight to stderr.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Unknown command, malformed identifier, or unparsable number.
    #[error("line {line}: {message}")]
    Syntax { line: u32, message: String },

    /// Count mismatch, missing required section, or a repeated `num_*`.
    #[error("line {line}: {message}")]
    Schema { line: u32, message: String },

    /// A pass-2 identifier (`checkpoint`, `stop`, `exit`) did not resolve.
    #[error("line {line}: {message}")]
    Reference { line: u32, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ParseError {
    pub(crate) fn syntax(line: u32, message: impl Into<String>) -> Self {
        Self::Syntax { line, message: message.into() }
    }

    pub(crate) fn schema(line: u32, message: impl Into<String>) -> Self {
        Self::Schema { line, message: message.into() }
    }

    pub(crate) fn reference(line: u32, message: impl Into<String>) -> Self {
        Self::Reference { line, message: message.into() }
    }
}

pub type ParseResult<T> = Result<T, ParseError>;

/// Accumulated failure from [`crate::link_mission_route`]: checkpoint ids the
/// mission referenced that did not resolve against the route. Unlike
/// `ParseError` this never aborts linking — it is reported alongside the
/// best-effort [`rnd_model::LinkedMission`](rnd_model::LinkedMission).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{} checkpoint id(s) did not resolve against the route: {unresolved:?}", unresolved.len())]
pub struct LinkError {
    pub unresolved: Vec<i32>,
}
