//! Line-oriented reader for RND/MD text.
//!
//! Line buffer and line counter live on `LineReader` itself rather than as
//! shared state, so two parses (or a parse nested inside another) can run
//! concurrently.

use std::io::BufRead;

/// One logical line read from the underlying stream: its 1-based line
/// number and its raw (already newline-stripped) text.
#[derive(Debug, Clone)]
pub struct Line {
    pub number: u32,
    pub text: String,
}

/// Reads one line at a time from a `BufRead`, tracking a 1-based line
/// counter for diagnostics.
pub struct LineReader<R> {
    inner: R,
    lineno: u32,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner, lineno: 0 }
    }

    /// Current line number — the number of the last line returned by
    /// [`next_line`](Self::next_line), or 0 if none has been read yet.
    pub fn lineno(&self) -> u32 {
        self.lineno
    }

    /// Read the next logical line, or `None` at end of stream.
    ///
    /// Trailing `\n` and `\r` are stripped. The line is returned whether or
    /// not it is blank or a comment — callers filter those via
    /// [`is_comment`] on the first token.
    pub fn next_line(&mut self) -> std::io::Result<Option<Line>> {
        let mut buf = String::new();
        let n = self.inner.read_line(&mut buf)?;
        if n == 0 {
            return Ok(None);
        }
        self.lineno += 1;
        while buf.ends_with('\n') || buf.ends_with('\r') {
            buf.pop();
        }
        Ok(Some(Line { number: self.lineno, text: buf }))
    }
}

/// Split a line into whitespace-delimited fields. The delimiter set is
/// space, tab, and `\r` (`\n` never appears since [`LineReader::next_line`]
/// already stripped it). Empty fields are skipped.
pub fn fields(line: &str) -> impl Iterator<Item = &str> {
    line.split(|c| c == ' ' || c == '\t' || c == '\r')
        .filter(|s| !s.is_empty())
}

/// `true` if `token` opens a single-line `/* ... */` comment.
///
/// Multi-line comments spanning more than one line are not recognized; a
/// closing `*/` is never looked for.
pub fn is_comment(token: &str) -> bool {
    token.starts_with("/*")
}
