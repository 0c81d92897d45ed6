//! Error types for stream extraction and daily notes
//!
//! Domain failures are typed so callers (and tests) can match on them.
//! Filesystem plumbing wraps these in `anyhow` with context at the call site.

use std::path::PathBuf;

/// Malformed inline tag construct on a single line
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TagError {
    /// `[[]]` or a bracket pair holding only whitespace
    #[error("empty tag in `[[...]]`")]
    EmptyBracket,

    /// A `[[` opener with no matching `]]` on the same line
    #[error("unterminated `[[` near `{0}`")]
    UnterminatedBracket(String),
}

/// Failure while turning one master-document line into a stream
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StreamError {
    #[error("malformed tag: {source}: {text}")]
    MalformedTag {
        #[source]
        source: TagError,
        text: String,
    },

    /// A marked line carries no `dddd-dd-dd` tag, so it cannot be ordered
    #[error("stream with no dates: {0}")]
    UndatedStream(String),
}

/// A [`StreamError`] located in the master document (1-based line number)
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("line {line}: {error}")]
pub struct LineError {
    pub line: usize,
    #[source]
    pub error: StreamError,
}

/// Failure while creating today's daily note
#[derive(Debug, thiserror::Error)]
pub enum DailyNoteError {
    #[error("no daily note dated on or before {today} in {}", base.display())]
    NoPreviousNote { today: String, base: PathBuf },

    #[error("add-day needs a template path (--template)")]
    MissingTemplate,
}
