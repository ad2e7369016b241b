//! Error types for the conflictsweep core library.
//!
//! Each subsystem has its own error type derived with `thiserror`, and a
//! top-level [`CoreError`] enum unifies them all for callers that want a
//! single error type.

use thiserror::Error;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Unified error type for the entire core library.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Marker(#[from] MarkerError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

// ---------------------------------------------------------------------------
// Resolve errors
// ---------------------------------------------------------------------------

/// Errors from reading, filtering, and rewriting a target file.
///
/// None of these are retried or caught inside the core; the resolve
/// operation runs to completion or fails outright.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The target path does not exist at read time.
    #[error("file not found: {0}")]
    FileNotFound(String),

    /// The file's bytes are not valid UTF-8.
    #[error("file is not valid UTF-8: {0}")]
    InvalidUtf8(String),

    /// Permission or device error during read or write.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// ---------------------------------------------------------------------------
// Marker structure errors
// ---------------------------------------------------------------------------

/// Structural defects in a file's conflict markers.
///
/// Produced only by the scanner's validation path; the resolver itself is
/// best-effort and never raises these. All line numbers are 1-indexed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarkerError {
    /// A conflict block was opened but never closed before end of file.
    #[error("conflict block starting at line {start_line} is never terminated")]
    Unterminated { start_line: usize },

    /// A block closed without ever seeing a separator.
    #[error("conflict block at lines {start_line}-{end_line} has no separator")]
    MissingSeparator {
        start_line: usize,
        end_line: usize,
    },

    /// A separator marker outside any open block.
    #[error("separator marker at line {line} outside any conflict block")]
    StraySeparator { line: usize },

    /// A second separator inside a block that was already split.
    #[error("second separator at line {line} in block already split at line {first}")]
    DoubleSeparator { line: usize, first: usize },

    /// An end marker with no matching start marker.
    #[error("end marker at line {line} without a matching start marker")]
    StrayEnd { line: usize },

    /// A start marker inside an already-open block.
    #[error("start marker at line {line} inside the block opened at line {open_start}")]
    NestedStart { line: usize, open_start: usize },
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

/// Errors from configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file not found.
    #[error("configuration file not found: {0}")]
    FileNotFound(String),

    /// TOML parse error.
    #[error("configuration parse error: {0}")]
    ParseError(String),

    /// A config value is invalid.
    #[error("invalid configuration value for '{field}': {detail}")]
    InvalidValue { field: String, detail: String },

    /// Generic I/O error reading the config file.
    #[error("configuration I/O error: {0}")]
    IoError(#[from] std::io::Error),
}
