//! Conflict resolution by side selection.
//!
//! [`resolve_text`] is the pure scan-and-filter routine: a single forward
//! pass over the lines of a file, tracking two flags (`in_conflict`,
//! `in_incoming`), that drops every marker line and every line of the
//! non-selected section. [`resolve_file`] wraps it with the read-then-write
//! file shell.
//!
//! The routine is best-effort by contract: malformed marker sequences are
//! never an error here. An unterminated block simply leaves the flags set
//! through end of input; stray separators and end markers mutate flags that
//! are already in the state they set. Structural validation lives in the
//! [scanner](crate::conflict::scanner).

use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::ResolveConfig;
use crate::errors::ResolveError;
use crate::markers::{self, MarkerKind};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Which section of each conflict block survives resolution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    /// Keep the incoming section (between separator and end marker).
    #[default]
    Incoming,
    /// Keep the current section (between start marker and separator).
    Current,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Incoming => write!(f, "incoming"),
            Self::Current => write!(f, "current"),
        }
    }
}

/// Options for a resolve run.
#[derive(Debug, Clone)]
pub struct ResolveOptions {
    /// Which side of each block to keep.
    pub side: Side,
    /// Write through a same-directory temp file renamed into place, instead
    /// of overwriting the target directly.
    pub atomic: bool,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            side: Side::Incoming,
            atomic: true,
        }
    }
}

impl From<&ResolveConfig> for ResolveOptions {
    fn from(config: &ResolveConfig) -> Self {
        Self {
            side: config.side,
            atomic: config.atomic_write,
        }
    }
}

/// Summary of one resolve pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolveReport {
    /// Conflict blocks closed by an end marker during the pass.
    pub conflicts_resolved: usize,
    /// Lines emitted to the output.
    pub lines_kept: usize,
    /// Lines dropped: marker lines plus the non-selected section's lines.
    pub lines_removed: usize,
    /// Whether the output differs from the input.
    pub changed: bool,
}

/// The outcome of [`resolve_text`]: the filtered text plus its report.
#[derive(Debug, Clone)]
pub struct Resolved {
    pub text: String,
    pub report: ResolveReport,
}

// ---------------------------------------------------------------------------
// Pure filtering pass
// ---------------------------------------------------------------------------

/// Filter conflict blocks out of `text`, keeping the chosen `side`.
///
/// Lines retain their original terminators (`\n` or `\r\n`); a final line
/// without a terminator is carried through unchanged. Surviving lines are
/// emitted verbatim, in order.
pub fn resolve_text(text: &str, side: Side) -> Resolved {
    let mut out = String::with_capacity(text.len());
    let mut report = ResolveReport::default();

    let mut in_conflict = false;
    let mut in_incoming = false;

    for line in text.split_inclusive('\n') {
        match markers::classify(line) {
            Some(MarkerKind::Start) => {
                in_conflict = true;
                in_incoming = false;
                report.lines_removed += 1;
            }
            Some(MarkerKind::Separator) => {
                in_incoming = true;
                report.lines_removed += 1;
            }
            Some(MarkerKind::End) => {
                if in_conflict {
                    report.conflicts_resolved += 1;
                    debug!(side = %side, "conflict block resolved");
                }
                in_conflict = false;
                in_incoming = false;
                report.lines_removed += 1;
            }
            None => {
                let keep = match side {
                    Side::Incoming => !in_conflict || in_incoming,
                    Side::Current => !in_conflict || !in_incoming,
                };
                if keep {
                    out.push_str(line);
                    report.lines_kept += 1;
                } else {
                    report.lines_removed += 1;
                }
            }
        }
    }

    if in_conflict {
        warn!("conflict block still open at end of input");
    }

    report.changed = out != text;
    Resolved { text: out, report }
}

// ---------------------------------------------------------------------------
// File shell
// ---------------------------------------------------------------------------

/// Resolve conflict markers in the file at `path`, overwriting it in place.
///
/// The full contents are read into memory as UTF-8, filtered with
/// [`resolve_text`], and written back over the same path. The read handle is
/// released before the write begins.
pub fn resolve_file(path: &Path, options: &ResolveOptions) -> Result<ResolveReport, ResolveError> {
    info!(path = %path.display(), side = %options.side, "resolving conflict markers");

    let text = super::read_utf8(path)?;
    let resolved = resolve_text(&text, options.side);

    if options.atomic {
        write_atomic(path, &resolved.text)?;
    } else {
        std::fs::write(path, &resolved.text)?;
    }

    info!(
        conflicts = resolved.report.conflicts_resolved,
        lines_removed = resolved.report.lines_removed,
        "resolve complete"
    );
    Ok(resolved.report)
}

/// Write `contents` to `path` via a temp file in the same directory, renamed
/// into place on success. A failed write leaves the original file intact.
fn write_atomic(path: &Path, contents: &str) -> Result<(), ResolveError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(contents.as_bytes())?;
    tmp.persist(path).map_err(|e| ResolveError::Io(e.error))?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
