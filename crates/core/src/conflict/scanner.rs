//! Conflict-block scanning and structural validation.
//!
//! The scanner walks a file's lines without modifying anything and reports
//! every conflict block it finds, with 1-indexed marker line numbers and
//! per-section line counts. Structural defects (stray markers, unterminated
//! or separator-less blocks) are collected as data, never raised — the
//! [`validate_text`] wrapper turns the first defect into a
//! [`MarkerError`] for callers that want a hard failure.

use std::path::Path;

use serde::Serialize;
use tracing::{debug, info};

use crate::errors::{MarkerError, ResolveError};
use crate::markers::{self, MarkerKind};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// One conflict block located in a file. All line numbers are 1-indexed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConflictBlock {
    /// Line of the `<<<<<<<` marker.
    pub start_line: usize,
    /// Line of the `=======` marker, if the block has one.
    pub separator_line: Option<usize>,
    /// Line of the `>>>>>>>` marker; `None` for an unterminated block.
    pub end_line: Option<usize>,
    /// Content lines in the current section.
    pub current_lines: usize,
    /// Content lines in the incoming section.
    pub incoming_lines: usize,
}

/// Everything one scan pass found.
#[derive(Debug, Clone, Default)]
pub struct ScanReport {
    /// Conflict blocks in file order, including defective ones.
    pub blocks: Vec<ConflictBlock>,
    /// Structural defects in file order.
    pub defects: Vec<MarkerError>,
}

impl ScanReport {
    /// `true` when the file's marker structure is well-formed.
    pub fn is_clean(&self) -> bool {
        self.defects.is_empty()
    }

    /// `true` when at least one conflict block was found.
    pub fn has_conflicts(&self) -> bool {
        !self.blocks.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Scanning
// ---------------------------------------------------------------------------

/// Scan `text` for conflict blocks and structural defects.
///
/// Never fails; defects are reported in the returned [`ScanReport`].
pub fn scan_text(text: &str) -> ScanReport {
    let mut report = ScanReport::default();
    let mut open: Option<ConflictBlock> = None;

    for (idx, line) in text.lines().enumerate() {
        let line_no = idx + 1;
        match markers::classify(line) {
            Some(MarkerKind::Start) => {
                if let Some(block) = open.take() {
                    report.defects.push(MarkerError::NestedStart {
                        line: line_no,
                        open_start: block.start_line,
                    });
                    report.blocks.push(block);
                }
                open = Some(ConflictBlock {
                    start_line: line_no,
                    separator_line: None,
                    end_line: None,
                    current_lines: 0,
                    incoming_lines: 0,
                });
            }

            Some(MarkerKind::Separator) => match open.as_mut() {
                None => report.defects.push(MarkerError::StraySeparator { line: line_no }),
                Some(block) => match block.separator_line {
                    None => block.separator_line = Some(line_no),
                    Some(first) => report.defects.push(MarkerError::DoubleSeparator {
                        line: line_no,
                        first,
                    }),
                },
            },

            Some(MarkerKind::End) => match open.take() {
                None => report.defects.push(MarkerError::StrayEnd { line: line_no }),
                Some(mut block) => {
                    block.end_line = Some(line_no);
                    if block.separator_line.is_none() {
                        report.defects.push(MarkerError::MissingSeparator {
                            start_line: block.start_line,
                            end_line: line_no,
                        });
                    }
                    debug!(
                        start = block.start_line,
                        end = line_no,
                        "conflict block found"
                    );
                    report.blocks.push(block);
                }
            },

            None => {
                if let Some(block) = open.as_mut() {
                    if block.separator_line.is_some() {
                        block.incoming_lines += 1;
                    } else {
                        block.current_lines += 1;
                    }
                }
            }
        }
    }

    if let Some(block) = open.take() {
        report.defects.push(MarkerError::Unterminated {
            start_line: block.start_line,
        });
        report.blocks.push(block);
    }

    info!(
        blocks = report.blocks.len(),
        defects = report.defects.len(),
        "scan complete"
    );
    report
}

/// Scan the file at `path`.
pub fn scan_file(path: &Path) -> Result<ScanReport, ResolveError> {
    let text = super::read_utf8(path)?;
    Ok(scan_text(&text))
}

/// Scan `text` and fail on the first structural defect.
pub fn validate_text(text: &str) -> Result<ScanReport, MarkerError> {
    let report = scan_text(text);
    match report.defects.first() {
        Some(defect) => Err(defect.clone()),
        None => Ok(report),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
