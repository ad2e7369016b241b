//! conflictsweep core library.
//!
//! This crate provides the components for resolving merge-conflict markers
//! in a single text file: marker classification, conflict-block scanning,
//! the resolve routine itself, configuration, and error types.

pub mod config;
pub mod conflict;
pub mod errors;
pub mod markers;

// Re-exports for convenience.
pub use config::AppConfig;
pub use conflict::{resolve_file, resolve_text, ResolveOptions, ResolveReport, Side};
pub use conflict::{scan_file, scan_text, ScanReport};
pub use errors::CoreError;
