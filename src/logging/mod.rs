//! Sinks and sink helpers for log channels
//!
//! Provides the daily rolling file, console colorization by severity, and
//! cleanup of expired dated files.

mod color;
mod file_writer;
mod retention;

pub use color::{level_colors, Palette};
pub use file_writer::{dated_log_path, RollingFile};
pub use retention::{cleanup_old_logs, cleanup_old_logs_before, DEFAULT_RETENTION_DAYS};
