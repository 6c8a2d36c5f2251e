//! Daily rolling log file
//!
//! One file per calendar day, named `<base>_<YYYYMMDD>.log` and opened in
//! append mode so restarts keep same-day history.

use std::ffi::OsStr;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::error::{SinkError, SinkKind};

const LOG_EXTENSION: &str = "log";

/// Base path with a trailing `.log` extension removed, if present
pub(crate) fn base_stem(base: &Path) -> PathBuf {
    if base.extension() == Some(OsStr::new(LOG_EXTENSION)) {
        base.with_extension("")
    } else {
        base.to_path_buf()
    }
}

/// Dated log file path for `base` on `date`
///
/// `app` and `app.log` both map to `app_<YYYYMMDD>.log`.
pub fn dated_log_path(base: &Path, date: NaiveDate) -> PathBuf {
    let mut name = base_stem(base).into_os_string();
    name.push(format!("_{}.{}", date.format("%Y%m%d"), LOG_EXTENSION));
    PathBuf::from(name)
}

/// The currently open dated file
#[derive(Debug)]
struct OpenLog {
    file: File,
    path: PathBuf,
}

/// File sink that reopens itself when the calendar day changes
#[derive(Debug, Default)]
pub struct RollingFile {
    /// Base path, `None` when the file sink is inactive
    base: Option<PathBuf>,
    /// At most one open handle
    current: Option<OpenLog>,
    /// Date the current handle was opened for, `None` forces a reopen
    day: Option<NaiveDate>,
}

impl RollingFile {
    /// Create an inactive file sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the base path and force a reopen on the next write
    ///
    /// The previous handle stays open until the next call to `ensure_open`.
    /// An empty path deactivates the sink.
    pub fn set_base(&mut self, base: impl AsRef<Path>) {
        let base = base.as_ref();
        self.base = if base.as_os_str().is_empty() {
            None
        } else {
            Some(base.to_path_buf())
        };
        self.day = None;
    }

    /// Whether a base path is configured
    pub fn is_configured(&self) -> bool {
        self.base.is_some()
    }

    pub fn is_open(&self) -> bool {
        self.current.is_some()
    }

    /// Path of the currently open file
    pub fn current_path(&self) -> Option<&Path> {
        self.current.as_ref().map(|open| open.path.as_path())
    }

    /// Make sure the file for `date` is open, rolling over if needed
    ///
    /// Returns `Ok(false)` when no base path is configured. On failure the
    /// handle stays empty, so the next call tries again.
    pub fn ensure_open(&mut self, date: NaiveDate) -> Result<bool, SinkError> {
        let Some(base) = self.base.as_ref() else {
            self.close();
            return Ok(false);
        };

        if self.current.is_some() && self.day == Some(date) {
            return Ok(true);
        }

        let path = dated_log_path(base, date);
        self.close();
        self.day = Some(date);

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| SinkError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|source| SinkError::OpenFile {
                path: path.clone(),
                source,
            })?;

        tracing::debug!(path = %path.display(), "Opened log file");
        self.current = Some(OpenLog { file, path });
        Ok(true)
    }

    /// Append one rendered line and flush
    ///
    /// Does nothing when no file is open.
    pub fn write_line(&mut self, line: &str) -> Result<(), SinkError> {
        let Some(open) = self.current.as_mut() else {
            return Ok(());
        };
        open.file
            .write_all(line.as_bytes())
            .and_then(|_| open.file.flush())
            .map_err(|source| SinkError::Write {
                sink: SinkKind::File,
                source,
            })
    }

    /// Close the open handle, if any
    pub fn close(&mut self) {
        if let Some(open) = self.current.take() {
            tracing::debug!(path = %open.path.display(), "Closed log file");
        }
    }
}
