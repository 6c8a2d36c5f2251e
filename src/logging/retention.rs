//! Log file retention management
//!
//! Removes dated log files whose date is older than the retention window.

use std::ffi::OsStr;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Duration, Local, NaiveDate};

use super::file_writer::{base_stem, dated_log_path};

/// Default retention period in days
pub const DEFAULT_RETENTION_DAYS: u64 = 7;

/// Date encoded in a dated file name produced for `base`
///
/// The name must match the one `dated_log_path` builds for that date
/// exactly, so other files sharing a prefix are never picked up.
fn dated_file_date(base: &Path, file_name: &OsStr) -> Option<NaiveDate> {
    let name = file_name.to_string_lossy();
    let (_, digits) = name.strip_suffix(".log")?.rsplit_once('_')?;
    if digits.len() != 8 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let date = NaiveDate::parse_from_str(digits, "%Y%m%d").ok()?;
    let expected = dated_log_path(base, date);
    (expected.file_name() == Some(file_name)).then_some(date)
}

/// Clean up dated files for `base` older than `retention_days`
///
/// Returns the number of files deleted.
pub fn cleanup_old_logs(base: &Path, retention_days: u64) -> Result<usize> {
    let today = Local::now().date_naive();
    let days = i64::try_from(retention_days).unwrap_or(i64::MAX);
    let cutoff = Duration::try_days(days)
        .and_then(|window| today.checked_sub_signed(window))
        .unwrap_or(NaiveDate::MIN);
    cleanup_old_logs_before(base, cutoff)
}

/// Clean up dated files for `base` whose date is before `cutoff`
///
/// Returns the number of files deleted.
pub fn cleanup_old_logs_before(base: &Path, cutoff: NaiveDate) -> Result<usize> {
    let stem = base_stem(base);
    let dir = match stem.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    if !dir.exists() {
        return Ok(0);
    }

    let mut deleted_count = 0;

    for entry in fs::read_dir(dir).with_context(|| format!("Failed to read {:?}", dir))? {
        let entry = entry?;
        let path = entry.path();

        // Only files produced for this base
        let Some(date) = dated_file_date(base, &entry.file_name()) else {
            continue;
        };

        if date < cutoff && path.is_file() && fs::remove_file(&path).is_ok() {
            tracing::debug!(path = %path.display(), "Removed expired log file");
            deleted_count += 1;
        }
    }

    Ok(deleted_count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        File::create(&path).unwrap().write_all(b"test").unwrap();
        path
    }

    #[test]
    fn test_dated_file_date() {
        let base = Path::new("logs/app.log");
        let date = |name: &str| dated_file_date(base, OsStr::new(name));
        assert_eq!(date("app_20260105.log"), NaiveDate::from_ymd_opt(2026, 1, 5));
        assert_eq!(date("app_2026015.log"), None);
        assert_eq!(date("app_20261305.log"), None);
        assert_eq!(date("other_20260105.log"), None);
        assert_eq!(date("x_app_20260105.log"), None);
        assert_eq!(date("app_20260105.txt"), None);
    }

    #[cfg(unix)]
    #[test]
    fn test_cleanup_non_utf8_base() {
        use std::os::unix::ffi::OsStrExt;

        let temp_dir = TempDir::new().unwrap();
        let base = temp_dir.path().join(OsStr::from_bytes(b"\xffapp"));
        let old = temp_dir
            .path()
            .join(OsStr::from_bytes(b"\xffapp_20260101.log"));
        let other = temp_dir
            .path()
            .join(OsStr::from_bytes(b"\xfeapp_20260101.log"));
        File::create(&old).unwrap();
        File::create(&other).unwrap();

        let cutoff = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        let count = cleanup_old_logs_before(&base, cutoff).unwrap();
        assert_eq!(count, 1);
        assert!(!old.exists());
        assert!(other.exists());
    }

    #[test]
    fn test_cleanup_nonexistent_dir() {
        let path = Path::new("/nonexistent/path/for/testing/app");
        let count = cleanup_old_logs(path, DEFAULT_RETENTION_DAYS).unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn test_cleanup_removes_only_expired_files() {
        let temp_dir = TempDir::new().unwrap();
        let old = touch(temp_dir.path(), "app_20260101.log");
        let recent = touch(temp_dir.path(), "app_20260110.log");
        let cutoff = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();

        let count = cleanup_old_logs_before(&temp_dir.path().join("app.log"), cutoff).unwrap();
        assert_eq!(count, 1);
        assert!(!old.exists());
        assert!(recent.exists());
    }

    #[test]
    fn test_cleanup_ignores_other_files() {
        let temp_dir = TempDir::new().unwrap();
        let other = touch(temp_dir.path(), "other.txt");
        let wrong_prefix = touch(temp_dir.path(), "web_20200101.log");
        let longer_prefix = touch(temp_dir.path(), "app_x_20200101.log");

        let cutoff = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let count = cleanup_old_logs_before(&temp_dir.path().join("app"), cutoff).unwrap();
        assert_eq!(count, 0);
        assert!(other.exists());
        assert!(wrong_prefix.exists());
        assert!(longer_prefix.exists());
    }

    #[test]
    fn test_cleanup_keeps_todays_file() {
        let temp_dir = TempDir::new().unwrap();
        let today = Local::now().date_naive();
        let name = format!("app_{}.log", today.format("%Y%m%d"));
        let current = touch(temp_dir.path(), &name);

        let count = cleanup_old_logs(&temp_dir.path().join("app"), 0).unwrap();
        assert_eq!(count, 0);
        assert!(current.exists());
    }
}
