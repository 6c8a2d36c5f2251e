//! Named, leveled log channel
//!
//! A `LogChannel` writes timestamped lines to the console and/or a daily
//! rolling file. Filtering, rollover, rendering and both sink writes happen
//! under one lock, so lines from concurrent callers never interleave.

use std::fmt::{self, Write as _};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::clock::{Clock, SystemClock};
use crate::error::{SinkError, SinkKind};
use crate::level::Level;
use crate::logging::{Palette, RollingFile};

/// Name used when none is given
pub const DEFAULT_NAME: &str = "UNNAMED";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Callback receiving sink failures
pub type ErrorHook = Box<dyn Fn(&SinkError) + Send + Sync>;

/// Mutable state guarded by the channel lock
struct ChannelState {
    /// `None` once the console has been disabled
    console: Option<Box<dyn Write + Send>>,
    file: RollingFile,
    palette: Palette,
}

/// A named logger instance
///
/// Channels are independent of each other and safe to share between threads
/// (wrap in an `Arc`). No operation returns an error or panics: sink
/// failures only make that sink unavailable for the call.
///
/// ```no_run
/// use logchannel::{Level, LogChannel};
///
/// let log = LogChannel::new("worker");
/// log.set_level(Level::INFO);
/// log.set_file_name("logs/worker.log");
/// log.info(format_args!("started {} jobs", 4));
/// ```
pub struct LogChannel {
    name: String,
    /// Only written while holding `state`
    threshold: AtomicI32,
    clock: Box<dyn Clock>,
    error_hook: Option<ErrorHook>,
    state: Mutex<ChannelState>,
}

impl LogChannel {
    /// Create a channel writing to stdout and passing every level
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            threshold: AtomicI32::new(Level::ALL.rank()),
            clock: Box::new(SystemClock),
            error_hook: None,
            state: Mutex::new(ChannelState {
                console: Some(Box::new(io::stdout())),
                file: RollingFile::new(),
                palette: Palette::new(),
            }),
        }
    }

    /// Replace stdout with another console writer
    pub fn with_console(mut self, console: impl Write + Send + 'static) -> Self {
        self.state_mut().console = Some(Box::new(console));
        self
    }

    /// Replace the system clock
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Receive sink failures that are otherwise swallowed
    ///
    /// The hook runs while the channel lock is held and must not log to the
    /// same channel.
    pub fn with_error_hook(mut self, hook: impl Fn(&SinkError) + Send + Sync + 'static) -> Self {
        self.error_hook = Some(Box::new(hook));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current threshold
    pub fn level(&self) -> Level {
        Level::from(self.threshold.load(Ordering::Relaxed))
    }

    /// Set the minimum level that gets emitted
    pub fn set_level(&self, level: Level) {
        let _state = self.lock();
        self.threshold.store(level.rank(), Ordering::Relaxed);
    }

    /// Set the threshold from an alias such as `"warn"`
    ///
    /// Unknown aliases leave the threshold unchanged.
    pub fn set_level_alias(&self, alias: &str) {
        match alias.parse::<Level>() {
            Ok(level) => self.set_level(level),
            Err(e) => tracing::debug!(channel = %self.name, "Ignoring level: {}", e),
        }
    }

    /// Enable or reconfigure the file sink
    ///
    /// The dated file is (re)opened on the next emitted call. An empty path
    /// disables the file sink.
    pub fn set_file_name(&self, path: impl AsRef<Path>) {
        self.lock().file.set_base(path);
    }

    /// Permanently stop writing to the console
    pub fn stop_write_to_console(&self) {
        self.lock().console = None;
    }

    pub fn console_enabled(&self) -> bool {
        self.lock().console.is_some()
    }

    /// Path of the dated file currently open
    pub fn current_file_path(&self) -> Option<PathBuf> {
        self.lock().file.current_path().map(Path::to_path_buf)
    }

    /// Emit a message at `level`
    pub fn log(&self, level: Level, args: fmt::Arguments<'_>) {
        // Unlocked fast exit, re-checked below
        if !level.passes(self.level()) {
            return;
        }

        let mut guard = self.lock();
        let state = &mut *guard;
        if !level.passes(self.level()) {
            return;
        }

        let now = self.clock.now();

        if let Err(e) = state.file.ensure_open(now.date()) {
            self.report(e);
        }

        let color = state.palette.apply(level, state.console.as_mut());
        let prefix = format!("{}[{}]{}", color, self.name, now.format(TIMESTAMP_FORMAT));

        if let Some(console) = state.console.as_mut() {
            let line = render_line(&prefix, args);
            let written = console
                .write_all(line.as_bytes())
                .and_then(|_| console.flush());
            if let Err(source) = written {
                self.report(SinkError::Write {
                    sink: SinkKind::Console,
                    source,
                });
            }
        }

        if state.file.is_open() {
            let line = render_line(&prefix, args);
            if let Err(e) = state.file.write_line(&line) {
                self.report(e);
            }
        }
    }

    pub fn fatal(&self, args: fmt::Arguments<'_>) {
        self.log(Level::FATAL, args);
    }

    pub fn error(&self, args: fmt::Arguments<'_>) {
        self.log(Level::ERROR, args);
    }

    pub fn warn(&self, args: fmt::Arguments<'_>) {
        self.log(Level::WARN, args);
    }

    pub fn info(&self, args: fmt::Arguments<'_>) {
        self.log(Level::INFO, args);
    }

    pub fn trace(&self, args: fmt::Arguments<'_>) {
        self.log(Level::TRACE, args);
    }

    pub fn debug(&self, args: fmt::Arguments<'_>) {
        self.log(Level::DEBUG, args);
    }

    fn lock(&self) -> MutexGuard<'_, ChannelState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn state_mut(&mut self) -> &mut ChannelState {
        self.state.get_mut().unwrap_or_else(PoisonError::into_inner)
    }

    fn report(&self, error: SinkError) {
        tracing::warn!(channel = %self.name, sink = %error.sink(), "Log sink unavailable: {}", error);
        if let Some(hook) = &self.error_hook {
            hook(&error);
        }
    }
}

impl Default for LogChannel {
    fn default() -> Self {
        Self::new(DEFAULT_NAME)
    }
}

impl fmt::Debug for LogChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogChannel")
            .field("name", &self.name)
            .field("level", &self.level())
            .finish_non_exhaustive()
    }
}

/// Prefix, message and newline as one buffer, written with a single call
fn render_line(prefix: &str, args: fmt::Arguments<'_>) -> String {
    let mut line = String::with_capacity(prefix.len() + 64);
    line.push_str(prefix);
    let _ = line.write_fmt(args);
    line.push('\n');
    line
}
