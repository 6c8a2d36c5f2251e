//! Severity ranks used for filtering
//!
//! Ranks are plain integers. Higher rank means more severe. Note that `TRACE`
//! ranks between `INFO` and `WARN`, which differs from the usual ordering.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Severity rank of a log call, or the threshold of a channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Level(i32);

impl Level {
    /// Passes everything when used as a threshold
    pub const ALL: Level = Level(i32::MIN);
    pub const DEBUG: Level = Level(10_000);
    pub const INFO: Level = Level(20_000);
    pub const TRACE: Level = Level(30_000);
    pub const WARN: Level = Level(40_000);
    pub const ERROR: Level = Level(50_000);
    pub const FATAL: Level = Level(60_000);
    /// Suppresses everything when used as a threshold
    pub const OFF: Level = Level(i32::MAX);

    /// All declared severities a message can be logged at, least severe first
    pub const DECLARED: [Level; 6] = [
        Level::DEBUG,
        Level::INFO,
        Level::TRACE,
        Level::WARN,
        Level::ERROR,
        Level::FATAL,
    ];

    /// Numeric rank of this level
    pub const fn rank(self) -> i32 {
        self.0
    }

    /// Whether a call at this level is emitted under `threshold`
    pub fn passes(self, threshold: Level) -> bool {
        threshold <= self
    }

    /// Alias of a declared level, `None` for custom ranks
    pub fn name(self) -> Option<&'static str> {
        match self {
            Level::OFF => Some("off"),
            Level::FATAL => Some("fatal"),
            Level::ERROR => Some("error"),
            Level::WARN => Some("warn"),
            Level::INFO => Some("info"),
            Level::TRACE => Some("trace"),
            Level::DEBUG => Some("debug"),
            Level::ALL => Some("all"),
            _ => None,
        }
    }
}

impl From<i32> for Level {
    fn from(rank: i32) -> Self {
        Level(rank)
    }
}

impl From<Level> for i32 {
    fn from(level: Level) -> Self {
        level.0
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "{}", self.0),
        }
    }
}

/// Returned when a level alias is not recognized
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown log level alias '{0}'")]
pub struct ParseLevelError(pub String);

impl FromStr for Level {
    type Err = ParseLevelError;

    /// Aliases are case-sensitive
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "off" => Ok(Level::OFF),
            "fatal" => Ok(Level::FATAL),
            "error" => Ok(Level::ERROR),
            "warn" => Ok(Level::WARN),
            "info" => Ok(Level::INFO),
            "trace" => Ok(Level::TRACE),
            "debug" => Ok(Level::DEBUG),
            "all" => Ok(Level::ALL),
            other => Err(ParseLevelError(other.to_string())),
        }
    }
}
