//! Logchannel - embeddable leveled logger
//!
//! Each [`LogChannel`] writes timestamped lines to the console and/or a
//! daily rolling file, filtered by a severity threshold and colorized by
//! level on the console.

pub mod channel;
pub mod clock;
pub mod config;
pub mod error;
pub mod level;
pub mod logging;

pub use channel::{ErrorHook, LogChannel, DEFAULT_NAME};
pub use clock::{Clock, SystemClock};
pub use config::ChannelConfig;
pub use error::{SinkError, SinkKind};
pub use level::{Level, ParseLevelError};
