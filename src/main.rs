use std::path::PathBuf;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use logchannel::logging;
use logchannel::{ChannelConfig, Level};

fn main() -> Result<()> {
    // Diagnostics from the library itself go to stderr
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| "logchannel=info".into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let config = match std::env::args_os().nth(1) {
        Some(path) => ChannelConfig::load(&PathBuf::from(path))?,
        None => ChannelConfig::default(),
    };

    if let Some(base) = config.file_path()? {
        let count = logging::cleanup_old_logs(&base, config.retention_days())?;
        if count > 0 {
            tracing::info!("Cleaned up {} old log files", count);
        }
    }

    let channel = config.build()?;
    for level in Level::DECLARED {
        channel.log(level, format_args!(" sample message at {}", level));
    }

    if let Some(path) = channel.current_file_path() {
        tracing::info!("Logging to: {}", path.display());
    }

    Ok(())
}
