//! Console colorization by severity
//!
//! On ANSI terminals the escape sequence is rendered into the line prefix,
//! so a file sink sharing that prefix receives it too. On Windows the color
//! is applied to the console as a side effect and the prefix stays plain.

use std::io::Write;

use crossterm::style::{Color, Colors};

use crate::level::Level;

/// Colors for a severity, `None` for custom ranks
pub fn level_colors(level: Level) -> Option<Colors> {
    let (fg, bg) = match level {
        Level::DEBUG => (Color::DarkGreen, Color::Reset),
        Level::INFO => (Color::DarkYellow, Color::Reset),
        Level::TRACE => (Color::DarkCyan, Color::Reset),
        Level::WARN => (Color::DarkMagenta, Color::Reset),
        Level::ERROR => (Color::Red, Color::Reset),
        Level::FATAL => (Color::Yellow, Color::Red),
        _ => return None,
    };
    Some(Colors::new(fg, bg))
}

/// Tracks the last color applied to the console
#[derive(Debug, Default)]
pub struct Palette {
    /// `None` until a color has been applied
    last: Option<Option<Colors>>,
}

impl Palette {
    pub fn new() -> Self {
        Self::default()
    }

    /// Colors to switch to for `level`, `None` when already applied
    #[cfg_attr(not(windows), allow(dead_code))]
    fn switch(&mut self, level: Level) -> Option<Option<Colors>> {
        let colors = level_colors(level);
        if self.last == Some(colors) {
            return None;
        }
        self.last = Some(colors);
        Some(colors)
    }

    /// Select the color for `level`
    ///
    /// Returns the text to put in front of the line prefix.
    #[cfg(not(windows))]
    pub fn apply(&mut self, level: Level, _console: Option<&mut Box<dyn Write + Send>>) -> String {
        use crossterm::style::{ResetColor, SetColors};
        use crossterm::Command;

        let mut escape = String::new();
        // Writing into a String cannot fail
        let _ = match level_colors(level) {
            Some(colors) => SetColors(colors).write_ansi(&mut escape),
            None => ResetColor.write_ansi(&mut escape),
        };
        escape
    }

    /// Select the color for `level`
    ///
    /// Queues a color change on `console` when it differs from the last one
    /// and returns an empty string. Nothing happens without a console.
    #[cfg(windows)]
    pub fn apply(&mut self, level: Level, console: Option<&mut Box<dyn Write + Send>>) -> String {
        use crossterm::style::{ResetColor, SetColors};
        use crossterm::QueueableCommand;

        let Some(console) = console else {
            return String::new();
        };
        if let Some(colors) = self.switch(level) {
            let applied = match colors {
                Some(colors) => QueueableCommand::queue(console, SetColors(colors)).map(drop),
                None => QueueableCommand::queue(console, ResetColor).map(drop),
            };
            if let Err(e) = applied {
                tracing::debug!(error = %e, "Failed to set console color");
            }
        }
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declared_levels_have_distinct_colors() {
        let colors: Vec<Colors> = Level::DECLARED
            .iter()
            .map(|level| level_colors(*level).unwrap())
            .collect();
        for (i, a) in colors.iter().enumerate() {
            for b in colors.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_custom_rank_has_no_color() {
        assert!(level_colors(Level::from(12_345)).is_none());
        assert!(level_colors(Level::ALL).is_none());
        assert!(level_colors(Level::OFF).is_none());
    }

    #[test]
    fn test_switch_skips_repeated_colors() {
        let mut palette = Palette::new();
        assert_eq!(palette.switch(Level::INFO), Some(level_colors(Level::INFO)));
        assert_eq!(palette.switch(Level::INFO), None);
        assert_eq!(palette.switch(Level::WARN), Some(level_colors(Level::WARN)));
        assert_eq!(palette.switch(Level::from(1)), Some(None));
        assert_eq!(palette.switch(Level::from(2)), None);
        assert_eq!(palette.switch(Level::INFO), Some(level_colors(Level::INFO)));
    }

    #[cfg(not(windows))]
    #[test]
    fn test_ansi_escape_per_level() {
        let mut palette = Palette::new();
        let debug = palette.apply(Level::DEBUG, None);
        let error = palette.apply(Level::ERROR, None);
        assert!(debug.starts_with("\x1b["));
        assert!(debug.ends_with('m'));
        assert_ne!(debug, error);
        assert_eq!(palette.apply(Level::from(1), None), "\x1b[0m");
    }
}
