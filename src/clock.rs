//! Wall-clock source for timestamps and rollover decisions

use chrono::{Local, NaiveDateTime};

/// Source of local wall-clock time
///
/// Channels read the clock once per emitted call. The trait is object-safe
/// so a channel can hold a `Box<dyn Clock>`.
pub trait Clock: Send + Sync {
    /// Current local date and time
    fn now(&self) -> NaiveDateTime;
}

/// Clock backed by the system's local time zone
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn test_system_clock_is_local_today() {
        let before = Local::now().date_naive();
        let now = SystemClock.now();
        let after = Local::now().date_naive();
        assert!(now.date() == before || now.date() == after);
        assert!(now.year() >= 2024);
    }

    #[test]
    fn test_clock_is_object_safe() {
        let clock: Box<dyn Clock> = Box::new(SystemClock);
        let _ = clock.now();
    }
}
