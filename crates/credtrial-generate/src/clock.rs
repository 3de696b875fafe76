//! Calendar source for year-based patterns.
//!
//! Generators never read the system clock directly, so tests can pin the
//! year with [`FixedClock`].

use chrono::Datelike;

pub trait Clock: Send + Sync {
    fn current_year(&self) -> i32;
}

/// Local wall-clock year.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn current_year(&self) -> i32 {
        chrono::Local::now().year()
    }
}

/// Always reports the same year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub i32);

impl Clock for FixedClock {
    fn current_year(&self) -> i32 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock() {
        assert_eq!(FixedClock(2031).current_year(), 2031);
    }

    #[test]
    fn test_system_clock_is_plausible() {
        assert!(SystemClock.current_year() >= 2024);
    }
}
