//! Stepping clock for deterministic timestamps.

use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};

use crate::ports::clock::Clock;

/// Clock that starts at a fixed instant and advances one second per call.
pub struct FixedClock {
    next: Mutex<DateTime<Utc>>,
}

impl FixedClock {
    /// Creates a clock whose first reading is `start`.
    #[must_use]
    pub fn starting_at(start: DateTime<Utc>) -> Self {
        Self { next: Mutex::new(start) }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        let mut next = self.next.lock().expect("clock lock poisoned");
        let current = *next;
        *next = current + Duration::seconds(1);
        current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advances_one_second_per_reading() {
        let start: DateTime<Utc> = "2024-06-15T10:30:00Z".parse().unwrap();
        let clock = FixedClock::starting_at(start);

        assert_eq!(clock.now().to_rfc3339(), "2024-06-15T10:30:00+00:00");
        assert_eq!(clock.now().to_rfc3339(), "2024-06-15T10:30:01+00:00");
    }
}
