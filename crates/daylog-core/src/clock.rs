//! Source of the current date and time.
//!
//! "Today" is a calendar day in the user's timezone and decides whether a
//! refresh may carry entries over. It is kept behind a trait so tests and the
//! CLI's `--today` override can pin it.

use std::sync::Mutex;

use chrono::{DateTime, Duration, Local, NaiveDate, NaiveTime, Utc};
use chrono_tz::Tz;

pub trait Clock: Send + Sync {
    /// Current calendar day.
    fn today(&self) -> NaiveDate;

    /// Current instant, used for `created_at`.
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock, optionally evaluated in a fixed IANA timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock {
    timezone: Option<Tz>,
    pinned_day: Option<NaiveDate>,
}

impl SystemClock {
    /// Clock using the host's local timezone.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timezone(timezone: Tz) -> Self {
        Self {
            timezone: Some(timezone),
            pinned_day: None,
        }
    }

    /// Report `day` as today while `now` keeps following the wall clock.
    pub fn pinned_to(mut self, day: NaiveDate) -> Self {
        self.pinned_day = Some(day);
        self
    }
}

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        if let Some(day) = self.pinned_day {
            return day;
        }
        let now = Utc::now();
        match self.timezone {
            Some(tz) => now.with_timezone(&tz).date_naive(),
            None => now.with_timezone(&Local).date_naive(),
        }
    }

    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Deterministic clock for tests.
///
/// Each call to `now` advances one millisecond so creation order stays total.
#[derive(Debug)]
pub struct FixedClock {
    state: Mutex<FixedState>,
}

#[derive(Debug)]
struct FixedState {
    today: NaiveDate,
    next: DateTime<Utc>,
}

impl FixedClock {
    /// Clock whose day is `today`, starting at 08:00 UTC on that day.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            state: Mutex::new(FixedState {
                today,
                next: start_of(today),
            }),
        }
    }

    /// Move to another day. `now` restarts on that day and never goes back.
    pub fn set_today(&self, today: NaiveDate) {
        let mut state = self.lock();
        state.today = today;
        state.next = state.next.max(start_of(today));
    }

    pub fn advance_days(&self, days: i64) {
        let today = self.today() + Duration::days(days);
        self.set_today(today);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FixedState> {
        // A poisoned test clock still holds a usable date.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn start_of(day: NaiveDate) -> DateTime<Utc> {
    day.and_time(NaiveTime::from_hms_opt(8, 0, 0).unwrap_or(NaiveTime::MIN))
        .and_utc()
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.lock().today
    }

    fn now(&self) -> DateTime<Utc> {
        let mut state = self.lock();
        let now = state.next;
        state.next = now + Duration::milliseconds(1);
        now
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(value: &str) -> NaiveDate {
        NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_fixed_clock_is_strictly_increasing() {
        let clock = FixedClock::new(day("2024-03-10"));
        let first = clock.now();
        let second = clock.now();
        assert!(second > first);
        assert_eq!(first.date_naive(), day("2024-03-10"));
    }

    #[test]
    fn test_fixed_clock_advances_days() {
        let clock = FixedClock::new(day("2024-03-08"));
        clock.advance_days(2);
        assert_eq!(clock.today(), day("2024-03-10"));
        assert_eq!(clock.now().date_naive(), day("2024-03-10"));
    }

    #[test]
    fn test_pinned_system_clock() {
        let clock = SystemClock::with_timezone(chrono_tz::Asia::Riyadh).pinned_to(day("2024-03-10"));
        assert_eq!(clock.today(), day("2024-03-10"));
    }
}
