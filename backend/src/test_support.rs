//! Test utilities for the backend crate.
//!
//! Shared by unit tests in `src/` and the integration suites under `tests/`.

pub mod clock {
    //! Deterministic clocks for classification tests.

    use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
    use mockable::Clock;

    /// Build a naive timestamp, panicking on impossible calendar values.
    pub fn timestamp(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        min: u32,
        sec: u32,
    ) -> NaiveDateTime {
        match NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|d| d.and_hms_opt(hour, min, sec))
        {
            Some(value) => value,
            None => panic!("invalid fixture timestamp {year}-{month}-{day} {hour}:{min}:{sec}"),
        }
    }

    /// Clock frozen at a wall-clock time in the process's local zone.
    #[derive(Debug, Clone, Copy)]
    pub struct FixtureClock {
        local_now: NaiveDateTime,
    }

    impl FixtureClock {
        /// Freeze the clock at `local_now`.
        pub fn at(local_now: NaiveDateTime) -> Self {
            Self { local_now }
        }
    }

    impl Clock for FixtureClock {
        fn local(&self) -> DateTime<Local> {
            match Local.from_local_datetime(&self.local_now).earliest() {
                Some(value) => value,
                None => panic!("fixture time {} falls in a DST gap", self.local_now),
            }
        }

        fn utc(&self) -> DateTime<Utc> {
            self.local().with_timezone(&Utc)
        }
    }
}
