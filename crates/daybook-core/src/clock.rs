use chrono::{Local, NaiveDate, Utc};

/// Source of the current date and time.
pub trait Clock {
    /// Today's calendar date in the user's local time.
    fn today(&self) -> NaiveDate;
    /// Milliseconds since the Unix epoch, used to stamp default sort orders.
    fn now_millis(&self) -> i64;
}

/// The system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// A clock pinned to a fixed instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    pub today: NaiveDate,
    pub now_millis: i64,
}

impl FixedClock {
    /// Pins the date to `today` and the time to midnight UTC of that date.
    pub fn new(today: NaiveDate) -> Self {
        let now_millis = today
            .and_hms_opt(0, 0, 0)
            .map(|dt| dt.and_utc().timestamp_millis())
            .unwrap_or_default();
        Self { today, now_millis }
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.today
    }

    fn now_millis(&self) -> i64 {
        self.now_millis
    }
}
