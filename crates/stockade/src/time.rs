use chrono::{DateTime, Utc};

/// A trait for time sources that report the current UTC instant.
///
/// This abstraction allows you to plug in the real system clock or a fixed
/// instant in tests, so that date-bearing tokens (`DATE`, `TIME`, `YEAR`,
/// `MONTH`, `DAY`) expand deterministically under test.
///
/// # Example
///
/// ```
/// use chrono::{DateTime, TimeZone, Utc};
/// use stockade::TimeSource;
///
/// struct FixedTime;
/// impl TimeSource for FixedTime {
///     fn now(&self) -> DateTime<Utc> {
///         Utc.with_ymd_and_hms(2024, 3, 5, 0, 0, 0).unwrap()
///     }
/// }
///
/// let time = FixedTime;
/// assert_eq!(time.now().timestamp(), 1_709_596_800);
/// ```
pub trait TimeSource {
    /// Returns the current instant in UTC.
    fn now(&self) -> DateTime<Utc>;
}

/// A [`TimeSource`] backed by the system wall clock.
#[derive(Default, Clone, Debug)]
pub struct SystemClock;

impl TimeSource for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
