use chrono::{Local, NaiveDateTime};

/// Wall-clock source for the time and date directives.
///
/// Time directives read the clock when a record is rendered, not when it was
/// built. Renderers take the clock as an explicit dependency so tests can pin
/// it with [`FixedClock`].
pub trait Clock: Send + Sync {
    /// Current local date and time.
    fn now(&self) -> NaiveDateTime;
}

/// The host's local wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    #[inline]
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock stuck at one instant.
///
/// # Examples
///
/// ```
/// # use pattern_logger::clock::{Clock, FixedClock};
/// use chrono::NaiveDate;
///
/// let at = NaiveDate::from_ymd_opt(2024, 3, 9)
///     .and_then(|d| d.and_hms_milli_opt(7, 5, 1, 23))
///     .unwrap();
/// let clock = FixedClock::new(at);
/// assert_eq!(clock.now(), at);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    at: NaiveDateTime,
}

impl FixedClock {
    pub const fn new(at: NaiveDateTime) -> Self {
        Self { at }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.at
    }
}
