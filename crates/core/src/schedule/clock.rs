//! The clock/timezone adapter: the only place civil dates and absolute
//! instants are converted.
//!
//! The business operates in one fixed timezone, and every "what day is it" or
//! "has this slot passed" question is answered relative to that zone. All
//! conversions go through `chrono-tz`; there is deliberately no manual offset
//! arithmetic anywhere in this crate, since mixing the two is how a day's
//! appointments end up attributed to the adjacent day.
//!
//! "Now" is injected through the [`BusinessClock`] trait so the availability
//! rules can be tested against a pinned instant.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

/// The single fixed business timezone.
pub const BUSINESS_TZ: Tz = chrono_tz::America::Chicago;

/// Source of "now". Implementations must re-read the clock on every call;
/// nothing in the engine caches the result across requests.
pub trait BusinessClock: Send + Sync {
    fn now_utc(&self) -> DateTime<Utc>;

    /// Current instant expressed in the business timezone.
    fn now_local(&self) -> DateTime<Tz> {
        self.now_utc().with_timezone(&BUSINESS_TZ)
    }

    /// Current business-local calendar date.
    fn today(&self) -> NaiveDate {
        self.now_local().date_naive()
    }

    fn is_today(&self, date: NaiveDate) -> bool {
        date == self.today()
    }
}

/// Production clock backed by the OS clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl BusinessClock for SystemClock {
    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to a single instant, for deterministic tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    now: DateTime<Utc>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self { now }
    }

    /// Pins the clock to a wall-clock time in the business timezone, which is
    /// how test scenarios are naturally written ("it is 14:05 on the 12th").
    pub fn at_local(date: NaiveDate, hour: u32, minute: u32) -> Self {
        let time = NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN);
        Self {
            now: first_valid_instant(date.and_time(time)),
        }
    }
}

impl BusinessClock for FixedClock {
    fn now_utc(&self) -> DateTime<Utc> {
        self.now
    }
}

/// Half-open UTC interval `[start of day, start of next day)` covering the
/// civil date in the business timezone. This is the one conversion used for
/// every query-by-date against the store.
pub fn day_bounds(date: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let next = date.succ_opt().unwrap_or(NaiveDate::MAX);
    (
        first_valid_instant(date.and_time(NaiveTime::MIN)),
        first_valid_instant(next.and_time(NaiveTime::MIN)),
    )
}

/// Business-local calendar date of an absolute instant.
pub fn local_date(instant: DateTime<Utc>) -> NaiveDate {
    instant.with_timezone(&BUSINESS_TZ).date_naive()
}

/// Resolves a business-local wall-clock time to a UTC instant. A time that
/// falls in a DST gap resolves to the first valid instant after it; an
/// ambiguous time resolves to its earlier occurrence.
fn first_valid_instant(mut local: NaiveDateTime) -> DateTime<Utc> {
    for _ in 0..48 {
        if let Some(resolved) = BUSINESS_TZ.from_local_datetime(&local).earliest() {
            return resolved.with_timezone(&Utc);
        }
        local += Duration::minutes(30);
    }
    // Unreachable for real IANA data; fall back to treating the wall-clock
    // time as UTC rather than panicking.
    Utc.from_utc_datetime(&local)
}
