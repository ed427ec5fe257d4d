//! Time elapsed since the anniversary.

use chrono::{DateTime, TimeZone};

use crate::zone;

const SECS_PER_DAY: i64 = 86400;

/// Elapsed time broken into calendar days and the remaining hours, minutes
/// and seconds.
///
/// `days` is the raw, zero-based count. On screen the anniversary itself is
/// "day 1", see [`Elapsed::display_day`].
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct Elapsed {
    pub days: i64,
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
}

impl Elapsed {
    pub const ZERO: Elapsed = Elapsed {
        days: 0,
        hours: 0,
        minutes: 0,
        seconds: 0,
    };

    /// Computes the time elapsed from `reference` to `now`.
    ///
    /// Components that cannot be computed fall back to zero instead of
    /// failing:
    ///
    /// - if `now` is not after `reference` (clock skew, or an anniversary set
    ///   in the future), everything is zero;
    /// - if the instant `days` calendar days after `reference` cannot be
    ///   represented, the sub-day components are zero;
    /// - the sub-day remainder is clamped to `[0s, 24h)`, which only matters
    ///   in the last hour of a 25-hour day.
    ///
    /// # Example
    ///
    /// ```
    /// use anniversary::Elapsed;
    /// use chrono::TimeZone;
    /// use chrono_tz::Asia::Tokyo;
    ///
    /// let reference = Tokyo.with_ymd_and_hms(2025, 5, 12, 0, 0, 0).unwrap();
    /// let now = Tokyo.with_ymd_and_hms(2025, 5, 13, 1, 2, 3).unwrap();
    /// let elapsed = Elapsed::between(&reference, &now);
    ///
    /// assert_eq!((1, 1, 2, 3), (elapsed.days, elapsed.hours, elapsed.minutes, elapsed.seconds));
    /// assert_eq!(2, elapsed.display_day());
    /// ```
    pub fn between<Z: TimeZone>(reference: &DateTime<Z>, now: &DateTime<Z>) -> Self {
        if now <= reference {
            return Self::ZERO;
        }
        let days = zone::whole_days_between(reference, now);
        let Some(anchor) = zone::add_days(reference, days) else {
            return Self {
                days,
                ..Self::ZERO
            };
        };
        let rest = now
            .clone()
            .signed_duration_since(anchor)
            .num_seconds()
            .clamp(0, SECS_PER_DAY - 1);
        Self {
            days,
            hours: (rest / 3600) as u32,
            minutes: (rest / 60 % 60) as u32,
            seconds: (rest % 60) as u32,
        }
    }

    /// Day number shown to the user, counting the anniversary as day 1.
    pub fn display_day(&self) -> i64 {
        self.days + 1
    }
}
