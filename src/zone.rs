//! Calendar arithmetic on instants of a civil time zone.
//!
//! A calendar day here is the step from a wall-clock time to the same wall
//! time on the next local date, so across a daylight-saving transition it
//! lasts 23 or 25 hours. All functions are generic over [`chrono::TimeZone`];
//! the binary uses [`chrono_tz::Tz`], tests mostly use `America/New_York` for
//! its DST transitions.

use chrono::{DateTime, LocalResult, NaiveDateTime, NaiveTime, Offset, TimeDelta, TimeZone};

use crate::date::Date;

/// Resolves a local wall-clock time in `tz` to an instant.
///
/// In a fold (wall time occurring twice) the earlier instant wins. In a gap
/// (wall time skipped) the time is shifted forward by the length of the gap,
/// i.e. interpreted with the offset in effect before the transition.
///
/// Returns `None` only outside the range chrono supports.
///
/// # Example
///
/// ```
/// use anniversary::zone;
/// use chrono::NaiveDate;
/// use chrono_tz::America::New_York;
///
/// // 2:30 does not exist on 2025-03-09 in New York.
/// let local = NaiveDate::from_ymd_opt(2025, 3, 9).unwrap().and_hms_opt(2, 30, 0).unwrap();
/// let instant = zone::resolve_local(&New_York, local).unwrap();
/// assert_eq!("2025-03-09T03:30:00-04:00", instant.to_rfc3339());
/// ```
pub fn resolve_local<Z: TimeZone>(tz: &Z, local: NaiveDateTime) -> Option<DateTime<Z>> {
    if let Some(instant) = tz.from_local_datetime(&local).earliest() {
        return Some(instant);
    }
    let before = tz
        .offset_from_utc_datetime(&local.checked_sub_signed(TimeDelta::days(1))?)
        .fix();
    let utc = local.checked_sub_signed(TimeDelta::seconds(before.local_minus_utc().into()))?;
    Some(tz.from_utc_datetime(&utc))
}

/// Like [`resolve_local`], but in a fold picks the occurrence with the same
/// UTC offset as `hint` when there is one.
fn resolve_local_near<Z: TimeZone>(
    tz: &Z,
    local: NaiveDateTime,
    hint: &Z::Offset,
) -> Option<DateTime<Z>> {
    match tz.from_local_datetime(&local) {
        LocalResult::Ambiguous(earliest, latest) => {
            if latest.offset().fix() == hint.fix() {
                Some(latest)
            } else {
                Some(earliest)
            }
        }
        _ => resolve_local(tz, local),
    }
}

/// Returns the instant `date` begins at in `tz`, normally local midnight.
pub fn start_of_day<Z: TimeZone>(tz: &Z, date: Date) -> Option<DateTime<Z>> {
    resolve_local(tz, date.naive()?.and_time(NaiveTime::MIN))
}

/// Returns the local calendar day of `instant`.
pub fn date_of<Z: TimeZone>(instant: &DateTime<Z>) -> Date {
    instant.date_naive().into()
}

/// Adds `days` calendar days to `instant`, keeping its wall-clock time.
///
/// This is not a multiple of 24 hours: across a DST transition the result is
/// an hour closer or further. A result in a fold keeps the UTC offset of
/// `instant` if it can, so adding 0 days is the identity even for the second
/// 01:30 of a fall-back night. Returns `None` outside the range chrono
/// supports.
///
/// # Example
///
/// ```
/// use anniversary::zone;
/// use chrono::TimeZone;
/// use chrono_tz::America::New_York;
///
/// let before = New_York.with_ymd_and_hms(2025, 3, 8, 12, 0, 0).unwrap();
/// let after = zone::add_days(&before, 1).unwrap();
/// assert_eq!("2025-03-09T12:00:00-04:00", after.to_rfc3339());
/// assert_eq!(23, (after - before).num_hours());
/// ```
pub fn add_days<Z: TimeZone>(instant: &DateTime<Z>, days: i64) -> Option<DateTime<Z>> {
    let local = instant
        .naive_local()
        .checked_add_signed(TimeDelta::try_days(days)?)?;
    resolve_local_near(&instant.timezone(), local, instant.offset())
}

/// Counts the whole calendar days from `from` to `to`.
///
/// The count is negative when `to` is earlier, and truncated toward zero: 23
/// hours after noon on one day is still 0 days, but noon the next day is 1 day
/// even if only 23 hours passed.
///
/// # Example
///
/// ```
/// use anniversary::zone;
/// use chrono::TimeZone;
/// use chrono_tz::Asia::Tokyo;
///
/// let a = Tokyo.with_ymd_and_hms(2025, 8, 15, 0, 0, 0).unwrap();
/// let b = Tokyo.with_ymd_and_hms(2025, 8, 20, 0, 0, 0).unwrap();
/// assert_eq!(5, zone::whole_days_between(&a, &b));
/// assert_eq!(-5, zone::whole_days_between(&b, &a));
/// ```
pub fn whole_days_between<Z: TimeZone>(from: &DateTime<Z>, to: &DateTime<Z>) -> i64 {
    if to < from {
        return -whole_days_between(to, from);
    }
    let mut days = (to.date_naive() - from.date_naive()).num_days();
    while days > 0 && add_days(from, days).is_none_or(|candidate| candidate > *to) {
        days -= 1;
    }
    days
}
