//! Milestones: fixed day offsets from the anniversary.

use chrono::{DateTime, TimeZone};

use crate::date::Date;
use crate::zone;

/// Default milestones, in days after the anniversary: 100, 200 and 300 days,
/// then one, two and three years.
pub const DEFAULT_MILESTONES: &[u32] = &[100, 200, 300, 365, 730, 1095];

/// Where a milestone stands relative to "now".
#[derive(Debug, Clone, PartialEq)]
pub struct MilestoneStatus<Z: TimeZone> {
    /// Offset from the anniversary, in calendar days.
    pub offset_days: u32,
    /// The instant the milestone falls on: the anniversary plus
    /// `offset_days` calendar days, at the same wall-clock time.
    pub target: DateTime<Z>,
    /// Calendar days from today until the day of `target`, both taken in the
    /// anniversary's time zone. Zero on the day itself, negative after it.
    pub days_remaining: i64,
}

impl<Z: TimeZone> MilestoneStatus<Z> {
    /// Calendar day of the milestone in its time zone.
    pub fn target_date(&self) -> Date {
        zone::date_of(&self.target)
    }
    /// A milestone falling today counts as reached, not as "0 days left".
    pub fn reached(&self) -> bool {
        self.days_remaining <= 0
    }
}

/// Projects each milestone in `offsets` from `reference`, as seen at `now`.
///
/// The output keeps the order of `offsets`. A target too far out for chrono
/// to represent falls back to `reference` with zero days remaining.
///
/// # Example
///
/// ```
/// use anniversary::milestone;
/// use chrono::TimeZone;
/// use chrono_tz::Asia::Tokyo;
///
/// let reference = Tokyo.with_ymd_and_hms(2025, 5, 12, 0, 0, 0).unwrap();
/// let now = Tokyo.with_ymd_and_hms(2025, 8, 15, 0, 0, 0).unwrap();
/// let statuses = milestone::project(&reference, &now, &[100]);
///
/// assert_eq!("2025-08-20", statuses[0].target_date().iso_gregorian());
/// assert_eq!(5, statuses[0].days_remaining);
/// assert!(!statuses[0].reached());
/// ```
pub fn project<Z: TimeZone>(
    reference: &DateTime<Z>,
    now: &DateTime<Z>,
    offsets: &[u32],
) -> Vec<MilestoneStatus<Z>> {
    offsets
        .iter()
        .map(|&offset_days| match zone::add_days(reference, offset_days.into()) {
            Some(target) => MilestoneStatus {
                offset_days,
                days_remaining: (zone::date_of(&target) - zone::date_of(now)).into(),
                target,
            },
            None => MilestoneStatus {
                offset_days,
                target: reference.clone(),
                days_remaining: 0,
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use chrono_tz::America::New_York;
    use chrono_tz::Asia::Tokyo;

    #[test]
    fn hundred_days() {
        let reference = Tokyo.with_ymd_and_hms(2025, 5, 12, 0, 0, 0).unwrap();
        for ((m, d), remaining) in [((8, 15), 5), ((8, 19), 1), ((8, 20), 0), ((8, 21), -1)] {
            let now = Tokyo.with_ymd_and_hms(2025, m, d, 0, 0, 0).unwrap();
            let status = &project(&reference, &now, &[100])[0];
            assert_eq!(Date::from_gregorian(2025, 8, 20), Some(status.target_date()));
            assert_eq!(remaining, status.days_remaining, "2025-{m:02}-{d:02}");
            assert_eq!(remaining <= 0, status.reached(), "2025-{m:02}-{d:02}");
        }
    }

    #[test]
    fn due_today_is_reached() {
        let reference = Tokyo.with_ymd_and_hms(2025, 5, 12, 0, 0, 0).unwrap();
        let now = Tokyo.with_ymd_and_hms(2025, 8, 20, 18, 30, 0).unwrap();
        let status = &project(&reference, &now, &[100])[0];
        assert_eq!(0, status.days_remaining);
        assert!(status.reached());
    }

    #[test]
    fn counts_dates_not_hours() {
        let reference = Tokyo.with_ymd_and_hms(2025, 5, 12, 0, 0, 0).unwrap();
        for ((d, h, min), remaining) in [
            ((15, 14, 0), 5),
            ((19, 23, 59), 1),
            ((20, 0, 0), 0),
            ((21, 0, 1), -1),
        ] {
            let now = Tokyo.with_ymd_and_hms(2025, 8, d, h, min, 0).unwrap();
            let status = &project(&reference, &now, &[100])[0];
            assert_eq!(remaining, status.days_remaining, "08-{d:02} {h:02}:{min:02}");
        }
    }

    #[test]
    fn keeps_input_order() {
        let reference = Tokyo.with_ymd_and_hms(2025, 5, 12, 0, 0, 0).unwrap();
        let now = reference;
        for offsets in [&[100, 200, 300][..], &[300, 100, 200], DEFAULT_MILESTONES] {
            let got: Vec<_> = project(&reference, &now, offsets)
                .iter()
                .map(|s| s.offset_days)
                .collect();
            assert_eq!(offsets, got);
        }
    }

    #[test]
    fn default_targets() {
        let reference = Tokyo.with_ymd_and_hms(2025, 5, 12, 0, 0, 0).unwrap();
        let now = Tokyo.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let got: Vec<_> = project(&reference, &now, DEFAULT_MILESTONES)
            .iter()
            .map(|s| (s.target_date().iso_gregorian(), s.days_remaining))
            .collect();
        let expected = [
            ("2025-08-20", -134),
            ("2025-11-28", -34),
            ("2026-03-08", 66),
            ("2026-05-12", 131),
            ("2027-05-12", 496),
            ("2028-05-11", 861),
        ]
        .map(|(date, days)| (date.to_owned(), days));
        assert_eq!(expected.to_vec(), got);
    }

    #[test]
    fn targets_are_calendar_days_across_dst() {
        let reference = New_York.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap();
        for offset in [1u32, 8, 9, 10, 100, 250, 365] {
            let status = &project(&reference, &reference, &[offset])[0];
            let expected =
                NaiveDate::from_ymd_opt(2025, 3, 1).unwrap() + chrono::Days::new(offset.into());
            assert_eq!(expected.and_hms_opt(0, 0, 0).unwrap(), status.target.naive_local());
            assert_eq!(i64::from(offset), status.days_remaining);
        }
    }

    #[test]
    fn unrepresentable_target_falls_back() {
        let reference = Tokyo.with_ymd_and_hms(262_000, 1, 1, 0, 0, 0).unwrap();
        let status = &project(&reference, &reference, &[u32::MAX])[0];
        assert_eq!(reference, status.target);
        assert_eq!(0, status.days_remaining);
        assert!(status.reached());
    }
}
