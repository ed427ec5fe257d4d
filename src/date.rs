//! Time-zone independant calendar date.

use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Years chrono can represent; [`Date::from_gregorian`] rejects the rest.
const YEARS: std::ops::RangeInclusive<i32> = -262_144..=262_143;

/// Julian day number of 0001-01-01 (proleptic Gregorian) minus one, i.e. the
/// offset between chrono's "days from CE" and JDN.
const JDN_CE_OFFSET: i32 = 1721425;

/// A calendar day, independant of any time zone.
///
/// Stored as a Julian day number (JDN). Results are meaningful from January 1,
/// 4713 BC, proleptic Julian calendar; see [`crate::zone`] for mapping a day
/// onto instants of a time zone.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Date {
    jdn: i32,
}

impl Date {
    /// Creates a `Date` with a Julian day number (JDN).
    pub const fn from_jdn(jdn: i32) -> Self {
        Self { jdn }
    }
    /// Returns the Julian day number (JDN) of the date.
    pub fn jdn(&self) -> i32 {
        self.jdn
    }

    /// Creates a `Date` with a Gregorian calendar date.
    ///
    /// Returns `None` if `month` or `day` does not name an existing day, or
    /// if `year` is beyond what chrono supports (about ±262,000).
    ///
    /// # Example
    ///
    /// ```
    /// use anniversary::Date;
    ///
    /// let date = Date::from_gregorian(2000, 1, 1).unwrap();
    /// assert_eq!(2451545, date.jdn());
    /// assert_eq!(None, Date::from_gregorian(2025, 2, 29));
    /// ```
    pub fn from_gregorian(year: i32, month: i32, day: i32) -> Option<Self> {
        if !YEARS.contains(&year)
            || !(1..=12).contains(&month)
            || !(1..=days_in_month(year, month)).contains(&day)
        {
            return None;
        }
        let (y, m, d) = (year, month, day);
        Some(Self::from_jdn(
            (1461 * (y + 4800 + (m - 14) / 12)) / 4 + (367 * (m - 2 - 12 * ((m - 14) / 12))) / 12
                - (3 * ((y + 4900 + (m - 14) / 12) / 100)) / 4
                + d
                - 32075,
        ))
    }
    /// Represents the date in Gregorian calendar.
    ///
    /// Returns in `(year, month, day)` format.
    ///
    /// # Example
    ///
    /// ```
    /// use anniversary::Date;
    ///
    /// let date = Date::from_jdn(2451545);
    /// assert_eq!((2000, 1, 1), date.gregorian());
    /// ```
    pub fn gregorian(&self) -> (i32, i32, i32) {
        let jdn = self.jdn;
        let f = jdn + 1401 + (((4 * jdn + 274277) / 146097) * 3) / 4 - 38;
        let e = 4 * f + 3;
        let g = (e % 1461) / 4;
        let h = 5 * g + 2;
        let day = (h % 153) / 5 + 1;
        let month = (h / 153 + 2) % 12 + 1;
        let year = e / 1461 - 4716 + (12 + 2 - month) / 12;
        (year, month, day)
    }
    /// Formats the date in ISO 8601 format.
    ///
    /// # Example
    ///
    /// ```
    /// use anniversary::Date;
    ///
    /// let date = Date::from_gregorian(2025, 5, 12).unwrap();
    /// assert_eq!("2025-05-12", date.iso_gregorian());
    /// ```
    pub fn iso_gregorian(&self) -> String {
        let (y, m, d) = self.gregorian();
        format!("{:04}-{:02}-{:02}", y, m, d)
    }

    /// Returns the day of week of the date, in ISO-8601 numbering (i.e.
    /// `1..=7` for Monday through Sunday)
    ///
    /// # Example
    ///
    /// ```
    /// use anniversary::Date;
    ///
    /// let date = Date::from_gregorian(2025, 8, 20).unwrap();
    /// assert_eq!(3, date.day_of_week()); // Wednesday
    /// ```
    pub fn day_of_week(&self) -> i32 {
        self.jdn.rem_euclid(7) + 1
    }

    /// Converts into chrono's date type.
    ///
    /// Returns `None` outside the range chrono supports.
    pub fn naive(&self) -> Option<NaiveDate> {
        NaiveDate::from_num_days_from_ce_opt(self.jdn - JDN_CE_OFFSET)
    }
}

impl From<NaiveDate> for Date {
    fn from(date: NaiveDate) -> Self {
        Date::from_jdn(date.num_days_from_ce() + JDN_CE_OFFSET)
    }
}

impl Add<i32> for Date {
    type Output = Date;
    fn add(self, rhs: i32) -> Self::Output {
        Date::from_jdn(self.jdn + rhs)
    }
}
impl Sub<Date> for Date {
    type Output = i32;
    fn sub(self, rhs: Date) -> Self::Output {
        self.jdn - rhs.jdn
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.iso_gregorian())
    }
}

/// Error parsing a `YYYY-MM-DD` date.
#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
#[error("expected a YYYY-MM-DD date, got `{input}`")]
pub struct DateParseError {
    pub input: String,
    #[source]
    pub source: chrono::ParseError,
}

impl FromStr for Date {
    type Err = DateParseError;

    /// Parses an ISO 8601 calendar date, e.g. `2025-05-12`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Date::from)
            .map_err(|source| DateParseError {
                input: s.to_owned(),
                source,
            })
    }
}

impl Serialize for Date {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Date {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Indicates whether a year is a leap year or common year.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum YearType {
    Common,
    Leap,
}

impl YearType {
    /// Determines if `year` is a leap year in Gregorian calendar.
    pub fn from_gregorian(year: i32) -> Self {
        if year % 4 == 0 && year % 100 != 0 || year % 400 == 0 {
            Self::Leap
        } else {
            Self::Common
        }
    }
    /// Returns `true` if `self` is `Leap`, otherwise `false`.
    pub fn is_leap(&self) -> bool {
        matches!(self, YearType::Leap)
    }
}

fn days_in_month(year: i32, month: i32) -> i32 {
    match month {
        2 => 28 + YearType::from_gregorian(year).is_leap() as i32,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_works() {
        let date = Date::from_jdn(2440588);
        assert_eq!(2440588, date.jdn());
    }

    #[test]
    fn from_gregorian() {
        let date = Date::from_gregorian(1970, 1, 1).unwrap();
        assert_eq!(2440588, date.jdn());
        let date = Date::from_gregorian(2025, 5, 12).unwrap();
        assert_eq!(2460808, date.jdn());
    }

    #[test]
    fn rejects_nonexistent_days() {
        for (y, m, d) in [(2025, 2, 29), (2025, 4, 31), (2025, 13, 1), (2025, 0, 1), (2025, 1, 0)] {
            assert_eq!(None, Date::from_gregorian(y, m, d), "{y:04}-{m:02}-{d:02}");
        }
        assert!(Date::from_gregorian(2024, 2, 29).is_some());
        assert!(Date::from_gregorian(2000, 2, 29).is_some());
        assert_eq!(None, Date::from_gregorian(1900, 2, 29));
    }

    #[test]
    fn rejects_huge_years() {
        for y in [2_000_000, -2_000_000, i32::MAX, i32::MIN, 262_144] {
            assert_eq!(None, Date::from_gregorian(y, 1, 1), "{y}");
        }
        let last = Date::from_gregorian(262_143, 12, 31).unwrap();
        assert_eq!((262_143, 12, 31), last.gregorian());
        assert_eq!(last.naive(), NaiveDate::from_ymd_opt(262_143, 12, 31));
    }

    #[test]
    fn to_gregorian() {
        let date = Date::from_jdn(2440588);
        assert_eq!((1970, 1, 1), date.gregorian());
        let date = Date::from_jdn(2460808);
        assert_eq!((2025, 5, 12), date.gregorian());
        let date = Date::from_jdn(2451545);
        assert_eq!((2000, 1, 1), date.gregorian());
    }

    #[test]
    fn to_day_of_week() {
        let date = Date::from_gregorian(1970, 1, 1).unwrap();
        assert_eq!(4, date.day_of_week());
        let date = Date::from_gregorian(2025, 5, 12).unwrap();
        assert_eq!(1, date.day_of_week());
        let date = Date::from_gregorian(2025, 5, 18).unwrap();
        assert_eq!(7, date.day_of_week());
    }

    #[test]
    fn day_arithmetic() {
        let date = Date::from_gregorian(2025, 5, 12).unwrap();
        assert_eq!("2025-08-20", (date + 100).iso_gregorian());
        assert_eq!("2028-05-11", (date + 1095).iso_gregorian());
        assert_eq!(-100, date - (date + 100));
    }

    #[test]
    fn chrono_conversion() {
        let naive = NaiveDate::from_ymd_opt(2025, 5, 12).unwrap();
        let date = Date::from(naive);
        assert_eq!(Date::from_gregorian(2025, 5, 12), Some(date));
        assert_eq!(Some(naive), date.naive());
    }

    #[test]
    fn parse() {
        assert_eq!(Date::from_gregorian(2025, 5, 12), "2025-05-12".parse().ok());
        assert_eq!(Date::from_gregorian(2025, 5, 12), " 2025-5-12\n".parse().ok());
        for s in [
            "",
            "2025",
            "2025-05",
            "2025-05-12-01",
            "2025/05/12",
            "x-1-1",
            "2025-02-30",
            "2025-13-01",
            "2000000-01-01",
            "-2000000-01-01",
            "99999999999-01-01",
        ] {
            let err = s.parse::<Date>().unwrap_err();
            assert_eq!(s, err.input, "{s:?}");
        }
    }

    #[test]
    fn iso_format() {
        assert_eq!(
            "2021-09-08",
            Date::from_gregorian(2021, 9, 8).unwrap().iso_gregorian()
        );
    }
}

#[cfg(test)]
mod tests_priv {
    use super::*;

    #[test]
    fn priv_days_in_month() {
        assert_eq!(28, days_in_month(2025, 2));
        assert_eq!(29, days_in_month(2024, 2));
        assert_eq!(30, days_in_month(2025, 9));
        assert_eq!(31, days_in_month(2025, 12));
    }
}
