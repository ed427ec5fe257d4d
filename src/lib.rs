//! Count the days since an anniversary and project its upcoming milestones.
//!
//! The core is two pure computations over a reference instant and "now":
//! [`Elapsed::between`] breaks the time since the anniversary into days,
//! hours, minutes and seconds, and [`milestone::project`] places each
//! milestone (100 days, 1 year, ...) on the calendar with the days left until
//! it. Both work in any [`chrono::TimeZone`] and count calendar days, so a day
//! spanning a daylight-saving transition still counts as one.
//!
//! # Examples
//!
//! ```
//! use anniversary::{Elapsed, milestone};
//! use chrono::TimeZone;
//! use chrono_tz::Asia::Tokyo;
//!
//! let reference = Tokyo.with_ymd_and_hms(2025, 5, 12, 0, 0, 0).unwrap();
//! let now = Tokyo.with_ymd_and_hms(2025, 5, 12, 0, 0, 5).unwrap();
//!
//! let elapsed = Elapsed::between(&reference, &now);
//! assert_eq!((0, 0, 0, 5), (elapsed.days, elapsed.hours, elapsed.minutes, elapsed.seconds));
//! assert_eq!(1, elapsed.display_day()); // the anniversary itself is day 1
//!
//! let statuses = milestone::project(&reference, &now, milestone::DEFAULT_MILESTONES);
//! assert_eq!("2025-08-20", statuses[0].target_date().iso_gregorian());
//! assert_eq!(100, statuses[0].days_remaining);
//! ```
//!
//! Rendering a whole board, as the `anniversary` binary does every second:
//!
//! ```
//! use anniversary::{Board, Date, fmt};
//! use chrono::{TimeZone, Utc};
//! use chrono_tz::Asia::Tokyo;
//!
//! let date = Date::from_gregorian(2025, 5, 12).unwrap();
//! let board = Board::from_date(&Tokyo, date, vec![100]).unwrap();
//! let snapshot = board.snapshot(&Utc.with_ymd_and_hms(2025, 8, 14, 15, 0, 0).unwrap());
//!
//! assert_eq!("2025年8月20日（水）", fmt::date(snapshot.milestones[0].target_date()));
//! assert_eq!("あと 5 日", fmt::remaining(&snapshot.milestones[0]));
//! ```

pub mod board;
pub mod config;
pub mod date;
pub mod elapsed;
pub mod fmt;
pub mod logging;
pub mod milestone;
pub mod store;
pub mod tick;
pub mod zone;

pub use board::{Board, Snapshot};
pub use config::Config;
pub use date::{Date, YearType};
pub use elapsed::Elapsed;
pub use milestone::{DEFAULT_MILESTONES, MilestoneStatus};
