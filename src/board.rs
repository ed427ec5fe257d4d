//! The countdown board: the anniversary, its milestones, and what they look
//! like at a given instant.

use chrono::{DateTime, TimeZone, Utc};
use tracing::{debug, info};

use crate::date::Date;
use crate::elapsed::Elapsed;
use crate::fmt;
use crate::milestone::{self, MilestoneStatus};
use crate::zone;

/// Holds the reference instant and the ordered milestone offsets.
///
/// Everything shown is recomputed from these two by [`Board::snapshot`]; the
/// board keeps no other state.
#[derive(Debug, Clone)]
pub struct Board<Z: TimeZone> {
    reference: DateTime<Z>,
    milestones: Vec<u32>,
}

/// Everything on screen for one tick.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot<Z: TimeZone> {
    pub now: DateTime<Z>,
    pub elapsed: Elapsed,
    pub milestones: Vec<MilestoneStatus<Z>>,
}

impl<Z: TimeZone> Board<Z> {
    pub fn new(reference: DateTime<Z>, milestones: Vec<u32>) -> Self {
        Self {
            reference,
            milestones,
        }
    }

    /// Creates a board for an anniversary that starts at local midnight of
    /// `date` in `tz`.
    ///
    /// Returns `None` if `date` is outside the range chrono supports.
    ///
    /// # Example
    ///
    /// ```
    /// use anniversary::{Board, Date, DEFAULT_MILESTONES};
    /// use chrono::{TimeZone, Utc};
    /// use chrono_tz::Asia::Tokyo;
    ///
    /// let date = Date::from_gregorian(2025, 5, 12).unwrap();
    /// let board = Board::from_date(&Tokyo, date, DEFAULT_MILESTONES.to_vec()).unwrap();
    /// let now = Utc.with_ymd_and_hms(2025, 5, 11, 15, 0, 5).unwrap();
    ///
    /// assert_eq!(
    ///     "記念日から\n 1日 00時間 00分 05秒",
    ///     board.snapshot(&now).render().lines().take(2).collect::<Vec<_>>().join("\n"),
    /// );
    /// ```
    pub fn from_date(tz: &Z, date: Date, milestones: Vec<u32>) -> Option<Self> {
        Some(Self::new(zone::start_of_day(tz, date)?, milestones))
    }

    pub fn reference(&self) -> &DateTime<Z> {
        &self.reference
    }

    pub fn milestones(&self) -> &[u32] {
        &self.milestones
    }

    /// Replaces the anniversary. The next snapshot reflects it entirely.
    pub fn set_reference(&mut self, reference: DateTime<Z>) {
        if reference != self.reference {
            info!(
                from = %zone::date_of(&self.reference),
                to = %zone::date_of(&reference),
                "anniversary changed"
            );
        }
        self.reference = reference;
    }

    /// Computes the board as seen at `now`, in the anniversary's time zone.
    pub fn snapshot(&self, now: &DateTime<Utc>) -> Snapshot<Z> {
        let now = now.with_timezone(&self.reference.timezone());
        let elapsed = Elapsed::between(&self.reference, &now);
        let milestones = milestone::project(&self.reference, &now, &self.milestones);
        debug!(
            days = elapsed.days,
            reached = milestones.iter().filter(|m| m.reached()).count(),
            "recomputed board"
        );
        Snapshot {
            now,
            elapsed,
            milestones,
        }
    }
}

impl<Z: TimeZone> Snapshot<Z> {
    /// Renders the screen as text: the elapsed banner, then one line per
    /// milestone.
    pub fn render(&self) -> String {
        let mut out = fmt::elapsed(&self.elapsed);
        for status in &self.milestones {
            out.push('\n');
            out += &fmt::milestone_line(status);
        }
        out
    }
}
