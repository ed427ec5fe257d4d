//! The once-a-second timer driving the board.

use std::cell::Cell;
use std::ops::ControlFlow;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use tracing::trace;

use crate::board::{Board, Snapshot};

/// Refresh period of the board.
pub const PERIOD: Duration = Duration::from_secs(1);

/// Source of "now", and of the pause between ticks.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;

    fn wait(&self, period: Duration) {
        std::thread::sleep(period);
    }
}

/// The system wall clock.
#[derive(Debug, Default, Copy, Clone)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when waited on, for tests and replays.
#[derive(Debug)]
pub struct ManualClock {
    now: Cell<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Cell::new(start),
        }
    }

    pub fn advance(&self, by: TimeDelta) {
        let now = self.now.get();
        self.now
            .set(now.checked_add_signed(by).unwrap_or(DateTime::<Utc>::MAX_UTC));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.get()
    }

    fn wait(&self, period: Duration) {
        self.advance(TimeDelta::from_std(period).unwrap_or(TimeDelta::MAX));
    }
}

/// Runs the tick loop until `on_tick` breaks.
///
/// Each tick reads the clock, recomputes a full [`Snapshot`] and hands it to
/// `on_tick` together with the board, which may replace the anniversary
/// before the next tick. Ticks never overlap: the wait starts only after
/// `on_tick` returns.
///
/// # Example
///
/// ```
/// use std::ops::ControlFlow;
/// use anniversary::tick::{self, ManualClock};
/// use anniversary::Board;
/// use chrono::{TimeZone, Utc};
/// use chrono_tz::Asia::Tokyo;
///
/// let mut board = Board::new(Tokyo.with_ymd_and_hms(2025, 5, 12, 0, 0, 0).unwrap(), vec![100]);
/// let clock = ManualClock::new(Utc.with_ymd_and_hms(2025, 5, 11, 15, 0, 0).unwrap());
/// let mut seconds = Vec::new();
///
/// tick::run(&mut board, &clock, tick::PERIOD, |_, snapshot| {
///     seconds.push(snapshot.elapsed.seconds);
///     if seconds.len() == 3 { ControlFlow::Break(()) } else { ControlFlow::Continue(()) }
/// });
/// assert_eq!(vec![0, 1, 2], seconds);
/// ```
pub fn run<Z, C, F>(board: &mut Board<Z>, clock: &C, period: Duration, mut on_tick: F)
where
    Z: TimeZone,
    C: Clock + ?Sized,
    F: FnMut(&mut Board<Z>, &Snapshot<Z>) -> ControlFlow<()>,
{
    let mut ticks: u64 = 0;
    loop {
        let now = clock.now();
        let snapshot = board.snapshot(&now);
        ticks += 1;
        trace!(ticks, now = %now, "tick");
        if on_tick(&mut *board, &snapshot).is_break() {
            return;
        }
        clock.wait(period);
    }
}
