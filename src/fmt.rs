//! 表示用の文字列整形
//!
//! Note: 表示文言がすべて日本語のため、本モジュールのドキュメントも日本語で書く。

use chrono::TimeZone;

use crate::date::Date;
use crate::elapsed::Elapsed;
use crate::milestone::MilestoneStatus;

/// 曜日名。第 0 項が日曜、第 6 項が土曜。
pub const WEEKDAYS: &[&str] = &["日", "月", "火", "水", "木", "金", "土"];

/// 曜日の一文字表記。
///
/// # 用例
///
/// ```
/// use anniversary::{Date, fmt};
///
/// assert_eq!("月", fmt::weekday(Date::from_gregorian(2025, 5, 12).unwrap()));
/// ```
pub fn weekday(date: Date) -> &'static str {
    WEEKDAYS[(date.day_of_week() % 7) as usize]
}

/// 「2025年8月20日（水）」形式の日付。月日はゼロ埋めしない。
///
/// # 用例
///
/// ```
/// use anniversary::{Date, fmt};
///
/// let date = Date::from_gregorian(2025, 8, 20).unwrap();
/// assert_eq!("2025年8月20日（水）", fmt::date(date));
/// ```
pub fn date(date: Date) -> String {
    let (y, m, d) = date.gregorian();
    format!("{y}年{m}月{d}日（{}）", weekday(date))
}

/// 経過時間の見出し。記念日当日を「1日目」と数えるため、日数は
/// [`Elapsed::display_day`] を使う。
///
/// # 用例
///
/// ```
/// use anniversary::{Elapsed, fmt};
///
/// let elapsed = Elapsed { days: 0, hours: 0, minutes: 0, seconds: 5 };
/// assert_eq!("記念日から\n 1日 00時間 00分 05秒", fmt::elapsed(&elapsed));
/// ```
pub fn elapsed(elapsed: &Elapsed) -> String {
    format!(
        "記念日から\n {}日 {:02}時間 {:02}分 {:02}秒",
        elapsed.display_day(),
        elapsed.hours,
        elapsed.minutes,
        elapsed.seconds
    )
}

/// 節目の名前、例えば「100日記念」。
pub fn milestone_title(offset_days: u32) -> String {
    format!("{offset_days}日記念")
}

/// 残り日数の表示。当日を含め、到達済みなら「達成済 🎉」。
///
/// # 用例
///
/// ```
/// use anniversary::{fmt, milestone};
/// use chrono::TimeZone;
/// use chrono_tz::Asia::Tokyo;
///
/// let reference = Tokyo.with_ymd_and_hms(2025, 5, 12, 0, 0, 0).unwrap();
/// let now = Tokyo.with_ymd_and_hms(2025, 8, 15, 0, 0, 0).unwrap();
/// let statuses = milestone::project(&reference, &now, &[100, 30]);
///
/// assert_eq!("あと 5 日", fmt::remaining(&statuses[0]));
/// assert_eq!("達成済 🎉", fmt::remaining(&statuses[1]));
/// ```
pub fn remaining<Z: TimeZone>(status: &MilestoneStatus<Z>) -> String {
    if status.reached() {
        "達成済 🎉".to_owned()
    } else {
        format!("あと {} 日", status.days_remaining)
    }
}

/// 節目一件分の行：名前、日付、残り日数。
pub fn milestone_line<Z: TimeZone>(status: &MilestoneStatus<Z>) -> String {
    format!(
        "{}  {}  {}",
        milestone_title(status.offset_days),
        date(status.target_date()),
        remaining(status)
    )
}
