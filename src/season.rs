use chrono::{Datelike, Duration, Local, NaiveDate};

pub const WEEKS_PER_REPORT: usize = 4;

/// One reporting window. Week 1 runs from today through the upcoming
/// Sunday; weeks 2-4 are full Monday-Sunday spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekWindow {
    pub index: usize,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl WeekWindow {
    pub fn days(&self) -> Vec<NaiveDate> {
        let mut days = Vec::new();
        let mut cursor = self.start;
        while cursor <= self.end {
            days.push(cursor);
            cursor += Duration::days(1);
        }
        days
    }

    pub fn label(&self) -> String {
        format!(
            "Week {} ({} - {})",
            self.index,
            self.start.format("%m/%d"),
            self.end.format("%m/%d")
        )
    }
}

/// Reporting date: `REPORT_DATE` (YYYY-MM-DD) when set, otherwise the
/// local clock. The explicit override replaces the stale-clock
/// year-guessing the previous generator carried.
pub fn report_today() -> NaiveDate {
    std::env::var("REPORT_DATE")
        .ok()
        .and_then(|raw| NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok())
        .unwrap_or_else(|| Local::now().date_naive())
}

/// NBA season label: October onward belongs to the season starting that
/// year ("2025-26"), anything earlier to the season ending that year.
pub fn season_label(today: NaiveDate) -> String {
    let year = today.year();
    if today.month() >= 10 {
        format!("{}-{:02}", year, (year + 1) % 100)
    } else {
        format!("{}-{:02}", year - 1, year % 100)
    }
}

pub fn resolve_season(today: NaiveDate) -> String {
    std::env::var("REPORT_SEASON")
        .ok()
        .map(|raw| raw.trim().to_string())
        .filter(|raw| !raw.is_empty())
        .unwrap_or_else(|| season_label(today))
}

/// The four contiguous report windows starting today. When today is a
/// Sunday, week 1 is that single day.
pub fn week_windows(today: NaiveDate) -> Vec<WeekWindow> {
    let days_until_sunday = 6 - i64::from(today.weekday().num_days_from_monday());
    let mut start = today;
    let mut end = today + Duration::days(days_until_sunday);
    let mut windows = Vec::with_capacity(WEEKS_PER_REPORT);
    for index in 1..=WEEKS_PER_REPORT {
        windows.push(WeekWindow { index, start, end });
        start = end + Duration::days(1);
        end = start + Duration::days(6);
    }
    windows
}
