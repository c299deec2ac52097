//! Reporting-date extraction from workbook filenames

use chrono::{Datelike, Days, NaiveDate};
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// A (month, day, year) reporting date taken from a filename.
///
/// The fields are not calendar-validated: the extraction rules copy digit
/// pairs out of the filename as-is, so a month of 13 or a day of 32 flows
/// unchanged into the formatted prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportDate {
    pub month: u32,
    pub day: u32,
    pub year: i32,
}

impl fmt::Display for ReportDate {
    /// Renders as zero-padded `MM-DD-YYYY`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}-{:02}-{}", self.month, self.day, self.year)
    }
}

impl From<NaiveDate> for ReportDate {
    fn from(date: NaiveDate) -> Self {
        Self {
            month: date.month(),
            day: date.day(),
            year: date.year(),
        }
    }
}

/// Source of "today" for the previous-Sunday fallback.
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// Wall-clock implementation used outside of tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}

/// Extract the reporting date from a workbook filename.
///
/// Rules, in priority order:
/// 1. First `MM.DD.YY` substring (e.g. "... WE 04.27.25.xlsx").
/// 2. First `WE` token followed by six digits with no separators. The six
///    digits split two-by-two from the left, so "WE 042025" reads as
///    month 04, day 20, year 25.
/// 3. Otherwise the most recent Sunday relative to `clock.today()`; a run
///    on a Sunday uses that same Sunday.
///
/// Two-digit years expand to 2000 + yy. Extraction never fails.
pub fn extract_report_date(filename: &str, clock: &dyn Clock) -> ReportDate {
    static DOTTED: OnceLock<Regex> = OnceLock::new();
    static WEEK_ENDING: OnceLock<Regex> = OnceLock::new();

    let dotted = DOTTED.get_or_init(|| Regex::new(r"(\d{2})\.(\d{2})\.(\d{2})").unwrap());
    if let Some(caps) = dotted.captures(filename) {
        return two_digit_triple(&caps);
    }

    let week_ending =
        WEEK_ENDING.get_or_init(|| Regex::new(r"WE\s+(\d{2})(\d{2})(\d{2})").unwrap());
    if let Some(caps) = week_ending.captures(filename) {
        return two_digit_triple(&caps);
    }

    previous_sunday(clock.today()).into()
}

fn two_digit_triple(caps: &regex::Captures<'_>) -> ReportDate {
    // Captures are always \d{2}, so the parses cannot fail
    let field = |i: usize| caps[i].parse::<u32>().unwrap();
    ReportDate {
        month: field(1),
        day: field(2),
        year: 2000 + field(3) as i32,
    }
}

fn previous_sunday(today: NaiveDate) -> NaiveDate {
    let offset = today.weekday().num_days_from_sunday();
    today - Days::new(u64::from(offset))
}
