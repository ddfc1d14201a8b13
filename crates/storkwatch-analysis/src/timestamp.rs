//! Timestamp parsing for telemetry tables
//!
//! Observation logs and interval tables store dates and times in separate
//! cells. Observation logs write ambiguous dates month-first while the
//! interval tables were entered day-first, so the caller chooses the
//! interpretation with [`DateOrder`]. ISO dates (`YYYY-MM-DD`) are
//! unambiguous and accepted under either order. Two-digit years are read
//! as 1969-2068.

use chrono::{Datelike as _, NaiveDate, NaiveDateTime, NaiveTime};

/// How to read a three-part date such as `03/04/2015`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum DateOrder {
    /// `MM/DD/YYYY`
    #[default]
    MonthFirst,
    /// `DD/MM/YYYY`
    DayFirst,
}

impl DateOrder {
    fn formats(self) -> &'static [&'static str] {
        match self {
            DateOrder::MonthFirst => MONTH_FIRST_FORMATS,
            DateOrder::DayFirst => DAY_FIRST_FORMATS,
        }
    }
}

const MONTH_FIRST_FORMATS: &[&str] = &[
    "%m/%d/%Y", "%m.%d.%Y", "%m-%d-%Y", "%m/%d/%y", "%m.%d.%y", "%m-%d-%y",
];
const DAY_FIRST_FORMATS: &[&str] = &[
    "%d/%m/%Y", "%d.%m.%Y", "%d-%m-%Y", "%d/%m/%y", "%d.%m.%y", "%d-%m-%y",
];
const ISO_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];
const TIME_FORMATS: &[&str] = &["%H:%M:%S", "%H:%M:%S%.f", "%H:%M"];

/// `%Y` accepts any digit count, so a short year would otherwise land in
/// the first millennium instead of falling through to `%y`.
const MIN_FOUR_DIGIT_YEAR: i32 = 1000;

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum TimestampError {
    #[display("unrecognized date '{text}'")]
    InvalidDate { text: String },
    #[display("unrecognized time '{text}'")]
    InvalidTime { text: String },
}

/// Parses a date cell under the given [`DateOrder`].
pub fn parse_date(text: &str, order: DateOrder) -> Result<NaiveDate, TimestampError> {
    let trimmed = text.trim();
    ISO_DATE_FORMATS
        .iter()
        .chain(order.formats())
        .filter_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
        .find(|date| date.year() >= MIN_FOUR_DIGIT_YEAR)
        .ok_or_else(|| TimestampError::InvalidDate {
            text: text.to_owned(),
        })
}

/// Parses a time-of-day cell; an empty cell means midnight.
pub fn parse_time(text: &str) -> Result<NaiveTime, TimestampError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(NaiveTime::MIN);
    }
    TIME_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(trimmed, format).ok())
        .ok_or_else(|| TimestampError::InvalidTime {
            text: text.to_owned(),
        })
}

/// Combines a date cell and a time cell into one timestamp.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use storkwatch_analysis::timestamp::{DateOrder, parse_timestamp};
///
/// let ts = parse_timestamp("03/04/2015", "14:30", DateOrder::DayFirst).unwrap();
/// assert_eq!(ts, NaiveDate::from_ymd_opt(2015, 4, 3).unwrap().and_hms_opt(14, 30, 0).unwrap());
///
/// let ts = parse_timestamp("03/04/2015", "14:30", DateOrder::MonthFirst).unwrap();
/// assert_eq!(ts.date(), NaiveDate::from_ymd_opt(2015, 3, 4).unwrap());
/// ```
pub fn parse_timestamp(
    date: &str,
    time: &str,
    order: DateOrder,
) -> Result<NaiveDateTime, TimestampError> {
    Ok(parse_date(date, order)?.and_time(parse_time(time)?))
}
