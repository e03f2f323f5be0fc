//! Loose date parsing for feed metadata.
//!
//! Feed dates arrive in whatever shape the publisher typed: a bare year,
//! `2010-08`, `17/07/2009`, `December 2009`, full ISO timestamps. A
//! [`FlexiDate`] maps each of these to the earliest instant it can denote,
//! so that two dates of different precision can still be ordered.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// How much of the date the source string actually specified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Precision {
    Year,
    Month,
    Day,
    Minute,
    Second,
}

/// A parsed, comparable point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FlexiDate {
    instant: NaiveDateTime,
    precision: Precision,
}

const DATETIME_FORMATS: &[(&str, Precision)] = &[
    ("%Y-%m-%dT%H:%M:%S%.f", Precision::Second),
    ("%Y-%m-%dT%H:%M:%S", Precision::Second),
    ("%Y-%m-%dT%H:%M", Precision::Minute),
    ("%Y-%m-%d %H:%M:%S", Precision::Second),
    ("%Y-%m-%d %H:%M", Precision::Minute),
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%d %B %Y"];

impl FlexiDate {
    /// Parses a loosely formatted date. Returns `None` for blank or
    /// unrecognised input.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let s = raw.trim();
        if s.is_empty() {
            return None;
        }
        let s = s.strip_suffix('Z').unwrap_or(s);

        for (fmt, precision) in DATETIME_FORMATS {
            if let Ok(instant) = NaiveDateTime::parse_from_str(s, fmt) {
                return Some(Self { instant, precision: *precision });
            }
        }
        for fmt in DATE_FORMATS {
            if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
                return Some(Self::at_midnight(date, Precision::Day));
            }
        }
        Self::parse_month(s).or_else(|| Self::parse_year(s))
    }

    /// `YYYY-MM`, `MM/YYYY` or `Month YYYY`.
    fn parse_month(s: &str) -> Option<Self> {
        let (year, month) = if let Some((y, m)) = s.split_once('-') {
            (y, m)
        } else if let Some((m, y)) = s.split_once('/') {
            (y, m)
        } else {
            let date = NaiveDate::parse_from_str(&format!("1 {s}"), "%d %B %Y").ok()?;
            return Some(Self::at_midnight(date, Precision::Month));
        };
        if year.len() != 4 || !is_digits(year) || month.is_empty() || month.len() > 2 || !is_digits(month) {
            return None;
        }
        let date = NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, 1)?;
        Some(Self::at_midnight(date, Precision::Month))
    }

    fn parse_year(s: &str) -> Option<Self> {
        if s.len() != 4 || !is_digits(s) {
            return None;
        }
        let date = NaiveDate::from_ymd_opt(s.parse().ok()?, 1, 1)?;
        Some(Self::at_midnight(date, Precision::Year))
    }

    fn at_midnight(date: NaiveDate, precision: Precision) -> Self {
        Self {
            instant: date.and_time(NaiveTime::MIN),
            precision,
        }
    }

    /// The earliest instant the parsed string denotes.
    #[must_use]
    pub fn as_datetime(&self) -> NaiveDateTime {
        self.instant
    }

    #[must_use]
    pub fn precision(&self) -> Precision {
        self.precision
    }
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}
