//! Calendar arithmetic for day and month navigation
//!
//! Dates travel as `YYYY-MM-DD` strings and months as `YYYY-MM` strings at the edges;
//! everything inside works on `chrono::NaiveDate`.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Duration, Local, NaiveDate};
use serde::{Serialize, Serializer};

use super::error::{DomainError, DomainResult};

fn all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Parse a strict `YYYY-MM-DD` date
pub fn parse_date(s: &str) -> DomainResult<NaiveDate> {
    let parts: Vec<&str> = s.split('-').collect();
    let shape_ok = parts.len() == 3
        && parts[0].len() == 4
        && parts[1].len() == 2
        && parts[2].len() == 2
        && parts.iter().all(|p| all_digits(p));

    if !shape_ok {
        return Err(DomainError::invalid(format!(
            "date must be YYYY-MM-DD, got '{}'",
            s
        )));
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| DomainError::invalid(format!("'{}' is not a calendar date", s)))
}

/// Format a date as `YYYY-MM-DD`
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Today's date in local time
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Whole days from `from` to `to` (negative when `to` is earlier)
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    to.signed_duration_since(from).num_days()
}

pub fn previous_day(date: NaiveDate) -> DomainResult<NaiveDate> {
    date.pred_opt()
        .ok_or_else(|| DomainError::invalid("no day before the minimum date"))
}

pub fn next_day(date: NaiveDate) -> DomainResult<NaiveDate> {
    date.succ_opt()
        .ok_or_else(|| DomainError::invalid("no day after the maximum date"))
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// A calendar month, displayed as `YYYY-MM`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    /// Create a month; years are limited to four digits
    pub fn new(year: i32, month: u32) -> DomainResult<Self> {
        if !(1..=9999).contains(&year) {
            return Err(DomainError::invalid(format!("year {} out of range", year)));
        }
        if !(1..=12).contains(&month) {
            return Err(DomainError::invalid(format!("month {} out of range", month)));
        }
        Ok(Self { year, month })
    }

    /// Parse a strict `YYYY-MM` string
    pub fn parse(s: &str) -> DomainResult<Self> {
        let mut parts = s.split('-');
        let (year, month) = match (parts.next(), parts.next(), parts.next()) {
            (Some(y), Some(m), None)
                if y.len() == 4 && m.len() == 2 && all_digits(y) && all_digits(m) =>
            {
                (y, m)
            }
            _ => {
                return Err(DomainError::invalid(format!(
                    "month must be YYYY-MM, got '{}'",
                    s
                )))
            }
        };

        let year: i32 = year
            .parse()
            .map_err(|_| DomainError::invalid(format!("bad year in '{}'", s)))?;
        let month: u32 = month
            .parse()
            .map_err(|_| DomainError::invalid(format!("bad month in '{}'", s)))?;
        Self::new(year, month)
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The month containing today's local date
    pub fn current() -> Self {
        Self::from_date(today())
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Month number, 1-12
    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn days_in_month(&self) -> u32 {
        match self.month {
            4 | 6 | 9 | 11 => 30,
            2 if is_leap_year(self.year) => 29,
            2 => 28,
            _ => 31,
        }
    }

    pub fn first_day(&self) -> DomainResult<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .ok_or_else(|| DomainError::invalid(format!("{} has no first day", self)))
    }

    pub fn last_day(&self) -> DomainResult<NaiveDate> {
        let first = self.first_day()?;
        Ok(first + Duration::days(i64::from(self.days_in_month()) - 1))
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    pub fn previous(&self) -> DomainResult<Self> {
        if self.month == 1 {
            Self::new(self.year - 1, 12)
        } else {
            Self::new(self.year, self.month - 1)
        }
    }

    pub fn next(&self) -> DomainResult<Self> {
        if self.month == 12 {
            Self::new(self.year + 1, 1)
        } else {
            Self::new(self.year, self.month + 1)
        }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for YearMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    #[test]
    fn test_parse_date_valid() {
        assert_eq!(d("2024-02-29"), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
    }

    #[test]
    fn test_parse_date_rejects_malformed() {
        assert!(parse_date("2024-2-05").is_err());
        assert!(parse_date("2024/02/05").is_err());
        assert!(parse_date("2023-02-29").is_err());
        assert!(parse_date("").is_err());
        assert!(parse_date("2024-02-05T00:00").is_err());
        assert!(matches!(
            parse_date("nope"),
            Err(DomainError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_days_between_across_dst_and_months() {
        assert_eq!(days_between(d("2024-03-09"), d("2024-03-11")), 2);
        assert_eq!(days_between(d("2024-01-31"), d("2024-02-01")), 1);
        assert_eq!(days_between(d("2024-02-01"), d("2024-01-31")), -1);
    }

    #[test]
    fn test_year_month_parse_and_display() {
        let ym = YearMonth::parse("2024-07").unwrap();
        assert_eq!(ym.year(), 2024);
        assert_eq!(ym.month(), 7);
        assert_eq!(ym.to_string(), "2024-07");

        assert!(YearMonth::parse("2024-13").is_err());
        assert!(YearMonth::parse("2024-00").is_err());
        assert!(YearMonth::parse("2024-7").is_err());
        assert!(YearMonth::parse("2024-07-01").is_err());
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(YearMonth::new(2024, 2).unwrap().days_in_month(), 29);
        assert_eq!(YearMonth::new(2023, 2).unwrap().days_in_month(), 28);
        assert_eq!(YearMonth::new(1900, 2).unwrap().days_in_month(), 28);
        assert_eq!(YearMonth::new(2000, 2).unwrap().days_in_month(), 29);
        assert_eq!(YearMonth::new(2024, 4).unwrap().days_in_month(), 30);
        assert_eq!(YearMonth::new(2024, 12).unwrap().days_in_month(), 31);
    }

    #[test]
    fn test_month_bounds() {
        let ym = YearMonth::new(2024, 2).unwrap();
        assert_eq!(ym.first_day().unwrap(), d("2024-02-01"));
        assert_eq!(ym.last_day().unwrap(), d("2024-02-29"));
        assert!(ym.contains(d("2024-02-15")));
        assert!(!ym.contains(d("2024-03-01")));
    }

    #[test]
    fn test_month_navigation_wraps_years() {
        let jan = YearMonth::new(2024, 1).unwrap();
        assert_eq!(jan.previous().unwrap().to_string(), "2023-12");
        let dec = YearMonth::new(2024, 12).unwrap();
        assert_eq!(dec.next().unwrap().to_string(), "2025-01");
    }

    #[test]
    fn test_day_navigation() {
        assert_eq!(next_day(d("2024-02-28")).unwrap(), d("2024-02-29"));
        assert_eq!(previous_day(d("2024-03-01")).unwrap(), d("2024-02-29"));
    }

    #[test]
    fn test_year_month_serializes_as_string() {
        let ym = YearMonth::new(2025, 3).unwrap();
        assert_eq!(serde_json::to_string(&ym).unwrap(), "\"2025-03\"");
    }
}
