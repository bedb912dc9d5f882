//! Calendar-month archive windows.
//!
//! Archive URLs carry the month as a single `YYYYMM` integer (`202401` is
//! January 2024). A month covers the half-open UTC range from its first
//! instant up to the first instant of the following month.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};

/// Reasons an archive month value is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ArchiveMonthError {
    /// The month part is outside `1..=12`.
    #[error("month {0} is not between 1 and 12")]
    InvalidMonth(u32),
    /// The year part is zero or too large for a calendar date.
    #[error("year {0} is out of range")]
    InvalidYear(u32),
}

/// One calendar month used to filter posts by publish date.
///
/// ## Invariants
/// - `start < end`, both at midnight UTC on the first day of a month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArchiveMonth {
    year: i32,
    month: u32,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

fn month_start(year: i32, month: u32) -> Option<DateTime<Utc>> {
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

impl ArchiveMonth {
    /// Parse a `YYYYMM` value.
    ///
    /// # Examples
    /// ```
    /// use blog::domain::ArchiveMonth;
    ///
    /// let month = ArchiveMonth::from_yyyymm(202412).expect("valid month");
    /// assert_eq!(month.year(), 2024);
    /// assert_eq!(month.month(), 12);
    /// assert_eq!(month.end().to_rfc3339(), "2025-01-01T00:00:00+00:00");
    /// ```
    pub fn from_yyyymm(value: u32) -> Result<Self, ArchiveMonthError> {
        let year = value / 100;
        let month = value % 100;
        Self::new(year, month)
    }

    /// Build a month from separate year and month numbers.
    pub fn new(year: u32, month: u32) -> Result<Self, ArchiveMonthError> {
        if !(1..=12).contains(&month) {
            return Err(ArchiveMonthError::InvalidMonth(month));
        }
        if year == 0 {
            return Err(ArchiveMonthError::InvalidYear(year));
        }
        let signed_year = i32::try_from(year).map_err(|_| ArchiveMonthError::InvalidYear(year))?;
        let (next_year, next_month) = if month == 12 {
            let following = signed_year
                .checked_add(1)
                .ok_or(ArchiveMonthError::InvalidYear(year))?;
            (following, 1)
        } else {
            (signed_year, month + 1)
        };
        let start =
            month_start(signed_year, month).ok_or(ArchiveMonthError::InvalidYear(year))?;
        let end = month_start(next_year, next_month).ok_or(ArchiveMonthError::InvalidYear(year))?;
        Ok(Self {
            year: signed_year,
            month,
            start,
            end,
        })
    }

    /// Calendar year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Month number, `1..=12`.
    pub fn month(&self) -> u32 {
        self.month
    }

    /// First instant of the month (inclusive).
    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// First instant of the next month (exclusive).
    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Whether `instant` falls inside the month.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant < self.end
    }

    /// The `YYYYMM` form used in URLs.
    pub fn as_yyyymm(&self) -> u32 {
        self.year.unsigned_abs() * 100 + self.month
    }
}

impl fmt::Display for ArchiveMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.start.format("%B %Y"))
    }
}

/// Publish-date filter applied to post listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishedWindow {
    /// Every post.
    All,
    /// Posts published within one month.
    Month(ArchiveMonth),
}

impl PublishedWindow {
    /// Half-open `[start, end)` bounds, or `None` for an unbounded window.
    pub fn bounds(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        match self {
            Self::All => None,
            Self::Month(month) => Some((month.start(), month.end())),
        }
    }

    /// Whether a post published at `instant` belongs to the window.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        match self {
            Self::All => true,
            Self::Month(month) => month.contains(instant),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    fn at(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, hour, 0, 0)
            .single()
            .expect("valid timestamp")
    }

    #[rstest]
    fn january_covers_half_open_range() {
        let month = ArchiveMonth::from_yyyymm(202401).expect("valid month");
        assert_eq!(month.start(), at(2024, 1, 1, 0));
        assert_eq!(month.end(), at(2024, 2, 1, 0));
        assert!(month.contains(at(2024, 1, 31, 23)));
        assert!(!month.contains(at(2024, 2, 1, 0)));
        assert!(!month.contains(at(2023, 12, 31, 23)));
    }

    #[rstest]
    fn december_wraps_into_next_year() {
        let month = ArchiveMonth::from_yyyymm(202412).expect("valid month");
        assert_eq!(month.end(), at(2025, 1, 1, 0));
        assert_eq!(month.as_yyyymm(), 202412);
        assert_eq!(month.to_string(), "December 2024");
    }

    #[rstest]
    #[case(202400, ArchiveMonthError::InvalidMonth(0))]
    #[case(202413, ArchiveMonthError::InvalidMonth(13))]
    #[case(12, ArchiveMonthError::InvalidYear(0))]
    #[case(2024, ArchiveMonthError::InvalidMonth(24))]
    fn rejects_impossible_months(#[case] value: u32, #[case] expected: ArchiveMonthError) {
        assert_eq!(ArchiveMonth::from_yyyymm(value), Err(expected));
    }

    #[rstest]
    fn rejects_years_beyond_calendar_range() {
        assert!(matches!(
            ArchiveMonth::from_yyyymm(u32::MAX - (u32::MAX % 100) + 1),
            Err(ArchiveMonthError::InvalidYear(_))
        ));
    }

    #[rstest]
    #[case(12)]
    #[case(1)]
    fn largest_signed_year_is_rejected_not_overflowed(#[case] month: u32) {
        let year = i32::MAX.unsigned_abs();
        assert_eq!(
            ArchiveMonth::new(year, month),
            Err(ArchiveMonthError::InvalidYear(year))
        );
    }

    #[rstest]
    fn window_bounds_follow_month() {
        let month = ArchiveMonth::from_yyyymm(202406).expect("valid month");
        assert_eq!(PublishedWindow::All.bounds(), None);
        assert_eq!(
            PublishedWindow::Month(month).bounds(),
            Some((at(2024, 6, 1, 0), at(2024, 7, 1, 0)))
        );
        assert!(PublishedWindow::All.contains(at(1999, 1, 1, 0)));
        assert!(!PublishedWindow::Month(month).contains(at(2024, 7, 1, 0)));
    }
}
