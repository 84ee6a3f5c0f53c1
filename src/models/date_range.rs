//! Date range and calendar month models.
//!
//! This module contains the [`DateRange`] and [`MonthPeriod`] types that
//! define the windows used for validation, grid building and monthly
//! aggregation.

use chrono::{Datelike, Duration, IsoWeek, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Longest range accepted by [`DateRange::new`], in days.
pub const MAX_RANGE_DAYS: i64 = 366;

/// An inclusive range of calendar days.
///
/// # Example
///
/// ```
/// use roster_engine::models::DateRange;
/// use chrono::NaiveDate;
///
/// let range = DateRange::new(
///     NaiveDate::from_ymd_opt(2026, 2, 9).unwrap(),
///     NaiveDate::from_ymd_opt(2026, 2, 15).unwrap(),
/// ).unwrap();
///
/// assert_eq!(range.num_days(), 7);
/// assert!(range.contains_date(NaiveDate::from_ymd_opt(2026, 2, 9).unwrap()));  // start date
/// assert!(range.contains_date(NaiveDate::from_ymd_opt(2026, 2, 15).unwrap())); // end date
/// assert!(!range.contains_date(NaiveDate::from_ymd_opt(2026, 2, 16).unwrap())); // after
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    /// The first day of the range (inclusive).
    pub start_date: NaiveDate,
    /// The last day of the range (inclusive).
    pub end_date: NaiveDate,
}

impl DateRange {
    /// Creates a range, rejecting one that ends before it starts or spans
    /// more than [`MAX_RANGE_DAYS`].
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> EngineResult<Self> {
        let range = Self {
            start_date,
            end_date,
        };
        range.ensure_supported()?;
        Ok(range)
    }

    /// Checks that the range is ordered, no longer than [`MAX_RANGE_DAYS`],
    /// and leaves room for a whole ISO week at either end of the calendar.
    pub fn ensure_supported(&self) -> EngineResult<()> {
        let week = Duration::days(7);
        let supported = self.start_date <= self.end_date
            && self.num_days() <= MAX_RANGE_DAYS
            && self.start_date.checked_sub_signed(week).is_some()
            && self.end_date.checked_add_signed(week).is_some();
        if !supported {
            return Err(EngineError::InvalidDateRange {
                start_date: self.start_date,
                end_date: self.end_date,
            });
        }
        Ok(())
    }

    /// Returns the Monday-to-Sunday ISO week containing `date`.
    pub fn iso_week_of(date: NaiveDate) -> Self {
        let start_date = date - Duration::days(date.weekday().num_days_from_monday() as i64);
        Self {
            start_date,
            end_date: start_date + Duration::days(6),
        }
    }

    /// Checks if a given date falls within this range (inclusive).
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Checks whether two ranges share at least one day.
    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.start_date <= other.end_date && other.start_date <= self.end_date
    }

    /// Checks whether `other` lies entirely inside this range.
    pub fn covers(&self, other: &DateRange) -> bool {
        self.start_date <= other.start_date && other.end_date <= self.end_date
    }

    /// Returns the overlap of two ranges, if any.
    pub fn intersection(&self, other: &DateRange) -> Option<DateRange> {
        let start_date = self.start_date.max(other.start_date);
        let end_date = self.end_date.min(other.end_date);
        (start_date <= end_date).then_some(DateRange {
            start_date,
            end_date,
        })
    }

    /// Number of days in the range.
    pub fn num_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }

    /// Iterates over every day in the range in order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.start_date
            .iter_days()
            .take_while(move |d| *d <= self.end_date)
    }

    /// Moves the whole range by a number of days.
    ///
    /// Fails with `InvalidDateRange` when the moved range falls outside the
    /// supported calendar.
    pub fn shifted_by(&self, days: i64) -> EngineResult<DateRange> {
        let offset = Duration::days(days);
        let edge = if days < 0 { NaiveDate::MIN } else { NaiveDate::MAX };
        let start_date = self.start_date.checked_add_signed(offset).unwrap_or(edge);
        let end_date = self.end_date.checked_add_signed(offset).unwrap_or(edge);
        DateRange::new(start_date, end_date)
    }

    /// Distinct ISO weeks touched by the range, with the part of each week
    /// that lies inside the range.
    pub fn iso_weeks(&self) -> Vec<(IsoWeek, DateRange)> {
        let mut weeks = Vec::new();
        let mut cursor = self.start_date;
        while cursor <= self.end_date {
            let week = DateRange::iso_week_of(cursor);
            if let Some(part) = week.intersection(self) {
                weeks.push((cursor.iso_week(), part));
            }
            cursor = week.end_date + Duration::days(1);
        }
        weeks
    }

    /// Dates in the range that fall on the given weekday.
    pub fn weekdays(&self, weekday: Weekday) -> Vec<NaiveDate> {
        self.days().filter(|d| d.weekday() == weekday).collect()
    }
}

/// A calendar month used by the monthly aggregation report.
///
/// # Example
///
/// ```
/// use roster_engine::models::MonthPeriod;
/// use chrono::NaiveDate;
///
/// let feb = MonthPeriod::new(2028, 2).unwrap();
/// assert_eq!(feb.range().end_date, NaiveDate::from_ymd_opt(2028, 2, 29).unwrap());
/// assert!(MonthPeriod::new(2026, 13).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MonthPeriod {
    /// The calendar year.
    pub year: i32,
    /// The month number, 1 to 12.
    pub month: u32,
}

impl MonthPeriod {
    /// Creates a month period, rejecting values that are not a calendar month
    /// or that sit at the edge of the supported calendar.
    pub fn new(year: i32, month: u32) -> EngineResult<Self> {
        if NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(EngineError::InvalidMonth { year, month });
        }
        let period = Self { year, month };
        if period.range().ensure_supported().is_err() {
            return Err(EngineError::InvalidMonth { year, month });
        }
        Ok(period)
    }

    /// First day of the month.
    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    /// Last day of the month.
    pub fn last_day(&self) -> NaiveDate {
        let (year, month) = if self.month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        };
        NaiveDate::from_ymd_opt(year, month, 1)
            .and_then(|d| d.pred_opt())
            .unwrap_or(NaiveDate::MAX)
    }

    /// The whole month as an inclusive date range.
    pub fn range(&self) -> DateRange {
        DateRange {
            start_date: self.first_day(),
            end_date: self.last_day(),
        }
    }
}
