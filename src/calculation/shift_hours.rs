//! Shift duration calculation.
//!
//! All shift arithmetic goes through one named rule, wall-clock duration
//! with inferred day rollover: an end time at or before the start time means
//! the block finishes on the following day.
//!
//! ## Rules
//!
//! - Each block lasts `end - start`, plus 24 hours when `end <= start`
//! - The break is deducted from the first block only, never below zero
//! - The second block of a split shift is added with its own rollover
//! - Hours are `minutes / 60` as an exact [`Decimal`]

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Minutes in one calendar day.
pub const MINUTES_PER_DAY: i64 = 24 * 60;

/// Minutes in one hour, as a [`Decimal`].
pub const MINUTES_PER_HOUR: Decimal = Decimal::from_parts(60, 0, 0, false, 0);

/// Minutes from `start` to `end` on the wall clock, rolling over midnight.
///
/// Seconds are ignored; the engine works at minute precision.
///
/// # Examples
///
/// ```
/// use roster_engine::calculation::wall_clock_minutes;
/// use chrono::NaiveTime;
///
/// let t = |h, m| NaiveTime::from_hms_opt(h, m, 0).unwrap();
/// assert_eq!(wall_clock_minutes(t(9, 0), t(17, 0)), 480);
/// assert_eq!(wall_clock_minutes(t(22, 0), t(2, 0)), 240);
/// assert_eq!(wall_clock_minutes(t(8, 0), t(8, 0)), 1440);
/// ```
pub fn wall_clock_minutes(start: NaiveTime, end: NaiveTime) -> i64 {
    let start_min = minute_of_day(start);
    let end_min = minute_of_day(end);
    if end_min <= start_min {
        end_min + MINUTES_PER_DAY - start_min
    } else {
        end_min - start_min
    }
}

fn minute_of_day(time: NaiveTime) -> i64 {
    i64::from(time.hour()) * 60 + i64::from(time.minute())
}

/// Converts whole minutes to hours.
pub fn minutes_to_hours(minutes: i64) -> Decimal {
    Decimal::from(minutes) / MINUTES_PER_HOUR
}

/// The minute-level breakdown of a shift's worked time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftHoursBreakdown {
    /// Length of the first block before the break.
    pub first_block_minutes: i64,
    /// Break minutes actually deducted (capped at the first block length).
    pub break_deducted_minutes: i64,
    /// Length of the second block, zero for single-block shifts.
    pub second_block_minutes: i64,
    /// Worked minutes after the break.
    pub total_minutes: i64,
}

impl ShiftHoursBreakdown {
    /// Worked time in hours.
    pub fn hours(&self) -> Decimal {
        minutes_to_hours(self.total_minutes)
    }
}

/// Calculates worked time for a shift from its stored time fields.
///
/// # Arguments
///
/// * `start` - Start of the first block
/// * `end` - End of the first block; at or before `start` means the next day
/// * `break_minutes` - Unpaid break, deducted from the first block only
/// * `second_block` - Start and end of the second block of a split shift
///
/// # Examples
///
/// ```
/// use roster_engine::calculation::calculate_shift_hours;
/// use chrono::NaiveTime;
/// use rust_decimal::Decimal;
///
/// let t = |h, m| NaiveTime::from_hms_opt(h, m, 0).unwrap();
///
/// // Morning shift 10:30-17:00 with a 30 minute break
/// let morning = calculate_shift_hours(t(10, 30), t(17, 0), 30, None);
/// assert_eq!(morning.hours(), Decimal::new(6, 0));
///
/// // Split shift 12:00-16:00 and 20:00-23:30
/// let split = calculate_shift_hours(t(12, 0), t(16, 0), 0, Some((t(20, 0), t(23, 30))));
/// assert_eq!(split.hours(), Decimal::new(75, 1));
/// ```
pub fn calculate_shift_hours(
    start: NaiveTime,
    end: NaiveTime,
    break_minutes: u32,
    second_block: Option<(NaiveTime, NaiveTime)>,
) -> ShiftHoursBreakdown {
    let first_block_minutes = wall_clock_minutes(start, end);
    let break_deducted_minutes = i64::from(break_minutes).min(first_block_minutes);
    let second_block_minutes = second_block
        .map(|(second_start, second_end)| wall_clock_minutes(second_start, second_end))
        .unwrap_or(0);

    let total_minutes =
        (first_block_minutes - break_deducted_minutes + second_block_minutes).max(0);

    ShiftHoursBreakdown {
        first_block_minutes,
        break_deducted_minutes,
        second_block_minutes,
        total_minutes,
    }
}

/// A shift placed on the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftSpan {
    /// When the first block starts.
    pub start: NaiveDateTime,
    /// When the last block ends.
    pub end: NaiveDateTime,
}

impl ShiftSpan {
    /// Whole minutes from the end of `self` to the start of `next`.
    ///
    /// Negative when the two spans overlap.
    pub fn gap_minutes_until(&self, next: &ShiftSpan) -> i64 {
        (next.start - self.end).num_minutes()
    }
}

/// Places a shift on the timeline.
///
/// The first block starts at `date + start`. The second block starts on the
/// same date, or on the next date when its start is before the first
/// block's start. The span ends at the later of the two block ends.
pub fn shift_span(
    date: NaiveDate,
    start: NaiveTime,
    end: NaiveTime,
    second_block: Option<(NaiveTime, NaiveTime)>,
) -> ShiftSpan {
    let first_start = date.and_time(start);
    let first_end = first_start + Duration::minutes(wall_clock_minutes(start, end));

    let last_end = match second_block {
        Some((second_start, second_end)) => {
            let day = if second_start < start {
                date + Duration::days(1)
            } else {
                date
            };
            let block_start = day.and_time(second_start);
            let block_end = block_start + Duration::minutes(wall_clock_minutes(second_start, second_end));
            first_end.max(block_end)
        }
        None => first_end,
    };

    ShiftSpan {
        start: first_start,
        end: last_end,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    // ==========================================================================
    // SH-001: same-day shift
    // ==========================================================================
    #[test]
    fn test_sh_001_same_day_shift() {
        let result = calculate_shift_hours(time(9, 0), time(17, 0), 0, None);
        assert_eq!(result.total_minutes, 480);
        assert_eq!(result.hours(), dec("8.0"));
    }

    // ==========================================================================
    // SH-002: overnight shift rolls over midnight
    // ==========================================================================
    #[test]
    fn test_sh_002_overnight_shift() {
        let result = calculate_shift_hours(time(23, 0), time(3, 0), 15, None);
        assert_eq!(result.first_block_minutes, 240);
        assert_eq!(result.hours(), dec("3.75"));
    }

    // ==========================================================================
    // SH-003: equal start and end is a full day
    // ==========================================================================
    #[test]
    fn test_sh_003_equal_start_and_end_is_24_hours() {
        let result = calculate_shift_hours(time(7, 0), time(7, 0), 0, None);
        assert_eq!(result.hours(), dec("24"));
    }

    // ==========================================================================
    // SH-004: split shift adds both blocks
    // ==========================================================================
    #[test]
    fn test_sh_004_split_shift() {
        let result =
            calculate_shift_hours(time(12, 0), time(16, 0), 30, Some((time(20, 0), time(23, 30))));
        assert_eq!(result.first_block_minutes, 240);
        assert_eq!(result.second_block_minutes, 210);
        assert_eq!(result.hours(), dec("7.0"));
    }

    // ==========================================================================
    // SH-005: break larger than the first block never eats into the second
    // ==========================================================================
    #[test]
    fn test_sh_005_break_capped_at_first_block() {
        let result =
            calculate_shift_hours(time(12, 0), time(12, 15), 30, Some((time(18, 0), time(22, 0))));
        assert_eq!(result.break_deducted_minutes, 15);
        assert_eq!(result.hours(), dec("4.0"));
    }

    #[test]
    fn test_swapping_blocks_changes_result_when_break_exceeds_short_block() {
        // A = 4h, B = 15m, break 30m
        let a_first =
            calculate_shift_hours(time(8, 0), time(12, 0), 30, Some((time(18, 0), time(18, 15))));
        let b_first =
            calculate_shift_hours(time(18, 0), time(18, 15), 30, Some((time(8, 0), time(12, 0))));
        assert_eq!(a_first.hours(), dec("3.75"));
        assert_eq!(b_first.hours(), dec("4.0"));
    }

    #[test]
    fn test_break_longer_than_shift_floors_at_zero() {
        let result = calculate_shift_hours(time(9, 0), time(9, 20), 45, None);
        assert_eq!(result.total_minutes, 0);
        assert_eq!(result.hours(), Decimal::ZERO);
    }

    #[test]
    fn test_seconds_are_ignored() {
        let start = NaiveTime::from_hms_opt(9, 0, 59).unwrap();
        assert_eq!(wall_clock_minutes(start, time(10, 0)), 60);
    }

    #[test]
    fn test_minutes_to_hours() {
        assert_eq!(minutes_to_hours(90), dec("1.5"));
        assert_eq!(minutes_to_hours(0), Decimal::ZERO);
    }

    #[test]
    fn test_span_of_day_shift() {
        let span = shift_span(make_date("2026-02-10"), time(9, 0), time(17, 0), None);
        assert_eq!(span.start, make_date("2026-02-10").and_time(time(9, 0)));
        assert_eq!(span.end, make_date("2026-02-10").and_time(time(17, 0)));
    }

    #[test]
    fn test_span_of_night_shift_ends_next_day() {
        let span = shift_span(make_date("2026-02-10"), time(23, 0), time(3, 0), None);
        assert_eq!(span.end, make_date("2026-02-11").and_time(time(3, 0)));
    }

    #[test]
    fn test_span_second_block_after_midnight() {
        // 18:00-22:00 then 00:30-02:00 the next morning
        let span = shift_span(
            make_date("2026-02-10"),
            time(18, 0),
            time(22, 0),
            Some((time(0, 30), time(2, 0))),
        );
        assert_eq!(span.end, make_date("2026-02-11").and_time(time(2, 0)));
    }

    #[test]
    fn test_gap_between_spans() {
        let night = shift_span(make_date("2026-02-10"), time(22, 0), time(2, 0), None);
        let morning = shift_span(make_date("2026-02-11"), time(9, 0), time(17, 0), None);
        assert_eq!(night.gap_minutes_until(&morning), 7 * 60);

        let overlapping = shift_span(make_date("2026-02-11"), time(1, 0), time(5, 0), None);
        assert_eq!(night.gap_minutes_until(&overlapping), -60);
    }
}
