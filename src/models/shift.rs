//! Shift model and related types.
//!
//! A shift stores its resolved start, end and break values rather than a
//! reference to the template it was created from, so editing a template
//! never changes shifts that already exist.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::{ShiftHoursBreakdown, ShiftSpan, calculate_shift_hours, shift_span};
use crate::error::{EngineError, EngineResult};

/// Lifecycle status of an individual shift.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftStatus {
    /// The shift is part of the schedule.
    #[default]
    Active,
    /// The shift was cancelled and no longer counts.
    Cancelled,
}

/// Represents one scheduled work interval for one employee on one date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shift {
    /// Unique identifier for the shift.
    pub id: String,
    /// The employee working the shift.
    pub employee_id: String,
    /// The calendar day the shift starts on.
    pub date: NaiveDate,
    /// Template code the shift was created from, or `None` for ad-hoc shifts.
    #[serde(default)]
    pub shift_type: Option<String>,
    /// Start of the first block.
    #[serde(with = "crate::models::wall_time")]
    pub start_time: NaiveTime,
    /// End of the first block; at or before the start means the next day.
    #[serde(with = "crate::models::wall_time")]
    pub end_time: NaiveTime,
    /// Unpaid break, deducted from the first block only.
    #[serde(default)]
    pub break_duration_minutes: u32,
    /// Start of the second block of a split shift.
    #[serde(
        default,
        with = "crate::models::wall_time::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub second_start_time: Option<NaiveTime>,
    /// End of the second block of a split shift.
    #[serde(
        default,
        with = "crate::models::wall_time::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub second_end_time: Option<NaiveTime>,
    /// Marks the day as a scheduled day off; such rows carry no hours.
    #[serde(default)]
    pub is_day_off: bool,
    /// The plan that owns this shift. Set by the plan on write.
    #[serde(default)]
    pub schedule_plan_id: String,
    /// Whether the shift still counts.
    #[serde(default)]
    pub status: ShiftStatus,
    /// Free-form notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Shift {
    /// Returns the second block of a split shift, if both ends are present.
    pub fn second_block(&self) -> Option<(NaiveTime, NaiveTime)> {
        self.second_start_time.zip(self.second_end_time)
    }

    /// Checks the fields a write must not accept.
    ///
    /// Both ends of a second block must be given together, and the ids must
    /// not be blank.
    pub fn validate(&self) -> EngineResult<()> {
        let invalid = |message: &str| EngineError::InvalidShift {
            shift_id: self.id.clone(),
            message: message.to_string(),
        };
        if self.id.trim().is_empty() {
            return Err(invalid("shift id is empty"));
        }
        if self.employee_id.trim().is_empty() {
            return Err(invalid("employee id is empty"));
        }
        if self.second_start_time.is_some() != self.second_end_time.is_some() {
            return Err(invalid("second block needs both a start and an end"));
        }
        Ok(())
    }

    /// Returns true if the shift has not been cancelled.
    pub fn is_active(&self) -> bool {
        self.status == ShiftStatus::Active
    }

    /// Returns true if the shift bears hours: active and not a day off.
    pub fn is_working(&self) -> bool {
        self.is_active() && !self.is_day_off
    }

    /// Calculates the worked hours for the shift.
    ///
    /// Day-off rows report their stored times like any other row; callers
    /// filter with [`Shift::is_working`] before summing.
    ///
    /// # Examples
    ///
    /// ```
    /// use roster_engine::models::{Shift, ShiftStatus};
    /// use chrono::{NaiveDate, NaiveTime};
    /// use rust_decimal::Decimal;
    ///
    /// let shift = Shift {
    ///     id: "shift_001".to_string(),
    ///     employee_id: "emp_001".to_string(),
    ///     date: NaiveDate::from_ymd_opt(2026, 2, 10).unwrap(),
    ///     shift_type: Some("N".to_string()),
    ///     start_time: NaiveTime::from_hms_opt(22, 0, 0).unwrap(),
    ///     end_time: NaiveTime::from_hms_opt(6, 0, 0).unwrap(),
    ///     break_duration_minutes: 30,
    ///     second_start_time: None,
    ///     second_end_time: None,
    ///     is_day_off: false,
    ///     schedule_plan_id: "plan_001".to_string(),
    ///     status: ShiftStatus::Active,
    ///     notes: None,
    /// };
    /// assert_eq!(shift.worked_hours(), Decimal::new(75, 1)); // 7.5 hours
    /// ```
    pub fn worked_hours(&self) -> Decimal {
        self.hours_breakdown().hours()
    }

    /// Worked time in whole minutes.
    pub fn worked_minutes(&self) -> i64 {
        self.hours_breakdown().total_minutes
    }

    /// Minute-level breakdown of the shift's blocks and break.
    pub fn hours_breakdown(&self) -> ShiftHoursBreakdown {
        calculate_shift_hours(
            self.start_time,
            self.end_time,
            self.break_duration_minutes,
            self.second_block(),
        )
    }

    /// Places the shift on the timeline, resolving overnight blocks.
    pub fn span(&self) -> ShiftSpan {
        shift_span(self.date, self.start_time, self.end_time, self.second_block())
    }

    /// The moment the shift starts.
    pub fn start_datetime(&self) -> NaiveDateTime {
        self.span().start
    }

    /// The moment the last block of the shift ends.
    pub fn end_datetime(&self) -> NaiveDateTime {
        self.span().end
    }
}
