//! Configuration types for scheduling and compliance.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files and replaced through the
//! API at runtime.

use std::collections::BTreeMap;

use chrono::NaiveTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::{ValidationOptions, calculate_shift_hours};
use crate::error::{EngineError, EngineResult};

/// The labor constraints every schedule is validated against.
///
/// There is exactly one live set of constraints. It is read at evaluation
/// time and replaced as a whole; the last write wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaborConstraints {
    /// Maximum worked hours in one ISO week.
    pub max_weekly_hours: Decimal,
    /// Minimum hours between the end of one shift and the start of the next.
    pub min_rest_between_shifts: Decimal,
    /// Minimum number of days off in one ISO week.
    pub min_days_off_per_week: u32,
    /// Pay multiplier for overtime hours.
    pub overtime_multiplier: Decimal,
    /// Weekly hours above which a warning is raised.
    pub overtime_warning_threshold: Decimal,
}

impl LaborConstraints {
    /// Checks that every value is usable.
    ///
    /// # Example
    ///
    /// ```
    /// use roster_engine::config::LaborConstraints;
    /// use rust_decimal::Decimal;
    ///
    /// let constraints = LaborConstraints {
    ///     max_weekly_hours: Decimal::new(40, 0),
    ///     min_rest_between_shifts: Decimal::new(12, 0),
    ///     min_days_off_per_week: 2,
    ///     overtime_multiplier: Decimal::new(15, 1),
    ///     overtime_warning_threshold: Decimal::new(35, 0),
    /// };
    /// assert!(constraints.validate().is_ok());
    ///
    /// let invalid = LaborConstraints { min_days_off_per_week: 8, ..constraints };
    /// assert!(invalid.validate().is_err());
    /// ```
    pub fn validate(&self) -> EngineResult<()> {
        let non_negative = [
            ("max_weekly_hours", self.max_weekly_hours),
            ("min_rest_between_shifts", self.min_rest_between_shifts),
            ("overtime_warning_threshold", self.overtime_warning_threshold),
        ];
        for (field, value) in non_negative {
            if value < Decimal::ZERO {
                return Err(invalid(field, format!("must not be negative, got {value}")));
            }
        }
        if self.min_days_off_per_week > 7 {
            return Err(invalid(
                "min_days_off_per_week",
                format!("must be at most 7, got {}", self.min_days_off_per_week),
            ));
        }
        if self.overtime_multiplier < Decimal::ONE {
            return Err(invalid(
                "overtime_multiplier",
                format!("must be at least 1, got {}", self.overtime_multiplier),
            ));
        }
        if self.overtime_warning_threshold > self.max_weekly_hours {
            return Err(invalid(
                "overtime_warning_threshold",
                format!(
                    "{} exceeds max_weekly_hours {}",
                    self.overtime_warning_threshold, self.max_weekly_hours
                ),
            ));
        }
        Ok(())
    }
}

fn invalid(field: &str, message: String) -> EngineError {
    EngineError::InvalidConfiguration {
        field: field.to_string(),
        message,
    }
}

/// The archetype a shift template belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftCategory {
    /// Morning shift.
    Morning,
    /// Afternoon shift.
    Afternoon,
    /// Night shift, usually crossing midnight.
    Night,
    /// Two blocks with a gap between them.
    Split,
    /// A scheduled day off.
    DayOff,
}

/// A named shift archetype.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftTemplate {
    /// Unique short code, e.g. `M` or `N`.
    pub code: String,
    /// Display label.
    pub label: String,
    /// The archetype.
    pub category: ShiftCategory,
    /// Start of the first block.
    #[serde(with = "crate::models::wall_time")]
    pub start: NaiveTime,
    /// End of the first block.
    #[serde(with = "crate::models::wall_time")]
    pub end: NaiveTime,
    /// Unpaid break in minutes.
    #[serde(default)]
    pub break_minutes: u32,
    /// Start of the second block, split templates only.
    #[serde(
        default,
        with = "crate::models::wall_time::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub second_start: Option<NaiveTime>,
    /// End of the second block, split templates only.
    #[serde(
        default,
        with = "crate::models::wall_time::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub second_end: Option<NaiveTime>,
}

impl ShiftTemplate {
    /// Returns the second block, if both ends are present.
    pub fn second_block(&self) -> Option<(NaiveTime, NaiveTime)> {
        self.second_start.zip(self.second_end)
    }

    /// Returns true for day-off templates.
    pub fn is_day_off(&self) -> bool {
        self.category == ShiftCategory::DayOff
    }

    /// Worked hours of a shift created from this template.
    pub fn hours(&self) -> Decimal {
        if self.is_day_off() {
            return Decimal::ZERO;
        }
        calculate_shift_hours(self.start, self.end, self.break_minutes, self.second_block()).hours()
    }

    /// Checks the template is internally consistent.
    pub fn validate(&self) -> EngineResult<()> {
        let field = format!("shift_templates.{}", self.code);
        if self.code.trim().is_empty() {
            return Err(invalid("shift_templates.code", "must not be empty".to_string()));
        }
        let has_second = self.second_start.is_some() || self.second_end.is_some();
        match self.category {
            ShiftCategory::Split if self.second_block().is_none() => Err(invalid(
                &field,
                "split templates need both second_start and second_end".to_string(),
            )),
            ShiftCategory::Split => Ok(()),
            _ if has_second => Err(invalid(
                &field,
                format!("{:?} templates must not have a second block", self.category)
                    .to_lowercase(),
            )),
            _ => Ok(()),
        }
    }
}

/// What publishing does with error-severity violations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PublishPolicy {
    /// Refuse to publish while errors remain.
    #[default]
    Block,
    /// Publish and return the errors as warnings.
    Warn,
}

/// Display settings for one department (role).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentConfig {
    /// Group label in the grid.
    pub label: String,
    /// Sort position of the group.
    pub order: u32,
}

/// Sort position for roles with no department entry.
pub const UNKNOWN_DEPARTMENT_ORDER: u32 = 99;

/// Engine behavior settings from engine.yaml.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineSettings {
    /// Whether validation errors block publishing.
    #[serde(default)]
    pub publish_policy: PublishPolicy,
    /// Count days without any shift as days off.
    #[serde(default)]
    pub count_unscheduled_days_as_off: bool,
    /// Deadline for building a monthly report, in milliseconds.
    #[serde(default)]
    pub report_deadline_ms: Option<u64>,
    /// Department display settings keyed by role.
    #[serde(default)]
    pub departments: BTreeMap<String, DepartmentConfig>,
}

impl EngineSettings {
    /// Label and order of the department for `role`.
    ///
    /// Unknown roles get the upper-cased role as label and sort last.
    pub fn department(&self, role: &str) -> DepartmentConfig {
        self.departments
            .get(role)
            .cloned()
            .unwrap_or_else(|| DepartmentConfig {
                label: role.to_uppercase(),
                order: UNKNOWN_DEPARTMENT_ORDER,
            })
    }

    /// Options passed to the validation engine.
    pub fn validation_options(&self) -> ValidationOptions {
        ValidationOptions {
            count_unscheduled_days_as_off: self.count_unscheduled_days_as_off,
        }
    }
}

/// The complete engine configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    constraints: LaborConstraints,
    templates: Vec<ShiftTemplate>,
    settings: EngineSettings,
}

impl EngineConfig {
    /// Creates a new EngineConfig from its component parts.
    pub fn new(
        constraints: LaborConstraints,
        templates: Vec<ShiftTemplate>,
        settings: EngineSettings,
    ) -> Self {
        Self {
            constraints,
            templates,
            settings,
        }
    }

    /// Returns the labor constraints.
    pub fn constraints(&self) -> &LaborConstraints {
        &self.constraints
    }

    /// Returns all shift templates.
    pub fn templates(&self) -> &[ShiftTemplate] {
        &self.templates
    }

    /// Returns the engine settings.
    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }
}
