//! Employee model.
//!
//! Employees are owned by an external roster. The engine only reads them:
//! the hourly rate drives cost and the role drives grouping.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

fn default_active() -> bool {
    true
}

/// Represents an employee that can be scheduled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Role used for department grouping and report roll-ups (e.g. "waiter").
    pub role: String,
    /// Hourly rate used for labor cost. Missing rates are reported, never zeroed.
    #[serde(default)]
    pub hourly_rate: Option<Decimal>,
    /// Inactive employees are left out of grids and reports.
    #[serde(default = "default_active")]
    pub active: bool,
}

impl Employee {
    /// Returns the hourly rate if it can be used for costing.
    ///
    /// # Examples
    ///
    /// ```
    /// use roster_engine::models::Employee;
    /// use rust_decimal::Decimal;
    ///
    /// let mut employee = Employee {
    ///     id: "emp_001".to_string(),
    ///     name: "Ana".to_string(),
    ///     role: "waiter".to_string(),
    ///     hourly_rate: Some(Decimal::new(1250, 2)),
    ///     active: true,
    /// };
    /// assert_eq!(employee.billable_rate(), Some(Decimal::new(1250, 2)));
    ///
    /// employee.hourly_rate = Some(Decimal::new(-1, 0));
    /// assert_eq!(employee.billable_rate(), None);
    /// ```
    pub fn billable_rate(&self) -> Option<Decimal> {
        self.hourly_rate.filter(|rate| *rate >= Decimal::ZERO)
    }
}
