//! Labor cost calculation.
//!
//! Converts hours into money and splits a month's hours into regular and
//! overtime portions against a prorated monthly ceiling.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Average number of weeks in a month, used to prorate weekly limits.
pub const WEEKS_PER_MONTH: Decimal = Decimal::from_parts(433, 0, 0, false, 2);

/// Regular and overtime portions of a number of hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoursSplit {
    /// Hours up to the ceiling.
    pub regular_hours: Decimal,
    /// Hours beyond the ceiling.
    pub overtime_hours: Decimal,
}

/// Monthly regular-hours ceiling derived from the weekly maximum.
///
/// # Examples
///
/// ```
/// use roster_engine::calculation::monthly_regular_max;
/// use rust_decimal::Decimal;
///
/// assert_eq!(monthly_regular_max(Decimal::new(40, 0)), Decimal::new(1732, 1));
/// ```
pub fn monthly_regular_max(max_weekly_hours: Decimal) -> Decimal {
    max_weekly_hours * WEEKS_PER_MONTH
}

/// Splits `total_hours` at `ceiling`.
pub fn split_overtime(total_hours: Decimal, ceiling: Decimal) -> HoursSplit {
    let ceiling = ceiling.max(Decimal::ZERO);
    if total_hours > ceiling {
        HoursSplit {
            regular_hours: ceiling,
            overtime_hours: total_hours - ceiling,
        }
    } else {
        HoursSplit {
            regular_hours: total_hours.max(Decimal::ZERO),
            overtime_hours: Decimal::ZERO,
        }
    }
}

/// Cost of regular hours at `rate` plus overtime at `rate × multiplier`.
///
/// # Examples
///
/// ```
/// use roster_engine::calculation::labor_cost;
/// use rust_decimal::Decimal;
///
/// // 40 regular hours and 2 overtime hours at 25.00/h, overtime at 150%
/// let cost = labor_cost(Decimal::new(40, 0), Decimal::new(2, 0), Decimal::new(25, 0), Decimal::new(15, 1));
/// assert_eq!(cost, Decimal::new(1075, 0));
/// ```
pub fn labor_cost(
    regular_hours: Decimal,
    overtime_hours: Decimal,
    rate: Decimal,
    overtime_multiplier: Decimal,
) -> Decimal {
    regular_hours * rate + overtime_hours * rate * overtime_multiplier
}
