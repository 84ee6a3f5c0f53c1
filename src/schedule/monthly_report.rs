//! Monthly aggregation reporter.
//!
//! Merges published shifts and approved leave per employee over one
//! calendar month, splits hours into regular and overtime against the
//! prorated monthly ceiling, prices them and rolls everything up by role.
//!
//! ## Rules
//!
//! - Only published, active, non-day-off shifts bear hours
//! - Approved leave days are listed with zero hours; a shift on a leave
//!   day keeps its hours and is marked for review
//! - Employees with no hours and no leave in the month are left out
//! - A missing hourly rate leaves the hours in every total but the cost
//!   out of every total, and is listed in `omissions`

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use tracing::warn;

use crate::calculation::{labor_cost, minutes_to_hours, monthly_regular_max, split_overtime};
use crate::config::{LaborConstraints, TemplateRegistry};
use crate::error::EngineResult;
use crate::models::{
    DayEntry, Employee, EmployeeMonthlyRecord, GrandTotal, LeaveRequest, MonthPeriod,
    MonthlyReport, RecordFlag, ReportOmission, RoleTotal, Shift,
};

use super::cancellation::CancellationToken;

/// Name used in `Cancelled` errors raised by the reporter.
pub const REPORT_OPERATION: &str = "monthly_report";

/// The records a monthly report is built from.
#[derive(Debug, Clone, Copy)]
pub struct ReportSource<'a> {
    /// The month to report.
    pub period: MonthPeriod,
    /// Candidate employees; inactive ones are skipped.
    pub employees: &'a [Employee],
    /// Published shifts in the month.
    pub shifts: &'a [Shift],
    /// Leave requests overlapping the month.
    pub leave: &'a [LeaveRequest],
}

/// Builds the monthly report.
///
/// The token is checked before each employee; once it fires the whole
/// call fails with `Cancelled` and no partial report is returned.
pub fn aggregate_month(
    source: &ReportSource<'_>,
    registry: &TemplateRegistry,
    constraints: &LaborConstraints,
    token: &CancellationToken,
) -> EngineResult<MonthlyReport> {
    let period = source.period;
    let ceiling = monthly_regular_max(constraints.max_weekly_hours);

    let mut employees: Vec<&Employee> = source.employees.iter().filter(|e| e.active).collect();
    employees.sort_by(|a, b| a.id.cmp(&b.id));

    let mut records = Vec::new();
    let mut omissions = Vec::new();
    for employee in employees {
        token.check(REPORT_OPERATION)?;

        let Some(record) = employee_record(employee, source, registry, constraints, ceiling) else {
            continue;
        };
        if record.flags.contains(&RecordFlag::MissingHourlyRate) {
            warn!(
                employee_id = %record.employee_id,
                hours = %record.total_hours,
                "No hourly rate; cost left out of the monthly report"
            );
            omissions.push(ReportOmission {
                employee_id: record.employee_id.clone(),
                reason: RecordFlag::MissingHourlyRate,
                uncosted_hours: record.total_hours,
            });
        }
        records.push(record);
    }

    let mut role_totals: BTreeMap<String, RoleTotal> = BTreeMap::new();
    let mut grand_total = GrandTotal::default();
    for record in &records {
        let cost = record.total_cost.unwrap_or(Decimal::ZERO);

        let role = role_totals.entry(record.role.clone()).or_default();
        role.total_hours += record.total_hours;
        role.overtime_hours += record.overtime_hours;
        role.total_cost += cost;
        role.count += 1;

        grand_total.hours += record.total_hours;
        grand_total.regular_hours += record.regular_hours;
        grand_total.overtime += record.overtime_hours;
        grand_total.cost += cost;
        grand_total.employees += 1;
    }

    Ok(MonthlyReport {
        period,
        monthly_regular_max: ceiling,
        employees: records,
        role_totals,
        grand_total,
        omissions,
    })
}

fn employee_record(
    employee: &Employee,
    source: &ReportSource<'_>,
    registry: &TemplateRegistry,
    constraints: &LaborConstraints,
    ceiling: Decimal,
) -> Option<EmployeeMonthlyRecord> {
    let month = source.period.range();
    let mut days: BTreeMap<_, DayEntry> = BTreeMap::new();
    let mut worked_minutes: BTreeMap<_, i64> = BTreeMap::new();

    for shift in source.shifts.iter().filter(|s| {
        s.employee_id == employee.id && s.is_active() && month.contains_date(s.date)
    }) {
        let entry = days.entry(shift.date).or_insert_with(|| DayEntry {
            hours: Decimal::ZERO,
            shift_type: None,
            category: None,
            is_day_off: false,
            is_leave: false,
            leave_overlap: false,
        });
        if shift.is_day_off {
            entry.is_day_off = true;
        } else {
            *worked_minutes.entry(shift.date).or_default() += shift.worked_minutes();
        }
        entry.shift_type = shift.shift_type.clone();
        entry.category = registry.category_of(shift);
    }
    for (date, minutes) in &worked_minutes {
        if let Some(entry) = days.get_mut(date) {
            entry.hours = minutes_to_hours(*minutes);
        }
    }

    let mut leave_days = 0u32;
    let mut review_dates = Vec::new();
    for date in month.days() {
        if !source
            .leave
            .iter()
            .any(|l| l.employee_id == employee.id && l.covers(date))
        {
            continue;
        }
        leave_days += 1;
        let entry = days.entry(date).or_insert_with(|| DayEntry {
            hours: Decimal::ZERO,
            shift_type: None,
            category: None,
            is_day_off: false,
            is_leave: false,
            leave_overlap: false,
        });
        entry.is_leave = true;
        if entry.hours > Decimal::ZERO {
            entry.leave_overlap = true;
            review_dates.push(date);
        }
    }

    let total_hours = minutes_to_hours(worked_minutes.values().sum());
    if total_hours.is_zero() && leave_days == 0 {
        return None;
    }

    let split = split_overtime(total_hours, ceiling);
    let rate = employee.billable_rate();
    let total_cost = rate.map(|rate| {
        labor_cost(
            split.regular_hours,
            split.overtime_hours,
            rate,
            constraints.overtime_multiplier,
        )
    });

    let mut flags = Vec::new();
    if rate.is_none() {
        flags.push(RecordFlag::MissingHourlyRate);
    }
    if !review_dates.is_empty() {
        flags.push(RecordFlag::LeaveOverlap);
    }

    Some(EmployeeMonthlyRecord {
        employee_id: employee.id.clone(),
        name: employee.name.clone(),
        role: employee.role.clone(),
        hourly_rate: rate,
        days,
        total_hours,
        regular_hours: split.regular_hours,
        overtime_hours: split.overtime_hours,
        total_cost,
        leave_days,
        review_dates,
        flags,
    })
}
