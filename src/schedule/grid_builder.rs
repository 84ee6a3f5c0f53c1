//! Schedule grid builder.
//!
//! Builds the employees × dates matrix in four passes: one row per active
//! employee that passes the filters, shift cells resolved against the
//! template registry, the leave and availability overlay, and finally the
//! per-row validation with violation marks on the affected cells.

use std::collections::BTreeMap;

use chrono::{NaiveDate, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::{EmployeeSchedule, validate_employee_schedule};
use crate::config::{EngineSettings, LaborConstraints, TemplateRegistry};
use crate::models::{
    Availability, CellKind, DailyTotal, DateRange, DepartmentGroup, Employee, GridCell,
    GridMatrix, GridRow, GridTotals, LeaveRequest, Severity, Shift, Violation, ViolationCode,
    sort_violations,
};

/// Optional row filters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridFilters {
    /// Only these employees.
    #[serde(default)]
    pub employee_ids: Option<Vec<String>>,
    /// Only these roles.
    #[serde(default)]
    pub roles: Option<Vec<String>>,
}

impl GridFilters {
    fn accepts(&self, employee: &Employee) -> bool {
        let id_ok = self
            .employee_ids
            .as_ref()
            .is_none_or(|ids| ids.iter().any(|id| *id == employee.id));
        let role_ok = self
            .roles
            .as_ref()
            .is_none_or(|roles| roles.iter().any(|r| *r == employee.role));
        id_ok && role_ok
    }
}

/// The records a grid is built from.
#[derive(Debug, Clone, Copy)]
pub struct GridSource<'a> {
    /// Columns of the grid.
    pub range: DateRange,
    /// Candidate employees; inactive ones are skipped.
    pub employees: &'a [Employee],
    /// Visible shifts in the range.
    pub shifts: &'a [Shift],
    /// Leave requests overlapping the range.
    pub leave: &'a [LeaveRequest],
    /// Availability entries in the range.
    pub availability: &'a [Availability],
}

/// Builds the schedule grid.
pub fn build_grid(
    source: &GridSource<'_>,
    filters: &GridFilters,
    registry: &TemplateRegistry,
    constraints: &LaborConstraints,
    settings: &EngineSettings,
) -> GridMatrix {
    let dates: Vec<NaiveDate> = source.range.days().collect();
    let options = settings.validation_options();

    let mut rows: Vec<GridRow> = source
        .employees
        .iter()
        .filter(|e| e.active && filters.accepts(e))
        .map(|employee| {
            let mut row = build_row(employee, source, &dates, registry);
            let schedule = EmployeeSchedule {
                employee_id: &employee.id,
                window: source.range,
                shifts: source.shifts,
                leave: source.leave,
                availability: source.availability,
            };
            row.violations = validate_employee_schedule(&schedule, constraints, &options);
            row.compliant = !row.violations.iter().any(Violation::is_error);
            for cell in &mut row.cells {
                cell.has_violation = row.violations.iter().any(|v| v.mentions(cell.date));
            }
            row
        })
        .collect();
    rows.sort_by(|a, b| (&a.name, &a.employee_id).cmp(&(&b.name, &b.employee_id)));

    let daily_totals = daily_totals(&rows, &dates);
    let coverage = coverage_warnings(&rows, &source.range);
    let groups = group_rows(rows, settings);

    let totals = GridTotals {
        hours: groups.iter().map(|g| g.total_hours).sum(),
        cost: groups.iter().map(|g| g.total_cost).sum(),
        scheduled_employees: groups
            .iter()
            .flat_map(|g| g.rows.iter())
            .filter(|r| r.cells.iter().any(|c| c.kind == CellKind::Shift))
            .count() as u32,
    };

    GridMatrix {
        range: source.range,
        dates,
        groups,
        daily_totals,
        coverage,
        totals,
    }
}

fn build_row(
    employee: &Employee,
    source: &GridSource<'_>,
    dates: &[NaiveDate],
    registry: &TemplateRegistry,
) -> GridRow {
    let mut shifts_by_date: BTreeMap<NaiveDate, &Shift> = BTreeMap::new();
    for shift in source
        .shifts
        .iter()
        .filter(|s| s.employee_id == employee.id && s.is_active())
    {
        shifts_by_date.entry(shift.date).or_insert(shift);
    }

    let cells: Vec<GridCell> = dates
        .iter()
        .map(|&date| {
            let leave = source
                .leave
                .iter()
                .find(|l| l.employee_id == employee.id && l.covers(date));
            let is_unavailable = source
                .availability
                .iter()
                .any(|a| a.employee_id == employee.id && a.date == date && !a.available);
            let shift = shifts_by_date.get(&date).copied();

            let kind = match (shift, leave) {
                (Some(s), _) if s.is_day_off => CellKind::DayOff,
                (Some(_), _) => CellKind::Shift,
                (None, Some(_)) => CellKind::Leave,
                (None, None) => CellKind::Empty,
            };

            GridCell {
                date,
                kind,
                shift_id: shift.map(|s| s.id.clone()),
                shift_type: shift.and_then(|s| s.shift_type.clone()),
                category: shift.and_then(|s| registry.category_of(s)),
                hours: shift
                    .filter(|s| s.is_working())
                    .map(Shift::worked_hours)
                    .unwrap_or(Decimal::ZERO),
                is_day_off: shift.is_some_and(|s| s.is_day_off),
                is_leave: leave.is_some(),
                leave_type: leave.map(|l| l.leave_type),
                is_unavailable,
                has_violation: false,
            }
        })
        .collect();

    let total_hours: Decimal = cells.iter().map(|c| c.hours).sum();
    GridRow {
        employee_id: employee.id.clone(),
        name: employee.name.clone(),
        role: employee.role.clone(),
        total_cost: employee.billable_rate().map(|rate| total_hours * rate),
        total_hours,
        cells,
        violations: Vec::new(),
        compliant: true,
    }
}

fn daily_totals(rows: &[GridRow], dates: &[NaiveDate]) -> Vec<DailyTotal> {
    dates
        .iter()
        .enumerate()
        .map(|(i, &date)| {
            let cells = rows.iter().filter_map(|r| r.cells.get(i));
            DailyTotal {
                date,
                hours: cells.clone().map(|c| c.hours).sum(),
                headcount: cells.filter(|c| c.kind == CellKind::Shift).count() as u32,
            }
        })
        .collect()
}

/// A `no_coverage` warning for every Sunday in range nobody works.
fn coverage_warnings(rows: &[GridRow], range: &DateRange) -> Vec<Violation> {
    let mut warnings: Vec<Violation> = range
        .weekdays(Weekday::Sun)
        .into_iter()
        .filter(|&sunday| {
            !rows
                .iter()
                .filter_map(|r| r.cell(sunday))
                .any(|c| c.kind == CellKind::Shift)
        })
        .map(|sunday| Violation {
            employee_id: String::new(),
            code: ViolationCode::NoCoverage,
            severity: Severity::Warning,
            dates: vec![sunday],
            shift_ids: Vec::new(),
            week: None,
            measured: None,
            limit: None,
            message: format!("Nobody is scheduled to work on Sunday {sunday}"),
        })
        .collect();
    sort_violations(&mut warnings);
    warnings
}

fn group_rows(rows: Vec<GridRow>, settings: &EngineSettings) -> Vec<DepartmentGroup> {
    let mut groups: BTreeMap<(u32, String), DepartmentGroup> = BTreeMap::new();
    for row in rows {
        let department = settings.department(&row.role);
        let group = groups
            .entry((department.order, row.role.clone()))
            .or_insert_with(|| DepartmentGroup {
                role: row.role.clone(),
                label: department.label,
                order: department.order,
                rows: Vec::new(),
                total_hours: Decimal::ZERO,
                total_cost: Decimal::ZERO,
            });
        group.total_hours += row.total_hours;
        group.total_cost += row.total_cost.unwrap_or(Decimal::ZERO);
        group.rows.push(row);
    }
    groups.into_values().collect()
}
