//! Record store seam.
//!
//! The engine reads and writes its records through [`ScheduleStore`]. Reads
//! see one consistent snapshot of every collection; writes run as a single
//! transaction that either commits in full or leaves the store untouched.
//! The write-boundary invariants are checked on every commit:
//!
//! - at most one active shift per employee, date and plan
//! - every shift belongs to an existing plan and lies inside its window
//! - at most one published plan covers any date

mod memory;

use std::collections::BTreeMap;

use crate::calculation::check_one_shift_per_day;
use crate::config::{LaborConstraints, ShiftTemplate, TemplateRegistry};
use crate::error::{EngineError, EngineResult};
use crate::models::{
    Availability, DateRange, Employee, LeaveRequest, SchedulePlan, Shift,
};

pub use memory::MemoryStore;

/// Access to the persisted collections.
pub trait ScheduleStore: Send + Sync {
    /// Runs `f` against a consistent snapshot of the collections.
    fn read<R>(&self, f: impl FnOnce(&Collections) -> R) -> R;

    /// Runs `f` against a working copy and commits it only when `f`
    /// returns `Ok` and the result passes the integrity checks.
    fn transaction<R>(
        &self,
        f: impl FnOnce(&mut Collections) -> EngineResult<R>,
    ) -> EngineResult<R>;
}

/// The named collections of the record store.
#[derive(Debug, Clone, Default)]
pub struct Collections {
    /// Employees keyed by id. Read-only to the engine.
    pub employees: BTreeMap<String, Employee>,
    /// Shift templates keyed by code.
    pub shift_templates: BTreeMap<String, ShiftTemplate>,
    /// The constraints singleton.
    pub labor_constraints: Option<LaborConstraints>,
    /// Plans keyed by id.
    pub schedule_plans: BTreeMap<String, SchedulePlan>,
    /// Shifts keyed by id.
    pub shifts: BTreeMap<String, Shift>,
    /// Leave requests keyed by id.
    pub leave_requests: BTreeMap<String, LeaveRequest>,
    /// Availability entries.
    pub availability: Vec<Availability>,
}

impl Collections {
    /// Looks up an employee.
    pub fn employee(&self, employee_id: &str) -> EngineResult<&Employee> {
        self.employees
            .get(employee_id)
            .ok_or_else(|| EngineError::EmployeeNotFound {
                employee_id: employee_id.to_string(),
            })
    }

    /// Looks up a plan.
    pub fn plan(&self, plan_id: &str) -> EngineResult<&SchedulePlan> {
        self.schedule_plans
            .get(plan_id)
            .ok_or_else(|| EngineError::PlanNotFound {
                plan_id: plan_id.to_string(),
            })
    }

    /// Looks up a shift.
    pub fn shift(&self, shift_id: &str) -> EngineResult<&Shift> {
        self.shifts
            .get(shift_id)
            .ok_or_else(|| EngineError::ShiftNotFound {
                shift_id: shift_id.to_string(),
            })
    }

    /// The live labor constraints; the engine refuses to run without them.
    pub fn constraints(&self) -> EngineResult<&LaborConstraints> {
        self.labor_constraints
            .as_ref()
            .ok_or(EngineError::MissingLaborConstraints)
    }

    /// Builds a template registry from the `shift_templates` collection.
    pub fn registry(&self) -> EngineResult<TemplateRegistry> {
        TemplateRegistry::new(self.shift_templates.values().cloned())
    }

    /// All shifts owned by a plan, cancelled ones included.
    pub fn shifts_of_plan<'a>(&'a self, plan_id: &'a str) -> impl Iterator<Item = &'a Shift> + 'a {
        self.shifts
            .values()
            .filter(move |s| s.schedule_plan_id == plan_id)
    }

    /// Published plans overlapping `range`.
    pub fn published_plans_overlapping(&self, range: &DateRange) -> Vec<&SchedulePlan> {
        self.schedule_plans
            .values()
            .filter(|p| p.is_published() && p.window.overlaps(range))
            .collect()
    }

    /// The active shifts visible in `range`.
    ///
    /// Without a preview plan these are the shifts of published plans. With
    /// one, that plan's shifts replace the published shifts on the dates of
    /// its window.
    pub fn visible_shifts(&self, range: &DateRange, preview: Option<&SchedulePlan>) -> Vec<Shift> {
        self.shifts
            .values()
            .filter(|s| s.is_active() && range.contains_date(s.date))
            .filter(|s| match preview {
                Some(plan) if plan.window.contains_date(s.date) => {
                    s.schedule_plan_id == plan.id
                }
                _ => self
                    .schedule_plans
                    .get(&s.schedule_plan_id)
                    .is_some_and(SchedulePlan::is_published),
            })
            .cloned()
            .collect()
    }

    /// Approved leave requests overlapping `range`.
    pub fn approved_leave(&self, range: &DateRange) -> Vec<LeaveRequest> {
        self.leave_requests
            .values()
            .filter(|l| l.days_within(range).is_some())
            .cloned()
            .collect()
    }

    /// Availability entries inside `range`.
    pub fn availability_in(&self, range: &DateRange) -> Vec<Availability> {
        self.availability
            .iter()
            .filter(|a| range.contains_date(a.date))
            .cloned()
            .collect()
    }

    /// Checks the write-boundary invariants over the whole collection set.
    pub fn verify_integrity(&self) -> EngineResult<()> {
        check_one_shift_per_day(self.shifts.values())?;

        for shift in self.shifts.values() {
            let plan = self.plan(&shift.schedule_plan_id)?;
            if !plan.window.contains_date(shift.date) {
                return Err(EngineError::ShiftOutsidePlanWindow {
                    shift_id: shift.id.clone(),
                    date: shift.date,
                    plan_id: plan.id.clone(),
                });
            }
        }

        let published: Vec<&SchedulePlan> = self
            .schedule_plans
            .values()
            .filter(|p| p.is_published())
            .collect();
        for (i, plan) in published.iter().enumerate() {
            if let Some(other) = published[i + 1..]
                .iter()
                .find(|other| other.window.overlaps(&plan.window))
            {
                return Err(EngineError::OverlappingPublishedPlan {
                    plan_id: other.id.clone(),
                    published_plan_id: plan.id.clone(),
                });
            }
        }
        Ok(())
    }
}
