//! Schedule service.
//!
//! The entry point used by the HTTP layer. Reads take a snapshot of the
//! store and hand slices to the pure calculators; writes run the lifecycle
//! functions inside one store transaction.

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{NaiveDate, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{EmployeeSchedule, validate_employee_schedule};
use crate::config::{ConfigLoader, EngineSettings, LaborConstraints, ShiftTemplate, TemplateRegistry};
use crate::error::{EngineError, EngineResult};
use crate::models::{
    DateRange, Employee, GridMatrix, MonthPeriod, MonthlyReport, SchedulePlan, Shift, Violation,
};
use crate::store::{Collections, MemoryStore, ScheduleStore};

use super::cancellation::CancellationToken;
use super::grid_builder::{GridFilters, GridSource, build_grid};
use super::monthly_report::{ReportSource, aggregate_month};
use super::plan_lifecycle::{self, PublishOutcome, ShiftChanges, SyncSummary};

/// Builds the initial store contents from loaded configuration.
pub fn seed_collections(config: &ConfigLoader, employees: Vec<Employee>) -> Collections {
    Collections {
        employees: employees.into_iter().map(|e| (e.id.clone(), e)).collect(),
        shift_templates: config
            .templates()
            .iter()
            .map(|t| (t.code.clone(), t.clone()))
            .collect(),
        labor_constraints: Some(config.constraints().clone()),
        ..Collections::default()
    }
}

/// Scheduling operations over a record store.
#[derive(Debug)]
pub struct ScheduleService<S: ScheduleStore> {
    store: Arc<S>,
    settings: Arc<EngineSettings>,
}

impl<S: ScheduleStore> Clone for ScheduleService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            settings: Arc::clone(&self.settings),
        }
    }
}

impl ScheduleService<MemoryStore> {
    /// Creates a service over an in-memory store seeded from configuration.
    pub fn from_config(config: &ConfigLoader, employees: Vec<Employee>) -> Self {
        let store = MemoryStore::new(seed_collections(config, employees));
        Self::new(Arc::new(store), config.settings().clone())
    }
}

impl<S: ScheduleStore> ScheduleService<S> {
    /// Creates a service over `store`.
    pub fn new(store: Arc<S>, settings: EngineSettings) -> Self {
        Self {
            store,
            settings: Arc::new(settings),
        }
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns the engine settings.
    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Looks up a plan.
    pub fn plan(&self, plan_id: &str) -> EngineResult<SchedulePlan> {
        self.store.read(|c| c.plan(plan_id).cloned())
    }

    /// Looks up a shift.
    pub fn shift(&self, shift_id: &str) -> EngineResult<Shift> {
        self.store.read(|c| c.shift(shift_id).cloned())
    }

    /// Validates one employee's schedule over `range`.
    ///
    /// Uses the published shifts, or the given plan's shifts in their place
    /// on the dates the plan covers. An empty list means compliant.
    pub fn validate_schedule(
        &self,
        employee_id: &str,
        range: DateRange,
        plan_id: Option<&str>,
    ) -> EngineResult<Vec<Violation>> {
        range.ensure_supported()?;
        self.store.read(|c| -> EngineResult<_> {
            c.employee(employee_id)?;
            let constraints = c.constraints()?;
            let preview = plan_id.map(|id| c.plan(id)).transpose()?;

            let shifts = c.visible_shifts(&range, preview);
            let leave = c.approved_leave(&range);
            let availability = c.availability_in(&range);
            let schedule = EmployeeSchedule {
                employee_id,
                window: range,
                shifts: &shifts,
                leave: &leave,
                availability: &availability,
            };
            Ok(validate_employee_schedule(
                &schedule,
                constraints,
                &self.settings.validation_options(),
            ))
        })
    }

    /// Builds the schedule grid for `range`.
    pub fn build_grid(
        &self,
        range: DateRange,
        filters: &GridFilters,
        plan_id: Option<&str>,
    ) -> EngineResult<GridMatrix> {
        range.ensure_supported()?;
        self.store.read(|c| -> EngineResult<_> {
            let constraints = c.constraints()?;
            let registry = c.registry()?;
            let preview = plan_id.map(|id| c.plan(id)).transpose()?;

            let employees: Vec<Employee> = c.employees.values().cloned().collect();
            let shifts = c.visible_shifts(&range, preview);
            let leave = c.approved_leave(&range);
            let availability = c.availability_in(&range);
            let source = GridSource {
                range,
                employees: &employees,
                shifts: &shifts,
                leave: &leave,
                availability: &availability,
            };
            Ok(build_grid(
                &source,
                filters,
                &registry,
                constraints,
                &self.settings,
            ))
        })
    }

    /// Builds the monthly report, bounded by the configured deadline.
    pub fn monthly_report(&self, year: i32, month: u32) -> EngineResult<MonthlyReport> {
        let token = match self.settings.report_deadline_ms {
            Some(ms) => CancellationToken::with_timeout(Duration::from_millis(ms)),
            None => CancellationToken::new(),
        };
        self.monthly_report_with_token(year, month, &token)
    }

    /// Builds the monthly report, aborting once `token` fires.
    pub fn monthly_report_with_token(
        &self,
        year: i32,
        month: u32,
        token: &CancellationToken,
    ) -> EngineResult<MonthlyReport> {
        let period = MonthPeriod::new(year, month)?;
        let range = period.range();

        let (employees, shifts, leave, registry, constraints) = self.store.read(|c| {
            Ok::<_, EngineError>((
                c.employees.values().cloned().collect::<Vec<_>>(),
                c.visible_shifts(&range, None),
                c.approved_leave(&range),
                c.registry()?,
                c.constraints()?.clone(),
            ))
        })?;

        let start_time = Instant::now();
        let source = ReportSource {
            period,
            employees: &employees,
            shifts: &shifts,
            leave: &leave,
        };
        let report = aggregate_month(&source, &registry, &constraints, token)?;
        info!(
            year,
            month,
            employees = report.employees.len(),
            omissions = report.omissions.len(),
            duration_us = start_time.elapsed().as_micros(),
            "Monthly report built"
        );
        Ok(report)
    }

    /// Creates an empty draft plan for `window`.
    pub fn create_plan(&self, window: DateRange) -> EngineResult<SchedulePlan> {
        let plan = self.store.transaction(|c| {
            plan_lifecycle::create_draft(c, new_id("plan"), window, Utc::now())
        })?;
        info!(plan_id = %plan.id, start = %window.start_date, end = %window.end_date, "Draft plan created");
        Ok(plan)
    }

    /// Publishes a draft plan.
    pub fn publish_plan(&self, plan_id: &str) -> EngineResult<PublishOutcome> {
        let result = self
            .store
            .transaction(|c| plan_lifecycle::publish(c, plan_id, Utc::now(), &self.settings));
        match &result {
            Ok(outcome) => info!(
                plan_id,
                superseded = ?outcome.superseded,
                warnings = outcome.warnings.len(),
                "Plan published"
            ),
            Err(err) => warn!(plan_id, error = %err, "Publish rejected"),
        }
        result
    }

    /// Applies a batch of shift edits to a draft plan, all or nothing.
    pub fn sync_plan_shifts(
        &self,
        plan_id: &str,
        changes: ShiftChanges,
    ) -> EngineResult<SyncSummary> {
        let summary = self
            .store
            .transaction(|c| plan_lifecycle::sync_shifts(c, plan_id, changes))?;
        info!(
            plan_id,
            created = summary.created,
            updated = summary.updated,
            deleted = summary.deleted,
            "Plan shifts synced"
        );
        Ok(summary)
    }

    /// Cancels one shift.
    pub fn cancel_shift(&self, shift_id: &str) -> EngineResult<Shift> {
        let shift = self
            .store
            .transaction(|c| plan_lifecycle::cancel_shift(c, shift_id))?;
        info!(shift_id, plan_id = %shift.schedule_plan_id, "Shift cancelled");
        Ok(shift)
    }

    /// Deletes a draft plan and its shifts. Returns the number of shifts removed.
    pub fn discard_plan(&self, plan_id: &str) -> EngineResult<usize> {
        let removed = self
            .store
            .transaction(|c| plan_lifecycle::discard(c, plan_id))?;
        info!(plan_id, shifts_removed = removed, "Draft plan discarded");
        Ok(removed)
    }

    /// Copies a plan's shifts into a new draft starting on `target_start`.
    pub fn copy_plan(&self, plan_id: &str, target_start: NaiveDate) -> EngineResult<SchedulePlan> {
        let plan = self.store.transaction(|c| {
            plan_lifecycle::copy_to(
                c,
                plan_id,
                new_id("plan"),
                target_start,
                Utc::now(),
                || new_id("shift"),
            )
        })?;
        info!(source_plan_id = plan_id, plan_id = %plan.id, "Plan copied");
        Ok(plan)
    }

    /// Starts a draft that supersedes a published plan once published.
    pub fn replan(&self, plan_id: &str) -> EngineResult<SchedulePlan> {
        let plan = self.store.transaction(|c| {
            plan_lifecycle::replan(c, plan_id, new_id("plan"), Utc::now(), || new_id("shift"))
        })?;
        info!(supersedes = plan_id, plan_id = %plan.id, version = plan.version, "Re-plan draft created");
        Ok(plan)
    }

    /// Replaces the live labor constraints.
    pub fn set_labor_constraints(&self, constraints: LaborConstraints) -> EngineResult<()> {
        constraints.validate()?;
        self.store.transaction(|c| {
            c.labor_constraints = Some(constraints);
            Ok(())
        })?;
        info!("Labor constraints replaced");
        Ok(())
    }

    /// Inserts or replaces one shift template.
    ///
    /// Existing shifts keep their stored times.
    pub fn upsert_shift_template(&self, code: &str, template: ShiftTemplate) -> EngineResult<()> {
        if template.code != code {
            return Err(EngineError::InvalidConfiguration {
                field: "code".to_string(),
                message: format!("template code '{}' does not match '{code}'", template.code),
            });
        }
        template.validate()?;
        self.store.transaction(|c| {
            c.shift_templates.insert(template.code.clone(), template);
            TemplateRegistry::new(c.shift_templates.values().cloned())?;
            Ok(())
        })?;
        info!(code, "Shift template saved");
        Ok(())
    }
}

fn new_id(prefix: &str) -> String {
    format!("{prefix}_{}", Uuid::new_v4().simple())
}
