//! Plan lifecycle operations.
//!
//! Every function here works on the working copy of a store transaction, so
//! a failure at any step leaves the stored collections untouched.

use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::calculation::{EmployeeSchedule, validate_employee_schedule};
use crate::config::{EngineSettings, PublishPolicy};
use crate::error::{EngineError, EngineResult};
use crate::models::{
    DateRange, PlanStatus, SchedulePlan, Shift, ShiftStatus, Violation, sort_violations,
};
use crate::store::Collections;

/// The result of publishing a plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublishOutcome {
    /// The plan in its published state.
    pub plan: SchedulePlan,
    /// The plan this one replaced, if any.
    pub superseded: Option<String>,
    /// Findings that did not block publishing.
    pub warnings: Vec<Violation>,
}

/// A batch of shift edits applied to a draft plan in one write.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShiftChanges {
    /// New shifts.
    #[serde(default)]
    pub create: Vec<Shift>,
    /// Replacements for existing shifts, matched by id.
    #[serde(default)]
    pub update: Vec<Shift>,
    /// Ids of shifts to delete.
    #[serde(default)]
    pub delete: Vec<String>,
}

/// Counts of what a sync changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncSummary {
    /// Shifts created.
    pub created: usize,
    /// Shifts updated.
    pub updated: usize,
    /// Shifts deleted.
    pub deleted: usize,
}

/// Runs the final validation pass over the employees of a plan.
///
/// The plan's shifts are evaluated in place of the published shifts on the
/// dates of its window.
pub fn validate_plan(
    collections: &Collections,
    plan: &SchedulePlan,
    settings: &EngineSettings,
) -> EngineResult<Vec<Violation>> {
    let constraints = collections.constraints()?;
    let window = plan.window;
    let shifts = collections.visible_shifts(&window, Some(plan));
    let leave = collections.approved_leave(&window);
    let availability = collections.availability_in(&window);
    let options = settings.validation_options();

    let employee_ids: BTreeSet<&str> = shifts.iter().map(|s| s.employee_id.as_str()).collect();
    let mut violations: Vec<Violation> = employee_ids
        .into_iter()
        .flat_map(|employee_id| {
            let schedule = EmployeeSchedule {
                employee_id,
                window,
                shifts: &shifts,
                leave: &leave,
                availability: &availability,
            };
            validate_employee_schedule(&schedule, constraints, &options)
        })
        .collect();
    sort_violations(&mut violations);
    Ok(violations)
}

/// Creates an empty draft plan.
pub fn create_draft(
    collections: &mut Collections,
    plan_id: String,
    window: DateRange,
    at: DateTime<Utc>,
) -> EngineResult<SchedulePlan> {
    window.ensure_supported()?;
    let plan = SchedulePlan::draft(plan_id, window, at);
    collections
        .schedule_plans
        .insert(plan.id.clone(), plan.clone());
    Ok(plan)
}

/// Publishes a draft plan.
///
/// Fails when the plan is not a draft, when another published plan covers
/// any of its dates (other than the plan it supersedes), or when the final
/// validation finds errors and the policy is [`PublishPolicy::Block`]. The
/// superseded plan, if any, changes state in the same write.
pub fn publish(
    collections: &mut Collections,
    plan_id: &str,
    at: DateTime<Utc>,
    settings: &EngineSettings,
) -> EngineResult<PublishOutcome> {
    let draft = collections.plan(plan_id)?.clone();
    let published = draft.publish(at)?;

    let replaced = draft
        .supersedes
        .as_deref()
        .and_then(|id| collections.schedule_plans.get(id))
        .filter(|p| p.is_published())
        .cloned();

    if let Some(conflict) = collections
        .published_plans_overlapping(&draft.window)
        .into_iter()
        .find(|p| Some(p.id.as_str()) != replaced.as_ref().map(|r| r.id.as_str()))
    {
        return Err(EngineError::OverlappingPublishedPlan {
            plan_id: draft.id.clone(),
            published_plan_id: conflict.id.clone(),
        });
    }

    let violations = validate_plan(collections, &draft, settings)?;
    let error_count = violations.iter().filter(|v| v.is_error()).count();
    let warnings = match settings.publish_policy {
        PublishPolicy::Block if error_count > 0 => {
            return Err(EngineError::PublishBlocked {
                plan_id: draft.id.clone(),
                error_count,
            });
        }
        _ => violations,
    };

    let superseded = match replaced {
        Some(old) => {
            let old = old.supersede(&draft.id, at)?;
            let id = old.id.clone();
            collections.schedule_plans.insert(id.clone(), old);
            Some(id)
        }
        None => None,
    };
    collections
        .schedule_plans
        .insert(published.id.clone(), published.clone());

    Ok(PublishOutcome {
        plan: published,
        superseded,
        warnings,
    })
}

/// Applies a batch of shift edits to a draft plan.
///
/// Created and updated shifts are attached to the plan and must name a
/// known employee. Each update and delete must name a shift of this plan.
pub fn sync_shifts(
    collections: &mut Collections,
    plan_id: &str,
    changes: ShiftChanges,
) -> EngineResult<SyncSummary> {
    collections.plan(plan_id)?.ensure_editable()?;
    let mut summary = SyncSummary::default();

    for shift_id in &changes.delete {
        owned_shift(collections, plan_id, shift_id)?;
        collections.shifts.remove(shift_id);
        summary.deleted += 1;
    }

    for mut shift in changes.update {
        shift.validate()?;
        collections.employee(&shift.employee_id)?;
        owned_shift(collections, plan_id, &shift.id)?;
        shift.schedule_plan_id = plan_id.to_string();
        collections.shifts.insert(shift.id.clone(), shift);
        summary.updated += 1;
    }

    for mut shift in changes.create {
        shift.validate()?;
        collections.employee(&shift.employee_id)?;
        if collections.shifts.contains_key(&shift.id) {
            return Err(EngineError::InvalidShift {
                shift_id: shift.id.clone(),
                message: "a shift with this id already exists".to_string(),
            });
        }
        shift.schedule_plan_id = plan_id.to_string();
        collections.shifts.insert(shift.id.clone(), shift);
        summary.created += 1;
    }

    Ok(summary)
}

fn owned_shift<'a>(
    collections: &'a Collections,
    plan_id: &str,
    shift_id: &str,
) -> EngineResult<&'a Shift> {
    let shift = collections.shift(shift_id)?;
    if shift.schedule_plan_id != plan_id {
        return Err(EngineError::InvalidShift {
            shift_id: shift_id.to_string(),
            message: format!("belongs to plan '{}'", shift.schedule_plan_id),
        });
    }
    Ok(shift)
}

/// Cancels one shift of a draft or published plan.
///
/// Cancelling an already cancelled shift is a no-op.
pub fn cancel_shift(collections: &mut Collections, shift_id: &str) -> EngineResult<Shift> {
    let shift = collections.shift(shift_id)?;
    let plan = collections.plan(&shift.schedule_plan_id)?;
    if plan.status() == PlanStatus::Superseded {
        return Err(EngineError::PlanNotEditable {
            plan_id: plan.id.clone(),
            message: "plan has been superseded".to_string(),
        });
    }

    let cancelled = Shift {
        status: ShiftStatus::Cancelled,
        ..shift.clone()
    };
    collections
        .shifts
        .insert(cancelled.id.clone(), cancelled.clone());
    Ok(cancelled)
}

/// Deletes a draft plan and its shifts.
pub fn discard(collections: &mut Collections, plan_id: &str) -> EngineResult<usize> {
    collections.plan(plan_id)?.ensure_editable()?;
    let before = collections.shifts.len();
    collections.shifts.retain(|_, s| s.schedule_plan_id != plan_id);
    collections.schedule_plans.remove(plan_id);
    Ok(before - collections.shifts.len())
}

/// Copies a plan's active shifts into a new draft starting on `target_start`.
///
/// Shift dates move by the distance between the two window starts.
pub fn copy_to(
    collections: &mut Collections,
    source_id: &str,
    new_plan_id: String,
    target_start: NaiveDate,
    at: DateTime<Utc>,
    mut next_shift_id: impl FnMut() -> String,
) -> EngineResult<SchedulePlan> {
    let source = collections.plan(source_id)?.clone();
    let offset = (target_start - source.window.start_date).num_days();

    let mut plan = SchedulePlan::draft(new_plan_id, source.window.shifted_by(offset)?, at);
    plan.copied_from = Some(source.id.clone());

    clone_shifts(collections, &source.id, &plan.id, offset, &mut next_shift_id)?;
    collections
        .schedule_plans
        .insert(plan.id.clone(), plan.clone());
    Ok(plan)
}

/// Starts a new draft that will supersede a published plan when published.
pub fn replan(
    collections: &mut Collections,
    plan_id: &str,
    new_plan_id: String,
    at: DateTime<Utc>,
    mut next_shift_id: impl FnMut() -> String,
) -> EngineResult<SchedulePlan> {
    let plan = collections.plan(plan_id)?.next_draft(new_plan_id, at)?;
    clone_shifts(collections, plan_id, &plan.id, 0, &mut next_shift_id)?;
    collections
        .schedule_plans
        .insert(plan.id.clone(), plan.clone());
    Ok(plan)
}

fn clone_shifts(
    collections: &mut Collections,
    from_plan: &str,
    to_plan: &str,
    day_offset: i64,
    next_shift_id: &mut impl FnMut() -> String,
) -> EngineResult<()> {
    let copies: Vec<Shift> = collections
        .shifts_of_plan(from_plan)
        .filter(|s| s.is_active())
        .map(|s| {
            let date = s
                .date
                .checked_add_signed(chrono::Duration::days(day_offset))
                .ok_or(EngineError::InvalidDateRange {
                    start_date: s.date,
                    end_date: s.date,
                })?;
            Ok(Shift {
                id: next_shift_id(),
                date,
                schedule_plan_id: to_plan.to_string(),
                ..s.clone()
            })
        })
        .collect::<EngineResult<_>>()?;
    for shift in copies {
        collections.shifts.insert(shift.id.clone(), shift);
    }
    Ok(())
}
