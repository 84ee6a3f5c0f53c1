//! Schedule plan model and its state machine.
//!
//! A plan owns the shifts of one planning window. Its state is a tagged
//! enum and every transition returns a new plan value; the stored plan is
//! only replaced when the whole surrounding write commits.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::DateRange;

/// The state of a schedule plan.
///
/// ```text
/// draft ──publish──▶ published ──(newer draft published)──▶ superseded
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PlanState {
    /// Editable scratch space; invisible to payroll and staff rosters.
    Draft,
    /// Live schedule; its shifts count.
    Published {
        /// When the plan was published.
        published_at: DateTime<Utc>,
    },
    /// A published plan replaced by a newer version of the same window.
    Superseded {
        /// When the plan was originally published.
        published_at: DateTime<Utc>,
        /// When the replacement was published.
        superseded_at: DateTime<Utc>,
        /// The plan that replaced this one.
        superseded_by: String,
    },
}

/// Plain status label for a plan, without transition data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanStatus {
    /// See [`PlanState::Draft`].
    Draft,
    /// See [`PlanState::Published`].
    Published,
    /// See [`PlanState::Superseded`].
    Superseded,
}

/// A batch of shifts for one planning window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulePlan {
    /// Unique identifier for the plan.
    pub id: String,
    /// The days the plan covers, normally one ISO week.
    pub window: DateRange,
    /// Increases by one for each re-plan of the same window.
    pub version: u32,
    /// The published plan this draft will replace when published.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supersedes: Option<String>,
    /// The plan this one was copied from, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copied_from: Option<String>,
    /// When the plan was created.
    pub created_at: DateTime<Utc>,
    /// Current lifecycle state.
    pub state: PlanState,
}

impl SchedulePlan {
    /// Creates a new draft plan for a window.
    pub fn draft(id: impl Into<String>, window: DateRange, created_at: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            window,
            version: 1,
            supersedes: None,
            copied_from: None,
            created_at,
            state: PlanState::Draft,
        }
    }

    /// Returns the plain status label.
    pub fn status(&self) -> PlanStatus {
        match self.state {
            PlanState::Draft => PlanStatus::Draft,
            PlanState::Published { .. } => PlanStatus::Published,
            PlanState::Superseded { .. } => PlanStatus::Superseded,
        }
    }

    /// Returns true while the plan is an editable draft.
    pub fn is_draft(&self) -> bool {
        self.state == PlanState::Draft
    }

    /// Returns true if the plan's shifts currently count toward payroll.
    pub fn is_published(&self) -> bool {
        matches!(self.state, PlanState::Published { .. })
    }

    /// When the plan was published, if it ever was.
    pub fn published_at(&self) -> Option<DateTime<Utc>> {
        match &self.state {
            PlanState::Draft => None,
            PlanState::Published { published_at } | PlanState::Superseded { published_at, .. } => {
                Some(*published_at)
            }
        }
    }

    /// Fails unless the plan is still a draft.
    pub fn ensure_editable(&self) -> EngineResult<()> {
        if self.is_draft() {
            Ok(())
        } else {
            Err(EngineError::PlanNotEditable {
                plan_id: self.id.clone(),
                message: format!("plan is {:?}; create a new draft to re-plan", self.status())
                    .to_lowercase(),
            })
        }
    }

    /// Transitions a draft to published, returning the new plan value.
    ///
    /// # Example
    ///
    /// ```
    /// use roster_engine::models::{DateRange, PlanStatus, SchedulePlan};
    /// use chrono::{NaiveDate, Utc};
    ///
    /// let window = DateRange::iso_week_of(NaiveDate::from_ymd_opt(2026, 2, 10).unwrap());
    /// let draft = SchedulePlan::draft("plan_001", window, Utc::now());
    ///
    /// let published = draft.publish(Utc::now()).unwrap();
    /// assert_eq!(published.status(), PlanStatus::Published);
    /// assert_eq!(draft.status(), PlanStatus::Draft); // the original value is untouched
    /// assert!(published.publish(Utc::now()).is_err());
    /// ```
    pub fn publish(&self, at: DateTime<Utc>) -> EngineResult<SchedulePlan> {
        if !self.is_draft() {
            return Err(EngineError::PlanAlreadyPublished {
                plan_id: self.id.clone(),
            });
        }
        Ok(SchedulePlan {
            state: PlanState::Published { published_at: at },
            ..self.clone()
        })
    }

    /// Transitions a published plan to superseded by `successor_id`.
    pub fn supersede(&self, successor_id: &str, at: DateTime<Utc>) -> EngineResult<SchedulePlan> {
        match &self.state {
            PlanState::Published { published_at } => Ok(SchedulePlan {
                state: PlanState::Superseded {
                    published_at: *published_at,
                    superseded_at: at,
                    superseded_by: successor_id.to_string(),
                },
                ..self.clone()
            }),
            _ => Err(EngineError::PlanNotEditable {
                plan_id: self.id.clone(),
                message: "only a published plan can be superseded".to_string(),
            }),
        }
    }

    /// Starts a new draft that will replace this published plan.
    pub fn next_draft(
        &self,
        new_id: impl Into<String>,
        at: DateTime<Utc>,
    ) -> EngineResult<SchedulePlan> {
        if !self.is_published() {
            return Err(EngineError::PlanNotEditable {
                plan_id: self.id.clone(),
                message: "only a published plan can be re-planned".to_string(),
            });
        }
        Ok(SchedulePlan {
            id: new_id.into(),
            window: self.window,
            version: self.version + 1,
            supersedes: Some(self.id.clone()),
            copied_from: None,
            created_at: at,
            state: PlanState::Draft,
        })
    }
}
