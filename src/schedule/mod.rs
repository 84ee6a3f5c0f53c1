//! Scheduling operations built on the pure calculators.
//!
//! - [`grid_builder`] turns shifts, leave and availability into the
//!   employee × date matrix with totals and compliance flags
//! - [`plan_lifecycle`] creates, edits and publishes schedule plans
//! - [`monthly_report`] aggregates published hours and cost per month
//! - [`service`] wires these to a [`ScheduleStore`](crate::store::ScheduleStore)

mod cancellation;
pub mod grid_builder;
pub mod monthly_report;
pub mod plan_lifecycle;
pub mod service;

pub use cancellation::CancellationToken;
pub use grid_builder::{GridFilters, GridSource, build_grid};
pub use monthly_report::{ReportSource, aggregate_month};
pub use plan_lifecycle::{PublishOutcome, ShiftChanges, SyncSummary};
pub use service::{ScheduleService, seed_collections};
