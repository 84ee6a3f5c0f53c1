//! Shift scheduling and labor-compliance engine.
//!
//! This crate computes shift durations (including overnight and split
//! shifts), validates employee schedules against configurable labor
//! constraints, builds the employee × date schedule grid, manages the
//! draft/published lifecycle of schedule plans and aggregates monthly
//! hours and labor cost.
//!
//! Non-compliance is reported as data ([`models::Violation`]), never as an
//! error. Errors ([`error::EngineError`]) are reserved for rejected writes,
//! unknown records, bad input and configuration problems.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod schedule;
pub mod store;
