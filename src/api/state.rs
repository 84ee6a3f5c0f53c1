//! Application state for the roster engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::schedule::ScheduleService;
use crate::store::MemoryStore;

/// Shared application state.
///
/// Holds the schedule service, which owns the record store and the
/// engine settings.
#[derive(Clone)]
pub struct AppState {
    service: Arc<ScheduleService<MemoryStore>>,
}

impl AppState {
    /// Creates a new application state around a service.
    pub fn new(service: ScheduleService<MemoryStore>) -> Self {
        Self {
            service: Arc::new(service),
        }
    }

    /// Returns a reference to the schedule service.
    pub fn service(&self) -> &ScheduleService<MemoryStore> {
        &self.service
    }

    /// Returns a shared handle to the service for blocking tasks.
    pub fn shared_service(&self) -> Arc<ScheduleService<MemoryStore>> {
        Arc::clone(&self.service)
    }
}
