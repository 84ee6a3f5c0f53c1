//! Configuration loading and management for the roster engine.
//!
//! This module provides functionality to load labor constraints, shift
//! templates and engine settings from YAML files, and the template registry
//! used to resolve shift codes.
//!
//! # Example
//!
//! ```no_run
//! use roster_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Templates: {}", config.templates().len());
//! ```

mod loader;
mod registry;
mod types;

pub use loader::ConfigLoader;
pub use registry::TemplateRegistry;
pub use types::{
    DepartmentConfig, EngineConfig, EngineSettings, LaborConstraints, PublishPolicy,
    ShiftCategory, ShiftTemplate, UNKNOWN_DEPARTMENT_ORDER,
};
