//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading engine
//! configuration from YAML files.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{EngineError, EngineResult};
use crate::models::Employee;

use super::registry::TemplateRegistry;
use super::types::{EngineConfig, EngineSettings, LaborConstraints, ShiftTemplate};

/// Shape of shift_templates.yaml.
#[derive(Debug, Deserialize)]
struct TemplatesFile {
    templates: Vec<ShiftTemplate>,
}

/// Shape of employees.yaml.
#[derive(Debug, Deserialize)]
struct EmployeesFile {
    employees: Vec<Employee>,
}

/// Loads and provides access to engine configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── labor_constraints.yaml  # LaborConstraints
/// ├── shift_templates.yaml    # Shift templates
/// ├── engine.yaml             # Engine settings
/// └── employees.yaml          # Optional seed roster
/// ```
///
/// # Example
///
/// ```no_run
/// use roster_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// println!("Max weekly hours: {}", loader.constraints().max_weekly_hours);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if any required file is missing (`ConfigNotFound`),
    /// contains invalid YAML (`ConfigParseError`) or holds values that fail
    /// validation (`InvalidConfiguration`).
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let constraints = Self::load_yaml::<LaborConstraints>(&path.join("labor_constraints.yaml"))?;
        constraints.validate()?;

        let templates = Self::load_yaml::<TemplatesFile>(&path.join("shift_templates.yaml"))?.templates;
        // Validates every template and rejects duplicate codes.
        TemplateRegistry::new(templates.iter().cloned())?;

        let settings = Self::load_yaml::<EngineSettings>(&path.join("engine.yaml"))?;

        Ok(Self {
            config: EngineConfig::new(constraints, templates, settings),
        })
    }

    /// Loads the optional seed roster from `employees.yaml`.
    ///
    /// A missing file yields an empty roster.
    pub fn load_employees<P: AsRef<Path>>(path: P) -> EngineResult<Vec<Employee>> {
        let file = path.as_ref().join("employees.yaml");
        if !file.exists() {
            return Ok(Vec::new());
        }
        Ok(Self::load_yaml::<EmployeesFile>(&file)?.employees)
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the labor constraints.
    pub fn constraints(&self) -> &LaborConstraints {
        self.config.constraints()
    }

    /// Returns the shift templates.
    pub fn templates(&self) -> &[ShiftTemplate] {
        self.config.templates()
    }

    /// Returns the engine settings.
    pub fn settings(&self) -> &EngineSettings {
        self.config.settings()
    }

    /// Builds a template registry from the loaded templates.
    pub fn registry(&self) -> EngineResult<TemplateRegistry> {
        TemplateRegistry::new(self.config.templates().iter().cloned())
    }
}
