//! Shift template registry.
//!
//! Resolves template codes to their definitions. The registry is built from
//! the live `shift_templates` collection for each request; it holds no state
//! of its own.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::error::{EngineError, EngineResult};
use crate::models::{Shift, ShiftStatus};

use super::types::{ShiftCategory, ShiftTemplate};

/// Lookup table of shift templates keyed by code.
#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    templates: BTreeMap<String, ShiftTemplate>,
}

impl TemplateRegistry {
    /// Builds a registry, validating every template.
    ///
    /// Fails with `InvalidConfiguration` on an invalid template or a
    /// duplicated code.
    pub fn new<I>(templates: I) -> EngineResult<Self>
    where
        I: IntoIterator<Item = ShiftTemplate>,
    {
        let mut map = BTreeMap::new();
        for template in templates {
            template.validate()?;
            if map.contains_key(&template.code) {
                return Err(EngineError::InvalidConfiguration {
                    field: format!("shift_templates.{}", template.code),
                    message: "duplicate template code".to_string(),
                });
            }
            map.insert(template.code.clone(), template);
        }
        Ok(Self { templates: map })
    }

    /// Resolves a template by code.
    ///
    /// # Example
    ///
    /// ```
    /// use roster_engine::config::{ShiftCategory, ShiftTemplate, TemplateRegistry};
    /// use chrono::NaiveTime;
    ///
    /// let registry = TemplateRegistry::new([ShiftTemplate {
    ///     code: "M".to_string(),
    ///     label: "Morning".to_string(),
    ///     category: ShiftCategory::Morning,
    ///     start: NaiveTime::from_hms_opt(10, 30, 0).unwrap(),
    ///     end: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
    ///     break_minutes: 30,
    ///     second_start: None,
    ///     second_end: None,
    /// }])
    /// .unwrap();
    ///
    /// assert_eq!(registry.resolve("M").unwrap().label, "Morning");
    /// assert!(registry.resolve("X").is_err());
    /// ```
    pub fn resolve(&self, code: &str) -> EngineResult<&ShiftTemplate> {
        self.templates
            .get(code)
            .ok_or_else(|| EngineError::TemplateNotFound {
                code: code.to_string(),
            })
    }

    /// Category of a template, or `None` for unknown codes.
    pub fn category(&self, code: &str) -> Option<ShiftCategory> {
        self.templates.get(code).map(|t| t.category)
    }

    /// Category of a shift; ad-hoc shifts and unknown codes have none.
    pub fn category_of(&self, shift: &Shift) -> Option<ShiftCategory> {
        shift.shift_type.as_deref().and_then(|code| self.category(code))
    }

    /// Iterates over the templates in code order.
    pub fn templates(&self) -> impl Iterator<Item = &ShiftTemplate> {
        self.templates.values()
    }

    /// Number of templates.
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Returns true when no template is registered.
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Creates a shift by copying a template's resolved times.
    ///
    /// The shift keeps the times, not a reference to the template, so later
    /// template edits do not change it.
    pub fn instantiate(
        &self,
        code: &str,
        shift_id: impl Into<String>,
        employee_id: impl Into<String>,
        date: NaiveDate,
        plan_id: impl Into<String>,
    ) -> EngineResult<Shift> {
        let template = self.resolve(code)?;
        Ok(Shift {
            id: shift_id.into(),
            employee_id: employee_id.into(),
            date,
            shift_type: Some(template.code.clone()),
            start_time: template.start,
            end_time: template.end,
            break_duration_minutes: template.break_minutes,
            second_start_time: template.second_start,
            second_end_time: template.second_end,
            is_day_off: template.is_day_off(),
            schedule_plan_id: plan_id.into(),
            status: ShiftStatus::Active,
            notes: None,
        })
    }
}
