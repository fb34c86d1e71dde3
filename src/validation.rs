//! Input validation for assignment instances.
//!
//! Checks structural integrity of an instance before an engine run.
//! Malformed input is fatal: the engine aborts before committing any
//! assignment. Detects:
//! - Empty or truncated instances (no resources, no tasks)
//! - Non-positive horizons
//! - Negative demand, capacity, or service times
//! - Inverted time windows (deadline before release)
//! - Ids that do not match their arena index

use std::fmt;

use crate::models::Instance;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// The instance has no resources or no tasks.
    EmptyInstance,
    /// The horizon is zero or negative.
    NonPositiveHorizon,
    /// A task declares negative demand or a negative service time.
    InvalidDemand,
    /// A resource declares negative capacity or non-positive efficiency.
    InvalidCapacity,
    /// A task's deadline precedes its release time.
    InvertedWindow,
    /// An entity's id does not match its position in the arena.
    IdMismatch,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

/// Validates an instance before solving.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_instance(instance: &Instance) -> ValidationResult {
    let mut errors = Vec::new();

    if instance.horizon_ms <= 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::NonPositiveHorizon,
            format!("Horizon must be positive, got {}", instance.horizon_ms),
        ));
    }
    if instance.resources.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyInstance,
            "Instance has no resources",
        ));
    }
    if instance.tasks.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyInstance,
            "Instance has no tasks",
        ));
    }

    for (i, r) in instance.resources.iter().enumerate() {
        if r.id.0 != i {
            errors.push(ValidationError::new(
                ValidationErrorKind::IdMismatch,
                format!("Resource {} stored at index {i}", r.id),
            ));
        }
        if r.capacity.is_some_and(|c| c < 0) || r.used < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidCapacity,
                format!("Resource {} has negative capacity", r.id),
            ));
        }
        if r.efficiency <= 0.0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidCapacity,
                format!("Resource {} has non-positive efficiency", r.id),
            ));
        }
    }

    for (i, t) in instance.tasks.iter().enumerate() {
        if t.id.0 != i {
            errors.push(ValidationError::new(
                ValidationErrorKind::IdMismatch,
                format!("Task {} stored at index {i}", t.id),
            ));
        }
        if t.demand < 0 || t.remaining < 0 || t.remaining > t.demand {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidDemand,
                format!(
                    "Task {} has invalid demand: {} remaining of {}",
                    t.id, t.remaining, t.demand
                ),
            ));
        }
        if t.lead_time_ms < 0 || t.unit_time_ms < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidDemand,
                format!("Task {} has negative service times", t.id),
            ));
        }
        if let (Some(release), Some(deadline)) = (t.release_ms, t.deadline_ms) {
            if deadline < release {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvertedWindow,
                    format!(
                        "Task {} deadline {deadline} precedes release {release}",
                        t.id
                    ),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Resource, ResourceId, Task, TaskId};

    fn valid_instance() -> Instance {
        let mut inst = Instance::new(1_000);
        inst.add_resource(|id| Resource::new(id).with_capacity(5));
        inst.add_task(|id| Task::new(id, 3));
        inst
    }

    fn kinds(result: ValidationResult) -> Vec<ValidationErrorKind> {
        result.unwrap_err().into_iter().map(|e| e.kind).collect()
    }

    #[test]
    fn test_valid_instance_passes() {
        assert!(validate_instance(&valid_instance()).is_ok());
    }

    #[test]
    fn test_empty_instance() {
        let inst = Instance::new(100);
        let kinds = kinds(validate_instance(&inst));
        assert_eq!(
            kinds,
            vec![
                ValidationErrorKind::EmptyInstance,
                ValidationErrorKind::EmptyInstance
            ]
        );
    }

    #[test]
    fn test_non_positive_horizon() {
        let mut inst = valid_instance();
        inst.horizon_ms = 0;
        assert!(kinds(validate_instance(&inst))
            .contains(&ValidationErrorKind::NonPositiveHorizon));
    }

    #[test]
    fn test_negative_demand() {
        let mut inst = valid_instance();
        inst.tasks[0].remaining = -1;
        assert!(kinds(validate_instance(&inst)).contains(&ValidationErrorKind::InvalidDemand));
    }

    #[test]
    fn test_negative_capacity() {
        let mut inst = valid_instance();
        inst.resources[0].capacity = Some(-2);
        assert!(kinds(validate_instance(&inst)).contains(&ValidationErrorKind::InvalidCapacity));
    }

    #[test]
    fn test_zero_efficiency() {
        let mut inst = valid_instance();
        inst.resources[0].efficiency = 0.0;
        assert!(kinds(validate_instance(&inst)).contains(&ValidationErrorKind::InvalidCapacity));
    }

    #[test]
    fn test_inverted_window() {
        let mut inst = valid_instance();
        inst.tasks[0].release_ms = Some(500);
        inst.tasks[0].deadline_ms = Some(200);
        assert!(kinds(validate_instance(&inst)).contains(&ValidationErrorKind::InvertedWindow));
    }

    #[test]
    fn test_id_mismatch() {
        let mut inst = valid_instance();
        inst.tasks[0].id = TaskId(7);
        inst.resources[0].id = ResourceId(9);
        let kinds = kinds(validate_instance(&inst));
        assert_eq!(
            kinds.iter()
                .filter(|k| **k == ValidationErrorKind::IdMismatch)
                .count(),
            2
        );
    }

    #[test]
    fn test_all_errors_reported_together() {
        let mut inst = Instance::new(-5);
        inst.add_task(|id| Task::new(id, -3));
        let errors = validate_instance(&inst).unwrap_err();
        assert!(errors.len() >= 3);
    }
}
