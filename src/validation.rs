//! Input validation for timeline data.
//!
//! Layout never requires clean data: every problem below is recovered by
//! omission during layout. These checks let a host surface data-quality
//! issues instead. Detects:
//! - Duplicate resource or task IDs
//! - Tasks assigned to unknown resources
//! - Shift or lunch text that does not parse as `H:MM AM|PM`
//! - Coordinates that are non-finite or out of range
//! - Task start or finish text that does not parse as a date

use std::collections::HashSet;

use crate::clock::{parse_clock_time, LayoutContext};
use crate::models::{ResourceRow, Task};

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
    /// Two rows or two tasks share the same ID.
    DuplicateId,
    /// A task's `employeeId` names no resource.
    UnknownResource,
    /// Shift or lunch text is present but unparseable.
    InvalidTime,
    /// A coordinate is non-finite or outside its range.
    InvalidCoordinate,
    /// A task date is present but unparseable.
    InvalidDate,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates resources and tasks.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(resources: &[ResourceRow], tasks: &[Task], ctx: &LayoutContext) -> ValidationResult {
    let mut errors = Vec::new();

    let mut resource_ids = HashSet::new();
    for r in resources {
        if !resource_ids.insert(r.resource_id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate resource ID: {}", r.resource_id),
            ));
        }

        for (field, value) in [
            ("shiftStart", &r.shift_start),
            ("shiftEnd", &r.shift_end),
            ("lunchStart", &r.lunch_start),
            ("lunchEnd", &r.lunch_end),
        ] {
            if let Some(text) = value.as_deref().filter(|t| !t.trim().is_empty()) {
                if parse_clock_time(Some(text)).is_none() {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::InvalidTime,
                        format!("Resource '{}' has unparseable {field}: '{text}'", r.resource_id),
                    ));
                }
            }
        }

        check_coordinates(&r.resource_id, "home", r.home_lat, r.home_lng, &mut errors);
    }

    let mut task_ids = HashSet::new();
    for task in tasks {
        if !task_ids.insert(task.task_id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate task ID: {}", task.task_id),
            ));
        }

        if !resource_ids.contains(task.employee_id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownResource,
                format!(
                    "Task '{}' references unknown resource '{}'",
                    task.task_id, task.employee_id
                ),
            ));
        }

        for (field, value) in [("start", task.start_field()), ("finish", task.finish_field())] {
            if let Some(text) = value {
                if ctx.parse_instant(text).is_none() {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::InvalidDate,
                        format!("Task '{}' has unparseable {field} date: '{text}'", task.task_id),
                    ));
                }
            }
        }

        check_coordinates(&task.task_id, "site", task.lat, task.lng, &mut errors);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_coordinates(
    owner: &str,
    what: &str,
    lat: Option<f64>,
    lng: Option<f64>,
    errors: &mut Vec<ValidationError>,
) {
    let lat_ok = lat.map_or(true, |v| v.is_finite() && (-90.0..=90.0).contains(&v));
    let lng_ok = lng.map_or(true, |v| v.is_finite() && (-180.0..=180.0).contains(&v));
    if !(lat_ok && lng_ok) {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidCoordinate,
            format!("'{owner}' has invalid {what} coordinates: ({lat:?}, {lng:?})"),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> LayoutContext {
        // 2024-05-01T09:30:00Z
        LayoutContext::at_time(1_714_555_800_000)
    }

    fn sample_resources() -> Vec<ResourceRow> {
        vec![
            ResourceRow::new("R1")
                .with_shift("6:00 AM", "2:00 PM")
                .with_lunch("11:30 AM", "12:00 PM")
                .with_home(51.5, -0.12),
            ResourceRow::new("R2").with_shift("10:00 PM", "6:00 AM"),
        ]
    }

    fn sample_tasks() -> Vec<Task> {
        vec![
            Task::new("T1", "R1")
                .with_expected_start("2024-05-01T07:00:00")
                .with_expected_finish("2024-05-01T08:00:00")
                .with_location(51.51, -0.13),
            Task::new("T2", "R2").with_expected_start("1714555800000"),
            Task::new("T3", "R2"),
        ]
    }

    #[test]
    fn test_valid_input() {
        assert!(validate_input(&sample_resources(), &sample_tasks(), &ctx()).is_ok());
    }

    #[test]
    fn test_duplicate_ids() {
        let mut resources = sample_resources();
        resources.push(ResourceRow::new("R1"));
        let mut tasks = sample_tasks();
        tasks.push(Task::new("T1", "R2"));

        let errors = validate_input(&resources, &tasks, &ctx()).unwrap_err();
        let dups: Vec<_> = errors
            .iter()
            .filter(|e| e.kind == ValidationErrorKind::DuplicateId)
            .collect();
        assert_eq!(dups.len(), 2);
        assert!(dups.iter().any(|e| e.message.contains("resource")));
        assert!(dups.iter().any(|e| e.message.contains("task")));
    }

    #[test]
    fn test_unknown_resource() {
        let tasks = vec![Task::new("T1", "NOBODY")];
        let errors = validate_input(&sample_resources(), &tasks, &ctx()).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::UnknownResource);
    }

    #[test]
    fn test_invalid_times() {
        let resources = vec![
            ResourceRow::new("R1").with_shift("6 AM", "2:00 PM"),
            ResourceRow::new("R2").with_lunch("noon", "13:00"),
            // blank text means "no schedule", not an error
            ResourceRow::new("R3").with_shift("", ""),
        ];
        let errors = validate_input(&resources, &[], &ctx()).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.iter().all(|e| e.kind == ValidationErrorKind::InvalidTime));
        assert!(errors[0].message.contains("shiftStart"));
    }

    #[test]
    fn test_invalid_coordinates() {
        let resources = vec![ResourceRow::new("R1").with_home(91.0, 0.0)];
        let tasks = vec![
            Task::new("T1", "R1").with_location(0.0, f64::NAN),
            Task::new("T2", "R1").with_location(-45.0, 179.5),
        ];
        let errors = validate_input(&resources, &tasks, &ctx()).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().all(|e| e.kind == ValidationErrorKind::InvalidCoordinate));
    }

    #[test]
    fn test_invalid_dates() {
        let tasks = vec![
            Task::new("T1", "R1").with_expected_start("tomorrow morning"),
            Task::new("T2", "R1")
                .with_expected_start("2024-05-01 07:00")
                .with_expected_finish("2024-13-45"),
        ];
        let errors = validate_input(&sample_resources(), &tasks, &ctx()).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().all(|e| e.kind == ValidationErrorKind::InvalidDate));
        assert!(errors[1].message.contains("finish"));
    }

    #[test]
    fn test_multiple_errors_collected() {
        let resources = vec![ResourceRow::new("R1").with_shift("late", "later")];
        let tasks = vec![Task::new("T1", "R9").with_expected_start("??")];
        let errors = validate_input(&resources, &tasks, &ctx()).unwrap_err();
        assert_eq!(errors.len(), 4);
    }
}
