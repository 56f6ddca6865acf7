//! Presence checks for report and activity input.
//!
//! Errors are collected rather than returned on the first failure so the
//! form can highlight every missing field at once.

use std::fmt;

use serde::Serialize;
use utoipa::ToSchema;

use super::models::{Activity, ActivityKind, ClientInfo, CompanyInfo, ReportRequest};
use super::traits::Validator;

/// A single failed check with a user-friendly message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ValidationError {
    /// The field that failed validation
    pub field: String,
    pub message: String,
    /// Suggestion for how to fix the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            suggestion: None,
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Create error for empty required field
    pub fn empty_field(field: &str, label: &str) -> Self {
        Self::new(field, format!("{} must not be empty", label))
            .with_suggestion(format!("Please fill in the {}", label.to_lowercase()))
    }

    pub fn no_observation(field: &str) -> Self {
        Self::new(field, "At least one observation (before or after) is required")
            .with_suggestion("Describe the initial state, the final state, or both")
    }

    pub fn no_activities() -> Self {
        Self::new("activities", "The report has no activities")
            .with_suggestion("Add at least one activity before generating the report")
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.field, self.message)?;
        if let Some(ref suggestion) = self.suggestion {
            write!(f, ". {}", suggestion)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// Collection of validation errors with formatted output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    pub fn add(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    /// Merge another collection, prefixing its field paths.
    pub fn extend_prefixed(&mut self, prefix: &str, other: ValidationErrors) {
        for mut error in other.errors {
            error.field = format!("{}.{}", prefix, error.field);
            self.errors.push(error);
        }
    }

    /// Numbered, multi-line summary for display to the user.
    pub fn to_message(&self) -> String {
        if self.errors.is_empty() {
            return String::new();
        }

        let mut parts = vec![format!(
            "Validation failed: {} problem(s) found\n",
            self.errors.len()
        )];

        for (i, error) in self.errors.iter().enumerate() {
            parts.push(format!("{}. {}", i + 1, error));
        }

        parts.push(String::new());
        parts.push("Please complete the form and try again.".to_string());

        parts.join("\n")
    }

    /// Ok if no errors were collected.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_message())
    }
}

impl std::error::Error for ValidationErrors {}

// ============================================================================
// Validation functions
// ============================================================================

/// Validate that a string is not empty after trimming
pub fn validate_required(value: &str, field: &str, label: &str, errors: &mut ValidationErrors) {
    if value.trim().is_empty() {
        errors.add(ValidationError::empty_field(field, label));
    }
}

impl Validator for CompanyInfo {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        validate_required(&self.project_name, "project_name", "Project name", &mut errors);
        validate_required(&self.service_date, "service_date", "Service date", &mut errors);
        validate_required(&self.technician, "technician", "Technician name", &mut errors);
        validate_required(&self.location, "location", "Work location", &mut errors);
        validate_required(&self.objective, "objective", "Report objective", &mut errors);
        validate_required(&self.note, "note", "Safety note", &mut errors);

        errors.into_result()
    }
}

impl Validator for ClientInfo {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        validate_required(&self.name, "name", "Client name", &mut errors);
        validate_required(&self.tax_id, "tax_id", "Tax ID", &mut errors);
        validate_required(&self.address, "address", "Address", &mut errors);

        errors.into_result()
    }
}

impl Validator for Activity {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        validate_required(&self.title, "title", "Activity title", &mut errors);

        match &self.kind {
            ActivityKind::ObservationOnly { observation, .. } => {
                validate_required(observation, "observation", "Observation", &mut errors);
            }
            ActivityKind::BeforeAfter { before, after } => {
                let has_side = [before.as_ref(), after.as_ref()]
                    .into_iter()
                    .flatten()
                    .any(|o| !o.observation.trim().is_empty());
                if !has_side {
                    errors.add(ValidationError::no_observation("observation"));
                }
            }
        }

        errors.into_result()
    }
}

impl Validator for ReportRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if let Err(e) = self.company.validate() {
            errors.extend_prefixed("company", e);
        }
        if let Err(e) = self.client.validate() {
            errors.extend_prefixed("client", e);
        }

        if self.activities.is_empty() {
            errors.add(ValidationError::no_activities());
        }
        for (i, activity) in self.activities.iter().enumerate() {
            if let Err(e) = activity.validate() {
                errors.extend_prefixed(&format!("activities[{}]", i), e);
            }
        }

        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::models::Observation;

    #[test]
    fn test_blank_company_reports_every_field() {
        let err = CompanyInfo::default().validate().unwrap_err();
        assert_eq!(err.len(), 6);
        assert!(err.has_field("technician"));
    }

    #[test]
    fn test_whitespace_counts_as_missing() {
        let client = ClientInfo {
            name: "   ".into(),
            tax_id: "900.000.000-1".into(),
            address: "Km 7".into(),
        };
        let err = client.validate().unwrap_err();
        assert_eq!(err.len(), 1);
        assert!(err.has_field("name"));
    }

    #[test]
    fn test_before_after_requires_one_observation() {
        let activity = Activity::before_after(
            "Pipe Cleaning",
            Some(Observation::new("  ", vec![])),
            None,
        );
        let err = activity.validate().unwrap_err();
        assert!(err.has_field("observation"));

        let activity = Activity::before_after("Pipe Cleaning", None, Some(Observation::new("Clear", vec![])));
        assert!(activity.validate().is_ok());
    }

    #[test]
    fn test_report_request_prefixes_nested_fields() {
        let request = ReportRequest {
            activities: vec![Activity::observation_only("", "ok", vec![])],
            ..Default::default()
        };
        let err = request.validate().unwrap_err();
        assert!(err.has_field("company.project_name"));
        assert!(err.has_field("client.address"));
        assert!(err.has_field("activities[0].title"));
        assert!(!err.has_field("activities"));
    }

    #[test]
    fn test_message_numbers_each_error() {
        let mut errors = ValidationErrors::new();
        errors.add(ValidationError::empty_field("a", "Field A"));
        errors.add(ValidationError::no_activities());

        let message = errors.to_message();
        assert!(message.contains("2 problem(s)"));
        assert!(message.contains("1. [a] Field A must not be empty"));
        assert!(message.contains("2. [activities]"));
    }
}
