//! Traits for validation and document generation.

use super::validation::ValidationErrors;
use super::{GeneratedReport, ReportError};

/// Trait for validating request objects.
pub trait Validator {
    /// Validate the state of the object.
    fn validate(&self) -> Result<(), ValidationErrors>;
}

/// Trait for document generators.
pub trait Generator<Req> {
    /// Generate a document from the request.
    fn generate(&self, request: Req) -> Result<GeneratedReport, ReportError>;
}
