//! Report module - business logic for building maintenance service reports.
//!
//! - `store` - ordered per-session activity list
//! - `assembler` - walks the fixed report layout and builds a document model
//! - `render` - writes the document model out as DOCX

pub mod assembler;
pub mod common;
pub mod document;
pub mod generator;
pub mod images;
pub mod layout;
pub mod models;
pub mod render;
pub mod store;
pub mod traits;
pub mod validation;

pub use assembler::{assemble, assemble_on, Letterhead};
pub use generator::ServiceReportGenerator;
pub use models::{Activity, ActivityKind, ClientInfo, CompanyInfo, ImageData, Observation, ReportRequest};
pub use store::{ActivityStore, StoreError};
pub use traits::{Generator, Validator};
pub use validation::{ValidationError, ValidationErrors};

use chrono::NaiveDate;
use thiserror::Error;

/// Errors that can occur during report generation.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("{0}")]
    Validation(ValidationErrors),
    #[error("activity '{title}' has neither a before nor an after observation")]
    EmptyActivity { title: String },
    #[error("photo '{filename}' of activity '{activity}' could not be decoded: {source}")]
    InvalidImage {
        activity: String,
        filename: String,
        #[source]
        source: image::ImageError,
    },
    #[error("failed to write DOCX package: {0}")]
    Pack(String),
}

/// Result of a successful report generation.
#[derive(Debug)]
pub struct GeneratedReport {
    pub filename: String,
    pub docx: Vec<u8>,
    pub generated_on: NaiveDate,
}
