//! Generator for the maintenance service report.
//!
//! Validates the request, assembles the document model and writes it out as
//! DOCX in one call.

use chrono::{Local, NaiveDate};

use super::assembler::{assemble_on, Letterhead};
use super::common::report_filename;
use super::models::ReportRequest;
use super::render::render_docx;
use super::traits::{Generator, Validator};
use super::{GeneratedReport, ReportError};

pub struct ServiceReportGenerator {
    letterhead: Letterhead,
}

impl ServiceReportGenerator {
    pub fn new(letterhead: Letterhead) -> Self {
        Self { letterhead }
    }

    pub fn letterhead(&self) -> &Letterhead {
        &self.letterhead
    }

    /// Generate the report as if it were produced on `today`.
    pub fn generate_on(
        &self,
        request: &ReportRequest,
        today: NaiveDate,
    ) -> Result<GeneratedReport, ReportError> {
        request.validate().map_err(ReportError::Validation)?;

        let document = assemble_on(
            &request.company,
            &request.client,
            &request.activities,
            &self.letterhead,
            today,
        )?;
        let docx = render_docx(&document)?;
        let filename = report_filename(&request.company.project_name, today);

        log::info!(
            "Generated report {} with {} activities ({} bytes)",
            filename,
            request.activities.len(),
            docx.len()
        );

        Ok(GeneratedReport {
            filename,
            docx,
            generated_on: today,
        })
    }
}

impl Default for ServiceReportGenerator {
    fn default() -> Self {
        Self::new(Letterhead::default())
    }
}

impl Generator<ReportRequest> for ServiceReportGenerator {
    fn generate(&self, request: ReportRequest) -> Result<GeneratedReport, ReportError> {
        self.generate_on(&request, Local::now().date_naive())
    }
}
