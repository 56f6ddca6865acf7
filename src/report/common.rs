//! Common utilities for report generation: date stamps and file naming.

use chrono::NaiveDate;

/// MIME type of the generated document.
pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Format a date the way the letterhead prints it (e.g. "16/10/2026").
pub fn format_letterhead_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Build the download filename, e.g. `SERVICE_REPORT_LA_RITA_20251130.docx`.
pub fn report_filename(project_name: &str, date: NaiveDate) -> String {
    let project = project_name.trim().replace(' ', "_");
    let project = sanitize_filename::sanitize(&project);
    let project = if project.is_empty() {
        "REPORT".to_string()
    } else {
        project
    };

    format!(
        "SERVICE_REPORT_{}_{}.docx",
        project,
        date.format("%Y%m%d")
    )
}

/// ASCII-only rendering of a filename for clients that ignore `filename*`.
/// Every non-ASCII character becomes `_`.
pub fn ascii_filename(filename: &str) -> String {
    filename
        .chars()
        .map(|c| if c.is_ascii() { c } else { '_' })
        .collect()
}
