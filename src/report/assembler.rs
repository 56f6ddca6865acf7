//! Builds the report document from company, client and activity data.
//!
//! Sections are emitted in a fixed order: letterhead, title, service
//! metadata, client data, objective, note, photographic record heading and
//! finally one block per activity.

use std::path::PathBuf;

use chrono::{Local, NaiveDate};

use super::common::format_letterhead_date;
use super::document::{Alignment, Block, Cell, PageSetup, Paragraph, ReportDocument, Table, TextRun};
use super::images::{load_logo, EmbeddedImage};
use super::layout::ImageGrid;
use super::models::{Activity, ActivityKind, ClientInfo, CompanyInfo, ImageData, Observation};
use super::ReportError;

pub const BRAND_COLOR: &str = "003366";
pub const LABEL_FILL: &str = "F2F2F2";
pub const SIDE_HEADING_FILL: &str = "D9D9D9";
pub const LOGO_PLACEHOLDER: &str = "[LOGO]";
pub const SUBJECT_LINE: &str = "Maintenance and cleaning service";

pub const TWIPS_PER_INCH: usize = 1440;
pub const PHOTO_WIDTH_IN: f64 = 2.2;
pub const LOGO_WIDTH_IN: f64 = 1.3;

const CONTENT_WIDTH: usize = TWIPS_PER_INCH * 13 / 2;
const LOGO_COLUMN: usize = TWIPS_PER_INCH * 2;
const LABEL_COLUMN: usize = TWIPS_PER_INCH * 5 / 2;

pub const PAGE_SETUP: PageSetup = PageSetup {
    font_family: "Arial",
    font_size_pt: 10,
    margin_twips: TWIPS_PER_INCH as i32,
};

/// Company identity printed in the page header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Letterhead {
    pub company_name: String,
    pub tagline: String,
    pub locality: String,
    /// Read at generation time; a missing file only degrades the header.
    pub logo_path: PathBuf,
}

impl Default for Letterhead {
    fn default() -> Self {
        Self {
            company_name: "ROTOMAQUINAS S.A.S".to_string(),
            tagline: "Operational Services with Machinery and Personnel".to_string(),
            locality: "Palmira - Valle del Cauca".to_string(),
            logo_path: PathBuf::from("assets/logo.png"),
        }
    }
}

impl Letterhead {
    pub fn with_logo_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.logo_path = path.into();
        self
    }
}

/// Assemble the report stamped with today's local date.
pub fn assemble(
    company: &CompanyInfo,
    client: &ClientInfo,
    activities: &[Activity],
    letterhead: &Letterhead,
) -> Result<ReportDocument, ReportError> {
    assemble_on(company, client, activities, letterhead, Local::now().date_naive())
}

/// Assemble the report stamped with `today`.
pub fn assemble_on(
    company: &CompanyInfo,
    client: &ClientInfo,
    activities: &[Activity],
    letterhead: &Letterhead,
    today: NaiveDate,
) -> Result<ReportDocument, ReportError> {
    let mut body = Vec::new();

    body.push(Block::Paragraph(
        Paragraph::new().align(Alignment::Center).text(
            TextRun::new(format!(
                "TECHNICAL REPORT: {}",
                company.project_name.to_uppercase()
            ))
            .bold()
            .size(14)
            .color(BRAND_COLOR),
        ),
    ));
    body.push(spacer());

    body.push(Block::Table(label_value_table(&[
        ("SERVICE DATE:", company.service_date.as_str()),
        ("RESPONSIBLE TECHNICIAN:", company.technician.as_str()),
        ("LOCATION:", company.location.as_str()),
        ("SUBJECT:", SUBJECT_LINE),
    ])));
    body.push(spacer());

    body.push(Block::Paragraph(Paragraph::new().text(
        TextRun::new("CLIENT DATA").bold().size(11).color(BRAND_COLOR),
    )));
    body.push(Block::Table(label_value_table(&[
        ("COMPANY NAME / NAME:", client.name.as_str()),
        ("TAX ID:", client.tax_id.as_str()),
        ("ADDRESS:", client.address.as_str()),
    ])));
    body.push(spacer());

    body.push(Block::Paragraph(
        Paragraph::new().text(TextRun::new("OBJECTIVE").bold().size(11)),
    ));
    body.push(Block::Paragraph(
        Paragraph::new().text(TextRun::new(company.objective.as_str())),
    ));
    body.push(spacer());

    body.push(Block::Paragraph(
        Paragraph::new()
            .text(TextRun::new("NOTE: ").bold())
            .text(TextRun::new(company.note.as_str())),
    ));
    body.push(spacer());

    body.push(Block::Paragraph(
        Paragraph::new()
            .align(Alignment::Center)
            .text(TextRun::new("PHOTOGRAPHIC RECORD").bold().size(12)),
    ));
    body.push(spacer());

    for activity in activities {
        push_activity(&mut body, activity)?;
    }

    Ok(ReportDocument {
        page: PAGE_SETUP,
        header: letterhead_table(letterhead, today),
        body,
    })
}

fn spacer() -> Block {
    Block::Paragraph(Paragraph::spacer())
}

fn letterhead_table(letterhead: &Letterhead, today: NaiveDate) -> Table {
    let logo = match load_logo(&letterhead.logo_path, LOGO_WIDTH_IN) {
        Some(image) => Paragraph::new().align(Alignment::Left).image(image),
        None => Paragraph::new().text(TextRun::new(LOGO_PLACEHOLDER)),
    };

    let identity = Paragraph::new()
        .align(Alignment::Right)
        .text(
            TextRun::new(letterhead.company_name.as_str())
                .bold()
                .size(14)
                .color(BRAND_COLOR),
        )
        .line_break()
        .text(TextRun::new(letterhead.tagline.as_str()).bold().size(9))
        .line_break()
        .text(TextRun::new(letterhead.locality.as_str()).size(9))
        .line_break()
        .text(
            TextRun::new(format!("Date: {}", format_letterhead_date(today)))
                .italic()
                .size(8),
        );

    Table::new(vec![LOGO_COLUMN, CONTENT_WIDTH - LOGO_COLUMN])
        .borderless()
        .row(vec![
            Cell::new().width(LOGO_COLUMN).paragraph(logo),
            Cell::new()
                .width(CONTENT_WIDTH - LOGO_COLUMN)
                .paragraph(identity),
        ])
}

/// Two-column table: bold shaded labels on the left, plain values on the right.
fn label_value_table(rows: &[(&str, &str)]) -> Table {
    rows.iter().fold(
        Table::new(vec![LABEL_COLUMN, CONTENT_WIDTH - LABEL_COLUMN]),
        |table, (label, value)| {
            table.row(vec![
                Cell::new()
                    .width(LABEL_COLUMN)
                    .shaded(LABEL_FILL)
                    .paragraph(Paragraph::new().text(TextRun::new(*label).bold().size(10))),
                Cell::new()
                    .width(CONTENT_WIDTH - LABEL_COLUMN)
                    .paragraph(Paragraph::new().text(TextRun::new(*value).size(10))),
            ])
        },
    )
}

fn push_activity(body: &mut Vec<Block>, activity: &Activity) -> Result<(), ReportError> {
    body.push(Block::Paragraph(
        Paragraph::new()
            .align(Alignment::Center)
            .text(TextRun::new(activity.title.to_uppercase()).bold().size(11)),
    ));
    body.push(spacer());

    match &activity.kind {
        ActivityKind::ObservationOnly {
            observation,
            images,
        } => {
            let photos = decode_photos(&activity.title, images)?;
            body.push(Block::Table(observation_table(observation, photos)));
        }
        ActivityKind::BeforeAfter { before, after } => {
            if before.is_none() && after.is_none() {
                return Err(ReportError::EmptyActivity {
                    title: activity.title.clone(),
                });
            }
            if let Some(side) = before {
                body.push(Block::Table(side_table("BEFORE", &activity.title, side)?));
                body.push(spacer());
            }
            if let Some(side) = after {
                body.push(Block::Table(side_table("AFTER", &activity.title, side)?));
            }
        }
    }

    body.push(spacer());
    Ok(())
}

fn decode_photos(activity: &str, images: &[ImageData]) -> Result<Vec<EmbeddedImage>, ReportError> {
    images
        .iter()
        .map(|img| {
            EmbeddedImage::decode(&img.bytes, PHOTO_WIDTH_IN).map_err(|source| {
                ReportError::InvalidImage {
                    activity: activity.to_string(),
                    filename: img.filename.clone(),
                    source,
                }
            })
        })
        .collect()
}

fn observation_cell(text: &str) -> Cell {
    Cell::new().bordered().paragraph(
        Paragraph::new()
            .text(TextRun::new("OBSERVATION: ").bold())
            .text(TextRun::new(text)),
    )
}

/// A cell must hold at least one paragraph even when it has no content.
fn non_empty(cell: Cell) -> Cell {
    if cell.paragraphs.is_empty() {
        cell.paragraph(Paragraph::spacer())
    } else {
        cell
    }
}

/// Observation row followed by a photo row laid out two per line.
fn observation_table(observation: &str, photos: Vec<EmbeddedImage>) -> Table {
    let grid = ImageGrid::for_count(photos.len());
    let photo_cell = grid
        .chunk(&photos)
        .into_iter()
        .fold(Cell::new().bordered(), |cell, line| {
            let paragraph = line
                .iter()
                .cloned()
                .fold(Paragraph::new().align(Alignment::Center), Paragraph::image);
            cell.paragraph(paragraph)
        });

    Table::new(vec![CONTENT_WIDTH])
        .row(vec![observation_cell(observation)])
        .row(vec![non_empty(photo_cell)])
}

/// Heading, observation and stacked photos for one side of a before/after pair.
fn side_table(label: &str, activity: &str, side: &Observation) -> Result<Table, ReportError> {
    let photos = decode_photos(activity, &side.images)?;

    let heading = Cell::new().bordered().shaded(SIDE_HEADING_FILL).paragraph(
        Paragraph::new()
            .align(Alignment::Center)
            .text(TextRun::new(label).bold().size(11)),
    );

    let photo_cell = photos.into_iter().fold(Cell::new().bordered(), |cell, photo| {
        cell.paragraph(Paragraph::new().align(Alignment::Center).image(photo))
    });

    Ok(Table::new(vec![CONTENT_WIDTH])
        .row(vec![heading])
        .row(vec![observation_cell(&side.observation)])
        .row(vec![non_empty(photo_cell)]))
}
