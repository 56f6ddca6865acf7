//! Layout tests for the assembled report document.

mod common;

use chrono::NaiveDate;
use image::ImageFormat;
use service_report_server::report::assembler::{
    assemble_on, LABEL_FILL, LOGO_PLACEHOLDER, SIDE_HEADING_FILL,
};
use service_report_server::report::document::{Alignment, Block, Run, Table};
use service_report_server::report::models::{Activity, ImageData, Observation};
use service_report_server::report::{Letterhead, ReportError};

use common::{client, company, letterhead_without_logo, png};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 11, 30).unwrap()
}

fn activity_tables(doc: &service_report_server::report::document::ReportDocument) -> Vec<&Table> {
    // The first two tables are the metadata and client tables.
    doc.tables().skip(2).collect()
}

#[test]
fn test_fence_setup_scenario() {
    let activities = vec![Activity::observation_only(
        "Fence Setup",
        "Perimeter fenced.",
        vec![],
    )];

    let doc = assemble_on(&company(), &client(), &activities, &letterhead_without_logo(), today()).unwrap();

    let tables: Vec<&Table> = doc.tables().collect();
    assert_eq!(tables.len(), 3);

    let metadata = tables[0];
    assert_eq!(metadata.row_count(), 4);
    assert_eq!(metadata.column_count(), 2);
    assert_eq!(metadata.cell(0, 0).unwrap().plain_text(), "SERVICE DATE:");
    assert_eq!(metadata.cell(0, 1).unwrap().plain_text(), "NOVEMBER 2025");
    assert_eq!(metadata.cell(1, 1).unwrap().plain_text(), "J. Perez");
    assert_eq!(metadata.cell(2, 1).unwrap().plain_text(), "Site A");

    let client_table = tables[1];
    assert_eq!(client_table.row_count(), 3);
    assert_eq!(client_table.cell(0, 1).unwrap().plain_text(), "ACME S.A");
    assert_eq!(client_table.cell(1, 1).unwrap().plain_text(), "900.000.000-1");
    assert_eq!(client_table.cell(2, 1).unwrap().plain_text(), "Km 7");
    assert_eq!(client_table.cell(2, 0).unwrap().shading, Some(LABEL_FILL));

    let block = tables[2];
    assert_eq!(block.row_count(), 2);
    assert_eq!(block.column_count(), 1);

    let observation = block.cell(0, 0).unwrap();
    assert!(observation.bordered);
    assert_eq!(observation.plain_text(), "OBSERVATION: Perimeter fenced.");
    match &observation.paragraphs[0].runs[0] {
        Run::Text(label) => assert!(label.bold),
        other => panic!("expected label run, got {:?}", other),
    }

    let photos = block.cell(1, 0).unwrap();
    assert!(photos.bordered);
    assert_eq!(photos.image_count(), 0);

    assert!(doc.find_paragraph("FENCE SETUP").is_some());
}

#[test]
fn test_pipe_cleaning_scenario() {
    let activities = vec![Activity::before_after(
        "Pipe Cleaning",
        Some(Observation::new("Clogged", vec![png("a.png")])),
        Some(Observation::new("Clear", vec![png("b.png"), png("c.png")])),
    )];

    let doc = assemble_on(&company(), &client(), &activities, &letterhead_without_logo(), today()).unwrap();
    let tables = activity_tables(&doc);
    assert_eq!(tables.len(), 2);

    let before = tables[0];
    assert_eq!(before.row_count(), 3);
    let heading = before.cell(0, 0).unwrap();
    assert_eq!(heading.plain_text(), "BEFORE");
    assert_eq!(heading.shading, Some(SIDE_HEADING_FILL));
    assert_eq!(heading.paragraphs[0].alignment, Alignment::Center);
    assert_eq!(before.cell(1, 0).unwrap().plain_text(), "OBSERVATION: Clogged");
    assert_eq!(before.cell(2, 0).unwrap().image_count(), 1);

    let after = tables[1];
    assert_eq!(after.row_count(), 3);
    assert_eq!(after.cell(0, 0).unwrap().plain_text(), "AFTER");
    let after_photos = after.cell(2, 0).unwrap();
    assert_eq!(after_photos.image_count(), 2);
    // stacked: one picture per line
    assert_eq!(after_photos.image_lines(), 2);

    for table in tables {
        for row in &table.rows {
            assert!(row[0].bordered);
        }
    }
}

#[test]
fn test_omitted_side_renders_nothing() {
    let activities = vec![Activity::before_after(
        "Pipe Cleaning",
        None,
        Some(Observation::new("Clear", vec![])),
    )];

    let doc = assemble_on(&company(), &client(), &activities, &letterhead_without_logo(), today()).unwrap();
    let tables = activity_tables(&doc);
    assert_eq!(tables.len(), 1);
    assert_eq!(tables[0].cell(0, 0).unwrap().plain_text(), "AFTER");
    assert_eq!(tables[0].cell(2, 0).unwrap().image_count(), 0);
    assert!(tables[0].cell(2, 0).unwrap().bordered);
}

#[test]
fn test_spacer_between_before_and_after() {
    let activities = vec![Activity::before_after(
        "Pipe Cleaning",
        Some(Observation::new("Clogged", vec![])),
        Some(Observation::new("Clear", vec![])),
    )];

    let doc = assemble_on(&company(), &client(), &activities, &letterhead_without_logo(), today()).unwrap();
    let positions: Vec<usize> = doc
        .body
        .iter()
        .enumerate()
        .filter(|(_, b)| matches!(b, Block::Table(_)))
        .map(|(i, _)| i)
        .skip(2)
        .collect();

    assert_eq!(positions.len(), 2);
    assert_eq!(positions[1] - positions[0], 2);
    match &doc.body[positions[0] + 1] {
        Block::Paragraph(p) => assert!(p.is_empty()),
        other => panic!("expected spacer, got {:?}", other),
    }
    // trailing spacer closes the activity
    match doc.body.last() {
        Some(Block::Paragraph(p)) => assert!(p.is_empty()),
        other => panic!("expected trailing spacer, got {:?}", other),
    }
}

#[test]
fn test_observation_grid_two_per_line() {
    for count in 0..=5usize {
        let photos = (0..count).map(|i| png(&format!("{}.png", i))).collect();
        let activities = vec![Activity::observation_only("Weed Clearing", "Done", photos)];

        let doc = assemble_on(&company(), &client(), &activities, &letterhead_without_logo(), today()).unwrap();
        let cell = activity_tables(&doc)[0].cell(1, 0).unwrap();

        assert_eq!(cell.image_count(), count);
        let expected_rows = if count == 0 { 0 } else { (count + 1) / 2 };
        assert_eq!(cell.image_lines(), expected_rows, "count {}", count);
        for paragraph in &cell.paragraphs {
            assert!(paragraph.image_count() <= 2);
        }
        assert!(cell.bordered);
    }
}

#[test]
fn test_activities_keep_store_order() {
    let activities = vec![
        Activity::observation_only("Inlet Bypass", "a", vec![]),
        Activity::observation_only("Outlet Bypass", "b", vec![]),
    ];

    let doc = assemble_on(&company(), &client(), &activities, &letterhead_without_logo(), today()).unwrap();
    let titles: Vec<String> = doc
        .paragraphs()
        .map(|p| p.plain_text())
        .filter(|t| t.ends_with("BYPASS"))
        .collect();
    assert_eq!(titles, vec!["INLET BYPASS", "OUTLET BYPASS"]);
}

#[test]
fn test_note_and_objective_sections() {
    let doc = assemble_on(&company(), &client(), &[], &letterhead_without_logo(), today()).unwrap();

    assert!(doc.find_paragraph("OBJECTIVE").is_some());
    assert!(doc
        .find_paragraph("Describe the maintenance work carried out.")
        .is_some());
    let note = doc
        .find_paragraph("NOTE: Staff worked with full safety equipment.")
        .unwrap();
    match &note.runs[0] {
        Run::Text(prefix) => assert!(prefix.bold),
        other => panic!("expected bold prefix, got {:?}", other),
    }
    let record = doc.find_paragraph("PHOTOGRAPHIC RECORD").unwrap();
    assert_eq!(record.alignment, Alignment::Center);
}

#[test]
fn test_missing_logo_degrades_to_placeholder() {
    let doc = assemble_on(&company(), &client(), &[], &letterhead_without_logo(), today()).unwrap();
    let logo_cell = doc.header.cell(0, 0).unwrap();
    assert_eq!(logo_cell.plain_text(), LOGO_PLACEHOLDER);
    assert_eq!(logo_cell.image_count(), 0);
}

#[test]
fn test_unreadable_logo_degrades_to_placeholder() {
    let file = tempfile::NamedTempFile::new().unwrap();
    std::fs::write(file.path(), b"not a picture").unwrap();

    let letterhead = Letterhead::default().with_logo_path(file.path());
    let doc = assemble_on(&company(), &client(), &[], &letterhead, today()).unwrap();
    assert_eq!(doc.header.cell(0, 0).unwrap().plain_text(), LOGO_PLACEHOLDER);
}

#[test]
fn test_present_logo_is_embedded() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("logo.png");
    std::fs::write(&path, common::photo_bytes(64, 32, ImageFormat::Png)).unwrap();

    let letterhead = Letterhead::default().with_logo_path(&path);
    let doc = assemble_on(&company(), &client(), &[], &letterhead, today()).unwrap();
    let logo_cell = doc.header.cell(0, 0).unwrap();
    assert_eq!(logo_cell.image_count(), 1);
    assert_eq!(logo_cell.plain_text(), "");
}

#[test]
fn test_corrupt_photo_aborts_assembly() {
    let activities = vec![Activity::observation_only(
        "Filter Washing",
        "Done",
        vec![png("ok.png"), ImageData::new("broken.jpg", b"garbage".to_vec())],
    )];

    let err = assemble_on(&company(), &client(), &activities, &letterhead_without_logo(), today()).unwrap_err();
    match err {
        ReportError::InvalidImage {
            activity, filename, ..
        } => {
            assert_eq!(activity, "Filter Washing");
            assert_eq!(filename, "broken.jpg");
        }
        other => panic!("unexpected error {:?}", other),
    }
}

#[test]
fn test_jpeg_photos_are_embedded() {
    let activities = vec![Activity::observation_only(
        "Filter Washing",
        "Done",
        vec![common::jpeg("a.jpg")],
    )];

    let doc = assemble_on(&company(), &client(), &activities, &letterhead_without_logo(), today()).unwrap();
    let cell = activity_tables(&doc)[0].cell(1, 0).unwrap();
    match &cell.paragraphs[0].runs[0] {
        Run::Image(img) => {
            assert_eq!(img.width_px, 16);
            assert_eq!(img.height_px, 12);
        }
        other => panic!("expected picture, got {:?}", other),
    }
}
