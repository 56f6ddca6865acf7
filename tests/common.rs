#![allow(dead_code)]

use std::io::Cursor;

use image::{DynamicImage, ImageFormat, RgbImage};
use service_report_server::report::models::{ClientInfo, CompanyInfo, ImageData};
use service_report_server::report::Letterhead;
use service_report_server::AppConfig;

pub const BOUNDARY: &str = "----service-report-test-boundary";
pub const MISSING_LOGO: &str = "/nonexistent/assets/logo.png";

/// Encode a solid-color test photo.
pub fn photo_bytes(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
    let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, image::Rgb([180, 40, 40])));
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), format)
        .expect("encode test photo");
    buf
}

pub fn png(name: &str) -> ImageData {
    ImageData::new(name, photo_bytes(16, 12, ImageFormat::Png))
}

pub fn jpeg(name: &str) -> ImageData {
    ImageData::new(name, photo_bytes(16, 12, ImageFormat::Jpeg))
}

pub fn company() -> CompanyInfo {
    CompanyInfo {
        project_name: "LA RITA".into(),
        service_date: "NOVEMBER 2025".into(),
        technician: "J. Perez".into(),
        location: "Site A".into(),
        objective: "Describe the maintenance work carried out.".into(),
        note: "Staff worked with full safety equipment.".into(),
    }
}

pub fn client() -> ClientInfo {
    ClientInfo {
        name: "ACME S.A".into(),
        tax_id: "900.000.000-1".into(),
        address: "Km 7".into(),
    }
}

pub fn letterhead_without_logo() -> Letterhead {
    Letterhead::default().with_logo_path(MISSING_LOGO)
}

pub fn test_config() -> AppConfig {
    AppConfig {
        logo_path: MISSING_LOGO.into(),
        ..AppConfig::default()
    }
}

/// One part of a multipart/form-data body.
pub enum Part<'a> {
    Text { name: &'a str, value: String },
    File {
        name: &'a str,
        filename: &'a str,
        content_type: &'a str,
        bytes: Vec<u8>,
    },
}

pub fn multipart_content_type() -> String {
    format!("multipart/form-data; boundary={}", BOUNDARY)
}

pub fn multipart_body(parts: Vec<Part<'_>>) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        match part {
            Part::Text { name, value } => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name).as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            Part::File {
                name,
                filename,
                content_type,
                bytes,
            } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                        name, filename, content_type
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(&bytes);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}
