use actix_multipart::{Field, Multipart};
use actix_web::HttpResponse;
use futures::StreamExt;
use mime_guess::mime;
use sanitize_filename::sanitize;

use crate::form::models::ActivityMetadata;
use crate::report::models::ImageData;
use crate::ErrorResponse;

/// Activity form fields and photos pulled out of a multipart upload.
#[derive(Debug)]
pub struct ParsedActivityForm {
    pub metadata: ActivityMetadata,
    pub images: Vec<ImageData>,
    pub before_images: Vec<ImageData>,
    pub after_images: Vec<ImageData>,
}

#[derive(Debug, thiserror::Error)]
pub enum MultipartParseError {
    #[error("Multipart field error: {0}")]
    FieldError(String),
    #[error("Invalid metadata: {0}")]
    MetadataError(String),
    #[error("IO error: {0}")]
    IoError(String),
    #[error("Invalid UTF-8 data: {0}")]
    Utf8Error(String),
    #[error("Serialization error: {0}")]
    SerializationError(String),
    #[error("Unsupported file '{0}': only PNG and JPEG photos are accepted")]
    UnsupportedFile(String),
    #[error("Upload too large: '{field}' exceeds the limit of {limit} bytes")]
    TooLarge { field: String, limit: usize },
}

/// Size caps applied while reading an activity upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadLimits {
    /// Largest single part.
    pub max_part_bytes: usize,
    /// Largest upload, all parts together.
    pub max_total_bytes: usize,
}

impl UploadLimits {
    pub fn new(max_part_bytes: usize, max_total_bytes: usize) -> Self {
        Self {
            max_part_bytes,
            max_total_bytes,
        }
    }

    /// Bytes the next part may take once `used` bytes have been read.
    fn budget(&self, used: usize) -> usize {
        self.max_part_bytes
            .min(self.max_total_bytes.saturating_sub(used))
    }
}

impl From<MultipartParseError> for HttpResponse {
    fn from(error: MultipartParseError) -> Self {
        match error {
            MultipartParseError::MetadataError(_)
            | MultipartParseError::Utf8Error(_)
            | MultipartParseError::SerializationError(_)
            | MultipartParseError::UnsupportedFile(_) => {
                HttpResponse::BadRequest().json(ErrorResponse::bad_request(&format!("{}", error)))
            }
            MultipartParseError::TooLarge { .. } => HttpResponse::PayloadTooLarge()
                .json(ErrorResponse::new("PayloadTooLarge", &format!("{}", error))),
            _ => HttpResponse::InternalServerError()
                .json(ErrorResponse::internal_error(&format!("{}", error))),
        }
    }
}

/// Whether a photo is accepted, judged by filename first and the part's
/// declared content type second.
pub fn is_supported_image(filename: &str, content_type: Option<&mime::Mime>) -> bool {
    let accepted = |m: &mime::Mime| *m == mime::IMAGE_PNG || *m == mime::IMAGE_JPEG;

    match mime_guess::from_path(filename).first() {
        Some(guess) => accepted(&guess),
        None => content_type.is_some_and(accepted),
    }
}

/// Read a whole part, failing as soon as it grows past `limit` bytes.
async fn read_field(
    field: &mut Field,
    name: &str,
    limit: usize,
) -> Result<Vec<u8>, MultipartParseError> {
    let mut buffer = Vec::new();
    while let Some(chunk) = field.next().await {
        let data_chunk = chunk.map_err(|e| MultipartParseError::IoError(e.to_string()))?;
        if buffer.len() + data_chunk.len() > limit {
            return Err(MultipartParseError::TooLarge {
                field: name.to_string(),
                limit,
            });
        }
        buffer.extend_from_slice(&data_chunk);
    }
    Ok(buffer)
}

pub struct MultipartParser;

impl MultipartParser {
    pub async fn parse_activity_multipart(
        mut multipart: Multipart,
        limits: UploadLimits,
    ) -> Result<ParsedActivityForm, MultipartParseError> {
        let mut total = 0usize;
        let mut metadata: Option<ActivityMetadata> = None;
        let mut images = Vec::new();
        let mut before_images = Vec::new();
        let mut after_images = Vec::new();

        while let Some(item) = multipart.next().await {
            let mut field = item.map_err(|e| MultipartParseError::FieldError(e.to_string()))?;
            let content_disposition = field.content_disposition().ok_or_else(|| {
                MultipartParseError::FieldError("Content disposition not found".to_string())
            })?;
            let name = content_disposition
                .get_name()
                .ok_or_else(|| MultipartParseError::FieldError("Field name not found".to_string()))?
                .to_string();
            let maybe_filename = content_disposition.get_filename().map(sanitize);

            match name.as_str() {
                "metadata" => {
                    let buffer = read_field(&mut field, &name, limits.budget(total)).await?;
                    total += buffer.len();
                    let metadata_str = String::from_utf8(buffer)
                        .map_err(|e| MultipartParseError::Utf8Error(e.to_string()))?;
                    let parsed: ActivityMetadata = serde_json::from_str(&metadata_str)
                        .map_err(|e| MultipartParseError::SerializationError(e.to_string()))?;
                    metadata = Some(parsed);
                }
                "images" | "before_images" | "after_images" => {
                    let target = match name.as_str() {
                        "images" => &mut images,
                        "before_images" => &mut before_images,
                        _ => &mut after_images,
                    };
                    let filename = maybe_filename
                        .unwrap_or_else(|| format!("{}_{}", name, target.len()));

                    let supported = is_supported_image(&filename, field.content_type());
                    let bytes = read_field(&mut field, &name, limits.budget(total)).await?;
                    total += bytes.len();
                    // Browsers send an empty part when no file was picked.
                    if bytes.is_empty() {
                        continue;
                    }
                    if !supported {
                        log::warn!("Rejected upload '{}' in field '{}'", filename, name);
                        return Err(MultipartParseError::UnsupportedFile(filename));
                    }
                    target.push(ImageData::new(filename, bytes));
                }
                _ => continue,
            }
        }

        let metadata = metadata.ok_or_else(|| {
            MultipartParseError::MetadataError("metadata field is missing".to_string())
        })?;

        Ok(ParsedActivityForm {
            metadata,
            images,
            before_images,
            after_images,
        })
    }
}
