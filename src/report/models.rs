//! Report input types: company and client metadata plus logged activities.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Data of the service provider side of the report.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct CompanyInfo {
    pub project_name: String,
    /// Free-form service date as it should be printed (e.g. "NOVEMBER 2025").
    pub service_date: String,
    pub technician: String,
    pub location: String,
    pub objective: String,
    /// Safety note printed after the objective.
    pub note: String,
}

/// Data of the client the service was performed for.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct ClientInfo {
    /// Legal or display name.
    pub name: String,
    /// Tax or identification number.
    pub tax_id: String,
    pub address: String,
}

/// One uploaded photo, owned by the activity it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ImageData {
    #[serde(default)]
    pub filename: String,
    /// Raw file content, base64 encoded on the wire.
    #[serde(with = "base64_bytes")]
    #[schema(value_type = String, format = Byte)]
    pub bytes: Vec<u8>,
}

impl ImageData {
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            bytes,
        }
    }
}

/// An observation text with its supporting photos.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Observation {
    pub observation: String,
    #[serde(default)]
    pub images: Vec<ImageData>,
}

impl Observation {
    pub fn new(observation: impl Into<String>, images: Vec<ImageData>) -> Self {
        Self {
            observation: observation.into(),
            images,
        }
    }
}

/// Format of an activity block in the photographic record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActivityKind {
    ObservationOnly {
        observation: String,
        #[serde(default)]
        images: Vec<ImageData>,
    },
    BeforeAfter {
        #[serde(default)]
        before: Option<Observation>,
        #[serde(default)]
        after: Option<Observation>,
    },
}

impl ActivityKind {
    pub fn label(&self) -> &'static str {
        match self {
            ActivityKind::ObservationOnly { .. } => "observation_only",
            ActivityKind::BeforeAfter { .. } => "before_after",
        }
    }
}

/// One logged maintenance task. Never mutated once stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Activity {
    pub title: String,
    pub kind: ActivityKind,
}

impl Activity {
    pub fn observation_only(
        title: impl Into<String>,
        observation: impl Into<String>,
        images: Vec<ImageData>,
    ) -> Self {
        Self {
            title: title.into(),
            kind: ActivityKind::ObservationOnly {
                observation: observation.into(),
                images,
            },
        }
    }

    pub fn before_after(
        title: impl Into<String>,
        before: Option<Observation>,
        after: Option<Observation>,
    ) -> Self {
        Self {
            title: title.into(),
            kind: ActivityKind::BeforeAfter { before, after },
        }
    }

    /// Total number of photos attached to this activity.
    pub fn image_count(&self) -> usize {
        match &self.kind {
            ActivityKind::ObservationOnly { images, .. } => images.len(),
            ActivityKind::BeforeAfter { before, after } => {
                before.as_ref().map_or(0, |o| o.images.len())
                    + after.as_ref().map_or(0, |o| o.images.len())
            }
        }
    }
}

/// Everything needed to produce one report document.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct ReportRequest {
    pub company: CompanyInfo,
    pub client: ClientInfo,
    #[serde(default)]
    pub activities: Vec<Activity>,
}

mod base64_bytes {
    use base64::engine::general_purpose::STANDARD as BASE64;
    use base64::Engine;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&BASE64.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        BASE64
            .decode(encoded.trim())
            .map_err(serde::de::Error::custom)
    }
}
