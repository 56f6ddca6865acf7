use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::report::models::{Activity, ActivityKind, ClientInfo, CompanyInfo, ImageData, Observation};
use crate::report::traits::Validator;
use crate::report::validation::{ValidationError, ValidationErrors};

/// Suggested activity titles; any other non-empty title is also accepted.
pub const ACTIVITY_TITLES: &[&str] = &[
    "Work Area Fencing",
    "Fumigation Around Covers",
    "Path Fumigation",
    "Inlet Bypass",
    "Outlet Bypass",
    "Septic Tank Cleaning with Vactor",
    "Filter Washing",
    "Septic Treatment Application",
    "Screw/Gate Cleaning",
    "Weed Clearing",
    "Cleaning Around Covers",
    "Well Cover Washing",
];

pub const DEFAULT_OBJECTIVE: &str = "The maintenance work carried out on the treatment plant, tanks and boxes is described below, together with the actions taken to correct deficiencies in order to achieve better operation of the system.";

pub const DEFAULT_NOTE: &str = "Before starting any kind of process, our technical staff has all the necessary safety measures in place, since they are exposed to different risks.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ActivityFormat {
    ObservationOnly,
    BeforeAfter,
}

/// JSON carried in the `metadata` part of the activity upload form.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ActivityMetadata {
    #[schema(example = "Work Area Fencing")]
    pub title: String,
    pub format: ActivityFormat,
    #[serde(default)]
    pub observation: String,
    #[serde(default)]
    pub before_observation: String,
    #[serde(default)]
    pub after_observation: String,
}

impl ActivityMetadata {
    /// Combine the form fields with the uploaded photos into an activity.
    ///
    /// A before/after side is kept only when its observation is filled in;
    /// photos uploaded for an empty side are dropped.
    pub fn into_activity(
        self,
        images: Vec<ImageData>,
        before_images: Vec<ImageData>,
        after_images: Vec<ImageData>,
    ) -> Result<Activity, ValidationErrors> {
        let title = self.title.trim().to_string();
        let kind = match self.format {
            ActivityFormat::ObservationOnly => ActivityKind::ObservationOnly {
                observation: self.observation,
                images,
            },
            ActivityFormat::BeforeAfter => ActivityKind::BeforeAfter {
                before: side(self.before_observation, before_images),
                after: side(self.after_observation, after_images),
            },
        };

        let activity = Activity { title, kind };
        activity.validate()?;
        Ok(activity)
    }
}

fn side(observation: String, images: Vec<ImageData>) -> Option<Observation> {
    if observation.trim().is_empty() {
        None
    } else {
        Some(Observation::new(observation, images))
    }
}

/// OpenAPI description of the multipart activity upload.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ActivityUploadForm {
    /// `ActivityMetadata` as a JSON string
    #[allow(unused)]
    pub metadata: String,
    /// Photos for an observation-only activity (PNG or JPEG)
    #[allow(unused)]
    pub images: Option<Vec<Vec<u8>>>,
    #[allow(unused)]
    pub before_images: Option<Vec<Vec<u8>>>,
    #[allow(unused)]
    pub after_images: Option<Vec<Vec<u8>>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SideSummary {
    pub observation: String,
    pub photos: usize,
}

/// Preview of one stored activity, without photo content.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ActivitySummary {
    pub index: usize,
    pub title: String,
    pub format: ActivityFormat,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observation: Option<String>,
    pub photos: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<SideSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<SideSummary>,
}

impl ActivitySummary {
    pub fn from_activity(index: usize, activity: &Activity) -> Self {
        let summarize = |o: &Observation| SideSummary {
            observation: o.observation.clone(),
            photos: o.images.len(),
        };

        let (format, observation, before, after) = match &activity.kind {
            ActivityKind::ObservationOnly { observation, .. } => {
                (ActivityFormat::ObservationOnly, Some(observation.clone()), None, None)
            }
            ActivityKind::BeforeAfter { before, after } => (
                ActivityFormat::BeforeAfter,
                None,
                before.as_ref().map(summarize),
                after.as_ref().map(summarize),
            ),
        };

        Self {
            index,
            title: activity.title.clone(),
            format,
            observation,
            photos: activity.image_count(),
            before,
            after,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ActivityListResponse {
    pub count: usize,
    pub activities: Vec<ActivitySummary>,
}

impl ActivityListResponse {
    pub fn from_activities(activities: &[Activity]) -> Self {
        Self {
            count: activities.len(),
            activities: activities
                .iter()
                .enumerate()
                .map(|(i, a)| ActivitySummary::from_activity(i, a))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SessionCreated {
    pub session_id: Uuid,
}

/// Company and client fields submitted together with the export request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct ExportRequest {
    pub company: CompanyInfo,
    pub client: ClientInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FormOptions {
    pub activity_titles: Vec<String>,
    /// Titles outside the list are accepted as free text.
    pub custom_title_allowed: bool,
    pub default_objective: String,
    pub default_note: String,
}

impl Default for FormOptions {
    fn default() -> Self {
        Self {
            activity_titles: ACTIVITY_TITLES.iter().map(|t| t.to_string()).collect(),
            custom_title_allowed: true,
            default_objective: DEFAULT_OBJECTIVE.to_string(),
            default_note: DEFAULT_NOTE.to_string(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ValidationErrorResponse {
    pub error: String,
    pub message: String,
    pub details: Vec<ValidationError>,
    pub timestamp: String,
}

impl ValidationErrorResponse {
    pub fn new(errors: &ValidationErrors) -> Self {
        Self {
            error: "ValidationError".to_string(),
            message: errors.to_message(),
            details: errors.errors().to_vec(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
