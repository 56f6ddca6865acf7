use std::sync::Arc;

use crate::config::AppConfig;
use crate::form::multipart_parser::UploadLimits;
use crate::report::{Letterhead, ServiceReportGenerator};
use crate::session::SessionRegistry;

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub sessions: SessionRegistry,
    pub generator: Arc<ServiceReportGenerator>,
    pub upload_limits: UploadLimits,
}

impl AppState {
    pub fn new(config: &AppConfig) -> Self {
        let letterhead = Letterhead::default().with_logo_path(config.logo_path.clone());
        Self {
            sessions: SessionRegistry::new(config.session_ttl, config.max_sessions),
            generator: Arc::new(ServiceReportGenerator::new(letterhead)),
            upload_limits: UploadLimits::new(config.max_photo_bytes, config.max_upload_bytes),
        }
    }
}
