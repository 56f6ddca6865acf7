use actix_cors::Cors;
use actix_web::middleware::Compress;
use actix_web::{http::header, web, App, HttpServer};
use actix_web_prometheus::PrometheusMetricsBuilder;
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

pub mod config;
pub mod form;
pub mod report;
pub mod session;
pub mod state;

pub use crate::config::AppConfig;
pub use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub timestamp: String,
}

impl ErrorResponse {
    pub fn new(error_type: &str, message: &str) -> Self {
        Self {
            error: error_type.to_string(),
            message: message.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn not_found(message: &str) -> Self {
        Self::new("NotFound", message)
    }

    pub fn bad_request(message: &str) -> Self {
        Self::new("BadRequest", message)
    }

    pub fn internal_error(message: &str) -> Self {
        Self::new("InternalServerError", message)
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::form::handlers::get_form_options,
        crate::form::handlers::create_session,
        crate::form::handlers::end_session,
        crate::form::handlers::list_activities,
        crate::form::handlers::add_activity,
        crate::form::handlers::remove_activity,
        crate::form::handlers::clear_activities,
        crate::form::handlers::export_session_report,
        crate::form::handlers::generate_report
    ),
    components(
        schemas(
            form::models::ActivityFormat,
            form::models::ActivityMetadata,
            form::models::ActivityUploadForm,
            form::models::ActivitySummary,
            form::models::SideSummary,
            form::models::ActivityListResponse,
            form::models::SessionCreated,
            form::models::ExportRequest,
            form::models::FormOptions,
            form::models::ValidationErrorResponse,
            report::models::CompanyInfo,
            report::models::ClientInfo,
            report::models::Activity,
            report::models::ActivityKind,
            report::models::Observation,
            report::models::ImageData,
            report::models::ReportRequest,
            report::validation::ValidationError,
            ErrorResponse,
        )
    ),
    tags(
        (name = "Report Form", description = "Activity entry and service report export.")
    )
)]
pub struct ApiDoc;

/// Register every route on an app; shared by `run` and the integration tests.
pub fn configure_app(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/api").configure(form::config))
        .service(
            SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-doc/openapi.json", ApiDoc::openapi()),
        );
}

pub async fn run() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::from_env()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

    if !config.logo_path.exists() {
        log::warn!(
            "Logo {} not found; reports will show a placeholder",
            config.logo_path.display()
        );
    }

    let app_state = web::Data::new(AppState::new(&config));

    let prometheus = PrometheusMetricsBuilder::new("service_report_server")
        .endpoint("/metrics")
        .build()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;

    log::info!("Starting server at http://{}:{}", config.host, config.port);

    let max_payload_bytes = config.max_payload_bytes;
    let allowed_origins = config.allowed_origins.clone();

    HttpServer::new(move || {
        let cors = allowed_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
            .allowed_methods(vec!["GET", "POST", "DELETE", "OPTIONS"])
            .allowed_headers(vec![header::ACCEPT, header::CONTENT_TYPE])
            .expose_headers(vec![header::CONTENT_DISPOSITION])
            .max_age(3600);

        App::new()
            .wrap(Compress::default())
            .wrap(prometheus.clone())
            .wrap(cors)
            .app_data(app_state.clone())
            .app_data(web::JsonConfig::default().limit(max_payload_bytes))
            .configure(configure_app)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
