use actix_multipart::Multipart;
use actix_web::http::header::{
    Charset, ContentDisposition, DispositionParam, DispositionType, ExtendedValue,
};
use actix_web::{web, HttpResponse, Responder};
use log::{error, info, warn};
use uuid::Uuid;

use crate::form::models::{
    ActivityListResponse, ActivityUploadForm, ExportRequest, FormOptions, SessionCreated,
    ValidationErrorResponse,
};
use crate::form::multipart_parser::MultipartParser;
use crate::report::common::{ascii_filename, DOCX_MIME};
use crate::report::models::ReportRequest;
use crate::report::traits::Generator;
use crate::report::{GeneratedReport, ReportError};
use crate::session::SharedStore;
use crate::{AppState, ErrorResponse};

impl From<ReportError> for HttpResponse {
    fn from(error: ReportError) -> Self {
        match error {
            ReportError::Validation(ref errors) => {
                HttpResponse::BadRequest().json(ValidationErrorResponse::new(errors))
            }
            ReportError::InvalidImage { .. } | ReportError::EmptyActivity { .. } => {
                HttpResponse::UnprocessableEntity()
                    .json(ErrorResponse::new("AssemblyFailure", &error.to_string()))
            }
            ReportError::Pack(_) => HttpResponse::InternalServerError()
                .json(ErrorResponse::internal_error(&error.to_string())),
        }
    }
}

async fn session_store(data: &web::Data<AppState>, id: &Uuid) -> Result<SharedStore, HttpResponse> {
    data.sessions.get(id).await.ok_or_else(|| {
        HttpResponse::NotFound().json(ErrorResponse::not_found(&format!(
            "Session {} not found or expired",
            id
        )))
    })
}

fn activity_list(store: &SharedStore) -> ActivityListResponse {
    ActivityListResponse::from_activities(store.lock().list())
}

/// Run generation off the async workers and turn the outcome into a download.
async fn generate_download(data: &web::Data<AppState>, request: ReportRequest) -> HttpResponse {
    let generator = data.generator.clone();
    let outcome = web::block(move || generator.generate(request)).await;

    match outcome {
        Ok(Ok(report)) => download_response(report),
        Ok(Err(e)) => {
            match &e {
                ReportError::Validation(_) => warn!("Report export rejected: {}", e),
                _ => error!("Report export failed: {}", e),
            }
            e.into()
        }
        Err(e) => {
            error!("Report generation task failed: {}", e);
            HttpResponse::InternalServerError()
                .json(ErrorResponse::internal_error("Report generation failed"))
        }
    }
}

fn download_response(report: GeneratedReport) -> HttpResponse {
    info!("Serving report {}", report.filename);
    HttpResponse::Ok()
        .content_type(DOCX_MIME)
        .insert_header(attachment(report.filename))
        .body(report.docx)
}

/// `attachment` disposition with an ASCII `filename` and, for names outside
/// ASCII, a UTF-8 `filename*`.
fn attachment(filename: String) -> ContentDisposition {
    let mut parameters = vec![DispositionParam::Filename(ascii_filename(&filename))];
    if !filename.is_ascii() {
        parameters.push(DispositionParam::FilenameExt(ExtendedValue {
            charset: Charset::Ext("UTF-8".to_string()),
            language_tag: None,
            value: filename.into_bytes(),
        }));
    }
    ContentDisposition {
        disposition: DispositionType::Attachment,
        parameters,
    }
}

#[utoipa::path(
    context_path = "/api",
    tag = "Report Form",
    get,
    path = "/form-options",
    responses(
        (status = 200, description = "Activity title vocabulary and default texts", body = FormOptions)
    )
)]
pub async fn get_form_options() -> impl Responder {
    HttpResponse::Ok().json(FormOptions::default())
}

#[utoipa::path(
    context_path = "/api",
    tag = "Report Form",
    post,
    path = "/sessions",
    responses(
        (status = 201, description = "Session created", body = SessionCreated)
    )
)]
pub async fn create_session(data: web::Data<AppState>) -> impl Responder {
    let session_id = data.sessions.create().await;
    HttpResponse::Created().json(SessionCreated { session_id })
}

#[utoipa::path(
    context_path = "/api",
    tag = "Report Form",
    delete,
    path = "/sessions/{id}",
    responses(
        (status = 204, description = "Session ended and its activities discarded"),
        (status = 404, description = "Session not found", body = ErrorResponse)
    ),
    params(
        ("id" = Uuid, Path, description = "Session ID")
    )
)]
pub async fn end_session(id: web::Path<Uuid>, data: web::Data<AppState>) -> impl Responder {
    let id = id.into_inner();
    if data.sessions.end(&id).await {
        HttpResponse::NoContent().finish()
    } else {
        HttpResponse::NotFound().json(ErrorResponse::not_found("Session not found"))
    }
}

#[utoipa::path(
    context_path = "/api",
    tag = "Report Form",
    get,
    path = "/sessions/{id}/activities",
    responses(
        (status = 200, description = "Activities added so far", body = ActivityListResponse),
        (status = 404, description = "Session not found", body = ErrorResponse)
    ),
    params(
        ("id" = Uuid, Path, description = "Session ID")
    )
)]
pub async fn list_activities(id: web::Path<Uuid>, data: web::Data<AppState>) -> impl Responder {
    match session_store(&data, &id.into_inner()).await {
        Ok(store) => HttpResponse::Ok().json(activity_list(&store)),
        Err(response) => response,
    }
}

#[utoipa::path(
    context_path = "/api",
    tag = "Report Form",
    post,
    path = "/sessions/{id}/activities",
    request_body(content = inline(ActivityUploadForm), content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Activity added", body = ActivityListResponse),
        (status = 400, description = "Missing fields or unsupported photo", body = ValidationErrorResponse),
        (status = 404, description = "Session not found", body = ErrorResponse),
        (status = 413, description = "A photo or the whole upload exceeds the size limit", body = ErrorResponse)
    ),
    params(
        ("id" = Uuid, Path, description = "Session ID")
    )
)]
pub async fn add_activity(
    id: web::Path<Uuid>,
    payload: Multipart,
    data: web::Data<AppState>,
) -> impl Responder {
    let id = id.into_inner();
    let store = match session_store(&data, &id).await {
        Ok(store) => store,
        Err(response) => return response,
    };

    let parsed = MultipartParser::parse_activity_multipart(payload, data.upload_limits).await;
    let form = match parsed {
        Ok(form) => form,
        Err(e) => {
            warn!("Activity upload for session {} rejected: {}", id, e);
            return e.into();
        }
    };

    let activity = match form
        .metadata
        .into_activity(form.images, form.before_images, form.after_images)
    {
        Ok(activity) => activity,
        Err(errors) => {
            return HttpResponse::BadRequest().json(ValidationErrorResponse::new(&errors));
        }
    };

    info!(
        "Session {}: adding activity '{}' with {} photo(s)",
        id,
        activity.title,
        activity.image_count()
    );

    let response = {
        let mut guard = store.lock();
        guard.append(activity);
        ActivityListResponse::from_activities(guard.list())
    };
    HttpResponse::Created().json(response)
}

#[utoipa::path(
    context_path = "/api",
    tag = "Report Form",
    delete,
    path = "/sessions/{id}/activities/{index}",
    responses(
        (status = 200, description = "Activity removed", body = ActivityListResponse),
        (status = 404, description = "Session not found or index out of range", body = ErrorResponse)
    ),
    params(
        ("id" = Uuid, Path, description = "Session ID"),
        ("index" = usize, Path, description = "Zero-based position of the activity")
    )
)]
pub async fn remove_activity(
    path: web::Path<(Uuid, usize)>,
    data: web::Data<AppState>,
) -> impl Responder {
    let (id, index) = path.into_inner();
    let store = match session_store(&data, &id).await {
        Ok(store) => store,
        Err(response) => return response,
    };

    let mut guard = store.lock();
    let response = match guard.remove_at(index) {
        Ok(removed) => {
            info!("Session {}: removed activity '{}'", id, removed.title);
            HttpResponse::Ok().json(ActivityListResponse::from_activities(guard.list()))
        }
        Err(e) => HttpResponse::NotFound().json(ErrorResponse::not_found(&e.to_string())),
    };
    response
}

#[utoipa::path(
    context_path = "/api",
    tag = "Report Form",
    delete,
    path = "/sessions/{id}/activities",
    responses(
        (status = 200, description = "All activities removed", body = ActivityListResponse),
        (status = 404, description = "Session not found", body = ErrorResponse)
    ),
    params(
        ("id" = Uuid, Path, description = "Session ID")
    )
)]
pub async fn clear_activities(id: web::Path<Uuid>, data: web::Data<AppState>) -> impl Responder {
    let id = id.into_inner();
    match session_store(&data, &id).await {
        Ok(store) => {
            store.lock().clear();
            info!("Session {}: cleared all activities", id);
            HttpResponse::Ok().json(activity_list(&store))
        }
        Err(response) => response,
    }
}

#[utoipa::path(
    context_path = "/api",
    tag = "Report Form",
    post,
    path = "/sessions/{id}/report",
    request_body = ExportRequest,
    responses(
        (status = 200, description = "Generated DOCX report served as an attachment"),
        (status = 400, description = "Missing fields or no activities", body = ValidationErrorResponse),
        (status = 404, description = "Session not found", body = ErrorResponse),
        (status = 422, description = "A photo could not be embedded", body = ErrorResponse),
        (status = 500, description = "Internal Server Error", body = ErrorResponse)
    ),
    params(
        ("id" = Uuid, Path, description = "Session ID")
    )
)]
pub async fn export_session_report(
    id: web::Path<Uuid>,
    req: web::Json<ExportRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    let id = id.into_inner();
    let store = match session_store(&data, &id).await {
        Ok(store) => store,
        Err(response) => return response,
    };

    let ExportRequest { company, client } = req.into_inner();
    let activities = store.lock().list().to_vec();
    info!(
        "Session {}: exporting report with {} activities",
        id,
        activities.len()
    );

    generate_download(
        &data,
        ReportRequest {
            company,
            client,
            activities,
        },
    )
    .await
}

#[utoipa::path(
    context_path = "/api",
    tag = "Report Form",
    post,
    path = "/reports",
    request_body = ReportRequest,
    responses(
        (status = 200, description = "Generated DOCX report served as an attachment"),
        (status = 400, description = "Missing fields or no activities", body = ValidationErrorResponse),
        (status = 422, description = "A photo could not be embedded", body = ErrorResponse),
        (status = 500, description = "Internal Server Error", body = ErrorResponse)
    )
)]
pub async fn generate_report(
    req: web::Json<ReportRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    generate_download(&data, req.into_inner()).await
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/form-options").route(web::get().to(get_form_options)))
        .service(web::resource("/sessions").route(web::post().to(create_session)))
        .service(web::resource("/sessions/{id}").route(web::delete().to(end_session)))
        .service(
            web::resource("/sessions/{id}/activities")
                .route(web::get().to(list_activities))
                .route(web::post().to(add_activity))
                .route(web::delete().to(clear_activities)),
        )
        .service(
            web::resource("/sessions/{id}/activities/{index}")
                .route(web::delete().to(remove_activity)),
        )
        .service(web::resource("/sessions/{id}/report").route(web::post().to(export_session_report)))
        .service(web::resource("/reports").route(web::post().to(generate_report)));
}
