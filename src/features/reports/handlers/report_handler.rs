use std::sync::Arc;

use axum::{
    extract::{Multipart, Query, State},
    http::StatusCode,
    Json,
};
use tracing::debug;

use crate::core::error::{AppError, Result};
use crate::features::reports::dtos::{
    is_image_type_allowed, normalize_content_type, ImageUpload, ListReportsQuery,
    ReportSubmissionForm, SubmitReportForm, ALLOWED_IMAGE_TYPES, MAX_IMAGE_SIZE,
};
use crate::features::reports::models::Report;
use crate::features::reports::services::ReportService;
use crate::shared::types::ApiResponse;

async fn read_text(field: axum::extract::multipart::Field<'_>, name: &str) -> Result<String> {
    field
        .text()
        .await
        .map_err(|e| AppError::BadRequest(format!("Failed to read {} field: {}", name, e)))
}

/// Submit a new report
///
/// Accepts multipart/form-data with `description`, `problemType`, `location`
/// (JSON `{latitude, longitude}`), `locationn`, `userId` and an optional `image`.
#[utoipa::path(
    post,
    path = "/api/reports",
    tag = "reports",
    request_body(
        content = SubmitReportForm,
        content_type = "multipart/form-data",
        description = "Report fields with an optional photo",
    ),
    responses(
        (status = 201, description = "Report created", body = Report),
        (status = 400, description = "Missing or malformed field", body = ApiResponse<String>),
        (status = 413, description = "Payload too large"),
        (status = 500, description = "Photo upload or store failure", body = ApiResponse<String>)
    )
)]
pub async fn submit_report(
    State(service): State<Arc<ReportService>>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<Report>)> {
    let mut form = ReportSubmissionForm::default();

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        debug!("Failed to read multipart field: {}", e);
        AppError::BadRequest(format!("Failed to read multipart data: {}", e))
    })? {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "description" => form.description = Some(read_text(field, "description").await?),
            "problemType" => form.problem_type = Some(read_text(field, "problemType").await?),
            "location" => form.location = Some(read_text(field, "location").await?),
            "locationn" => form.locationn = Some(read_text(field, "locationn").await?),
            "userId" => form.user_id = Some(read_text(field, "userId").await?),
            "image" => {
                let content_type = field
                    .content_type()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "application/octet-stream".to_string());

                let data = field.bytes().await.map_err(|e| {
                    debug!("Failed to read image bytes: {}", e);
                    AppError::BadRequest(format!("Failed to read image data: {}", e))
                })?;

                // An empty file input means no photo was chosen
                if data.is_empty() {
                    continue;
                }

                if data.len() > MAX_IMAGE_SIZE {
                    return Err(AppError::BadRequest(format!(
                        "Image too large. Maximum size is {} MB",
                        MAX_IMAGE_SIZE / 1024 / 1024
                    )));
                }

                if !is_image_type_allowed(&content_type) {
                    return Err(AppError::BadRequest(format!(
                        "Image type '{}' is not allowed. Allowed types: {}",
                        content_type,
                        ALLOWED_IMAGE_TYPES.join(", ")
                    )));
                }

                form.image = Some(ImageUpload {
                    data: data.to_vec(),
                    content_type: normalize_content_type(&content_type),
                });
            }
            _ => {
                debug!("Ignoring unknown field: {}", field_name);
            }
        }
    }

    let submission = form.into_submission()?;
    let report = service.submit(submission).await?;

    Ok((StatusCode::CREATED, Json(report)))
}

/// List a user's reports, newest first
#[utoipa::path(
    get,
    path = "/api/reports",
    tag = "reports",
    params(ListReportsQuery),
    responses(
        (status = 200, description = "The user's full report history", body = Vec<Report>),
        (status = 400, description = "userId is missing", body = ApiResponse<String>),
        (status = 500, description = "Store failure", body = ApiResponse<String>)
    )
)]
pub async fn list_reports(
    State(service): State<Arc<ReportService>>,
    Query(query): Query<ListReportsQuery>,
) -> Result<Json<Vec<Report>>> {
    let user_id = query
        .user_id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("User ID is required".to_string()))?;

    let reports = service.list_by_user(&user_id).await?;
    Ok(Json(reports))
}
