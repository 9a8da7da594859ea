use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::users::dtos::UpsertProfileDto;
use crate::features::users::models::UserProfile;
use crate::features::users::services::UserProfileService;
use crate::shared::types::ApiResponse;
use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;
use validator::Validate;

#[utoipa::path(
    get,
    path = "/api/users/{user_id}",
    params(
        ("user_id" = String, Path, description = "Owner of the profile")
    ),
    responses(
        (status = 200, description = "Profile retrieved successfully", body = UserProfile),
        (status = 404, description = "User profile not found", body = ApiResponse<String>)
    ),
    tag = "users"
)]
pub async fn get_profile(
    State(service): State<Arc<UserProfileService>>,
    Path(user_id): Path<String>,
) -> Result<Json<UserProfile>> {
    let profile = service.get_profile(&user_id).await?;
    Ok(Json(profile))
}

#[utoipa::path(
    put,
    path = "/api/users/{user_id}",
    params(
        ("user_id" = String, Path, description = "Owner of the profile")
    ),
    request_body = UpsertProfileDto,
    responses(
        (status = 200, description = "Profile created or replaced", body = UserProfile),
        (status = 400, description = "Validation error", body = ApiResponse<String>)
    ),
    tag = "users"
)]
pub async fn upsert_profile(
    State(service): State<Arc<UserProfileService>>,
    Path(user_id): Path<String>,
    AppJson(dto): AppJson<UpsertProfileDto>,
) -> Result<Json<UserProfile>> {
    let dto = dto.normalized();
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let profile = service.upsert_profile(&user_id, dto).await?;
    Ok(Json(profile))
}
