use reqwest::{multipart, Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;

use super::session::SessionContext;
use crate::features::reports::models::{Location, ProblemType, Report};
use crate::features::users::dtos::UpsertProfileDto;
use crate::features::users::models::UserProfile;
use crate::shared::types::ApiResponse;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status
    #[error("Server rejected request ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Failed to read photo: {0}")]
    Io(#[from] std::io::Error),

    #[error("Location unavailable: {0}")]
    Location(String),
}

/// Photo bytes as they go over the wire
#[derive(Debug, Clone)]
pub struct PhotoAttachment {
    pub data: Vec<u8>,
    pub file_name: String,
    pub content_type: String,
}

/// Everything the submission endpoint needs for one report
#[derive(Debug, Clone)]
pub struct ReportDraft {
    pub description: String,
    pub problem_type: ProblemType,
    pub location: Location,
    pub locationn: String,
    pub photo: Option<PhotoAttachment>,
}

/// HTTP client for the reports backend
#[derive(Debug, Clone)]
pub struct ReportsApiClient {
    base_url: String,
    http_client: Client,
}

impl ReportsApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http_client: Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POST the draft as multipart/form-data on behalf of the session's user
    pub async fn submit_report(
        &self,
        session: &SessionContext,
        draft: ReportDraft,
    ) -> Result<Report, ClientError> {
        let location = serde_json::to_string(&draft.location).map_err(|e| {
            ClientError::Location(format!("Failed to encode coordinates: {}", e))
        })?;

        let mut form = multipart::Form::new()
            .text("description", draft.description)
            .text("problemType", draft.problem_type.as_str())
            .text("location", location)
            .text("locationn", draft.locationn)
            .text("userId", session.user_id().to_string());

        if let Some(photo) = draft.photo {
            let part = multipart::Part::bytes(photo.data)
                .file_name(photo.file_name)
                .mime_str(&photo.content_type)?;
            form = form.part("image", part);
        }

        tracing::debug!("Submitting report for user {}", session.user_id());

        let response = self
            .http_client
            .post(format!("{}/api/reports", self.base_url))
            .multipart(form)
            .send()
            .await?;

        parse_response(response).await
    }

    /// The session user's reports, newest first
    pub async fn list_reports(&self, session: &SessionContext) -> Result<Vec<Report>, ClientError> {
        let url = format!(
            "{}/api/reports?userId={}",
            self.base_url,
            urlencoding::encode(session.user_id())
        );

        let response = self.http_client.get(url).send().await?;
        parse_response(response).await
    }

    /// Returns `None` when the user has not saved a profile yet
    pub async fn get_profile(
        &self,
        session: &SessionContext,
    ) -> Result<Option<UserProfile>, ClientError> {
        let response = self
            .http_client
            .get(self.profile_url(session))
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        parse_response(response).await.map(Some)
    }

    pub async fn update_profile(
        &self,
        session: &SessionContext,
        profile: &UpsertProfileDto,
    ) -> Result<UserProfile, ClientError> {
        let response = self
            .http_client
            .put(self.profile_url(session))
            .json(profile)
            .send()
            .await?;

        parse_response(response).await
    }

    fn profile_url(&self, session: &SessionContext) -> String {
        format!(
            "{}/api/users/{}",
            self.base_url,
            urlencoding::encode(session.user_id())
        )
    }
}

async fn parse_response<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();

    if status.is_success() {
        return Ok(response.json::<T>().await?);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ApiResponse<serde_json::Value>>(&body)
        .ok()
        .and_then(|r| r.message)
        .unwrap_or(body);

    tracing::warn!("Backend rejected request: HTTP {} - {}", status, message);
    Err(ClientError::Rejected {
        status: status.as_u16(),
        message,
    })
}
