//! In-memory stand-ins for the stores and media service, used by router tests.

use async_trait::async_trait;
use axum_test::multipart::MultipartForm;
use chrono::Utc;
use sha2::{Digest, Sha256};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::reports::models::{NewReport, Report};
use crate::features::reports::{ReportService, ReportStore};
use crate::features::users::dtos::UpsertProfileDto;
use crate::features::users::models::UserProfile;
use crate::features::users::ProfileStore;
use crate::modules::storage::MediaStore;

#[derive(Default)]
pub struct InMemoryReportStore {
    reports: Mutex<Vec<Report>>,
}

impl InMemoryReportStore {
    /// Everything stored, in insertion order
    pub fn all(&self) -> Vec<Report> {
        self.reports.lock().unwrap().clone()
    }
}

#[async_trait]
impl ReportStore for InMemoryReportStore {
    async fn insert(&self, report: NewReport) -> Result<Report> {
        let report = report.into_report(Uuid::now_v7());
        self.reports.lock().unwrap().push(report.clone());
        Ok(report)
    }

    async fn find_by_user(&self, user_id: &str) -> Result<Vec<Report>> {
        let mut found: Vec<Report> = self
            .reports
            .lock()
            .unwrap()
            .iter()
            .rev()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        // Stable sort keeps later inserts first on equal timestamps
        found.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(found)
    }
}

/// Media store whose URL is derived from the payload's SHA-256
#[derive(Default)]
pub struct InMemoryMediaStore {
    uploads: Mutex<Vec<(String, Vec<u8>)>>,
}

impl InMemoryMediaStore {
    pub fn url_for(data: &[u8]) -> String {
        format!(
            "https://media.test/reports/{}",
            hex::encode(Sha256::digest(data))
        )
    }

    pub fn upload_count(&self) -> usize {
        self.uploads.lock().unwrap().len()
    }
}

#[async_trait]
impl MediaStore for InMemoryMediaStore {
    async fn upload_image(&self, data: Vec<u8>, _content_type: &str) -> Result<String> {
        let url = Self::url_for(&data);
        self.uploads.lock().unwrap().push((url.clone(), data));
        Ok(url)
    }
}

/// Media store that is always unreachable
pub struct FailingMediaStore;

#[async_trait]
impl MediaStore for FailingMediaStore {
    async fn upload_image(&self, _data: Vec<u8>, _content_type: &str) -> Result<String> {
        Err(AppError::ExternalServiceError(
            "media store unreachable".to_string(),
        ))
    }
}

#[derive(Default)]
pub struct InMemoryProfileStore {
    profiles: Mutex<Vec<UserProfile>>,
}

#[async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn find(&self, user_id: &str) -> Result<Option<UserProfile>> {
        Ok(self
            .profiles
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.user_id == user_id)
            .cloned())
    }

    async fn upsert(&self, user_id: &str, profile: UpsertProfileDto) -> Result<UserProfile> {
        let saved = UserProfile {
            user_id: user_id.to_string(),
            gender: profile.gender,
            address: profile.address,
            phone_number: profile.phone_number,
            profile_pic_url: profile.profile_pic_url,
            updated_at: Utc::now(),
        };

        let mut profiles = self.profiles.lock().unwrap();
        profiles.retain(|p| p.user_id != user_id);
        profiles.push(saved.clone());
        Ok(saved)
    }
}

pub fn test_report_service(
    store: Arc<InMemoryReportStore>,
    media: Arc<InMemoryMediaStore>,
) -> Arc<ReportService> {
    Arc::new(ReportService::new(store, media))
}

/// Multipart form with every required field, located at (23.34, 85.31)
pub fn report_form(description: &str, problem_type: &str, user_id: &str) -> MultipartForm {
    MultipartForm::new()
        .add_text("description", description.to_string())
        .add_text("problemType", problem_type.to_string())
        .add_text("location", r#"{"latitude":23.34,"longitude":85.31}"#)
        .add_text("userId", user_id.to_string())
}
