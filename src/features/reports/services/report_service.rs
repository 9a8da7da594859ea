use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::core::error::Result;
use crate::features::reports::dtos::ReportSubmission;
use crate::features::reports::models::{NewReport, Report};
use crate::features::reports::services::ReportStore;
use crate::modules::storage::MediaStore;

/// Orchestrates report submission (photo upload, then insert) and listing
pub struct ReportService {
    store: Arc<dyn ReportStore>,
    media_store: Arc<dyn MediaStore>,
}

impl ReportService {
    pub fn new(store: Arc<dyn ReportStore>, media_store: Arc<dyn MediaStore>) -> Self {
        Self { store, media_store }
    }

    /// Upload the photo if there is one, then persist the report.
    ///
    /// A failed upload aborts the submission. If the upload succeeds but the
    /// insert fails, the uploaded object is left in the media store.
    pub async fn submit(&self, submission: ReportSubmission) -> Result<Report> {
        let image_uri = match submission.image {
            Some(image) => {
                let size = image.data.len();
                let url = self
                    .media_store
                    .upload_image(image.data, &image.content_type)
                    .await?;
                debug!("Uploaded report photo ({} bytes): {}", size, url);
                url
            }
            None => String::new(),
        };

        let new_report = NewReport {
            description: submission.description,
            problem_type: submission.problem_type,
            location: submission.location,
            locationn: submission.locationn,
            image_uri,
            user_id: submission.user_id,
            timestamp: Utc::now(),
        };

        let orphan_candidate = new_report.image_uri.clone();
        let report = self.store.insert(new_report).await.inspect_err(|_| {
            if !orphan_candidate.is_empty() {
                warn!(
                    "Report insert failed after photo upload; orphaned media: {}",
                    orphan_candidate
                );
            }
        })?;

        info!(
            "Created report: {} ({}) for user: {}",
            report.id, report.problem_type, report.user_id
        );

        Ok(report)
    }

    /// Full report history for a user, newest first
    pub async fn list_by_user(&self, user_id: &str) -> Result<Vec<Report>> {
        let reports = self.store.find_by_user(user_id).await?;
        debug!("Listed {} reports for user: {}", reports.len(), user_id);
        Ok(reports)
    }
}
