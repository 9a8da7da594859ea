use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::reports::models::{NewReport, Report};

/// Persistence for reports. Records are written once and never updated.
#[async_trait]
pub trait ReportStore: Send + Sync {
    /// Persist a report and return it with its assigned id
    async fn insert(&self, report: NewReport) -> Result<Report>;

    /// All reports owned by `user_id`, newest first
    async fn find_by_user(&self, user_id: &str) -> Result<Vec<Report>>;
}

/// Postgres-backed report store.
///
/// Ids are UUID v7 so that `id DESC` breaks timestamp ties in insertion order.
pub struct PgReportStore {
    pool: PgPool,
}

impl PgReportStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReportStore for PgReportStore {
    async fn insert(&self, report: NewReport) -> Result<Report> {
        sqlx::query_as::<_, Report>(
            r#"
            INSERT INTO reports
                (id, description, problem_type, latitude, longitude, locationn, image_uri, user_id, submitted_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING
                id, description, problem_type, latitude, longitude,
                locationn, image_uri, user_id, submitted_at
            "#,
        )
        .bind(Uuid::now_v7())
        .bind(&report.description)
        .bind(report.problem_type.as_str())
        .bind(report.location.latitude)
        .bind(report.location.longitude)
        .bind(&report.locationn)
        .bind(&report.image_uri)
        .bind(&report.user_id)
        .bind(report.timestamp)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert report: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn find_by_user(&self, user_id: &str) -> Result<Vec<Report>> {
        sqlx::query_as::<_, Report>(
            r#"
            SELECT
                id, description, problem_type, latitude, longitude,
                locationn, image_uri, user_id, submitted_at
            FROM reports
            WHERE user_id = $1
            ORDER BY submitted_at DESC, id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list reports for user {}: {:?}", user_id, e);
            AppError::Database(e)
        })
    }
}
