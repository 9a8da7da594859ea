use async_trait::async_trait;
use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::users::dtos::UpsertProfileDto;
use crate::features::users::models::UserProfile;

/// Persistence for user profiles
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn find(&self, user_id: &str) -> Result<Option<UserProfile>>;

    /// Create the profile or replace every field of an existing one
    async fn upsert(&self, user_id: &str, profile: UpsertProfileDto) -> Result<UserProfile>;
}

/// Postgres-backed profile store
pub struct PgProfileStore {
    pool: PgPool,
}

impl PgProfileStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileStore for PgProfileStore {
    async fn find(&self, user_id: &str) -> Result<Option<UserProfile>> {
        sqlx::query_as::<_, UserProfile>(
            r#"
            SELECT user_id, gender, address, phone_number, profile_pic_url, updated_at
            FROM user_profiles
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch profile {}: {:?}", user_id, e);
            AppError::Database(e)
        })
    }

    async fn upsert(&self, user_id: &str, profile: UpsertProfileDto) -> Result<UserProfile> {
        sqlx::query_as::<_, UserProfile>(
            r#"
            INSERT INTO user_profiles (user_id, gender, address, phone_number, profile_pic_url)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (user_id) DO UPDATE SET
                gender = EXCLUDED.gender,
                address = EXCLUDED.address,
                phone_number = EXCLUDED.phone_number,
                profile_pic_url = EXCLUDED.profile_pic_url,
                updated_at = NOW()
            RETURNING user_id, gender, address, phone_number, profile_pic_url, updated_at
            "#,
        )
        .bind(user_id)
        .bind(&profile.gender)
        .bind(&profile.address)
        .bind(&profile.phone_number)
        .bind(&profile.profile_pic_url)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to upsert profile {}: {:?}", user_id, e);
            AppError::Database(e)
        })
    }
}
