use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::users::dtos::UpsertProfileDto;
use crate::features::users::models::UserProfile;
use crate::features::users::services::ProfileStore;

/// Service for reading and replacing user profiles
pub struct UserProfileService {
    store: Arc<dyn ProfileStore>,
}

impl UserProfileService {
    pub fn new(store: Arc<dyn ProfileStore>) -> Self {
        Self { store }
    }

    pub async fn get_profile(&self, user_id: &str) -> Result<UserProfile> {
        self.store
            .find(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User profile not found".to_string()))
    }

    /// Last write wins; there is no version check between concurrent writers
    pub async fn upsert_profile(
        &self,
        user_id: &str,
        dto: UpsertProfileDto,
    ) -> Result<UserProfile> {
        let profile = self.store.upsert(user_id, dto.normalized()).await?;
        tracing::info!("Upserted profile for user: {}", user_id);
        Ok(profile)
    }
}
