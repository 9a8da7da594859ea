use async_trait::async_trait;

use super::api_client::ClientError;
use crate::features::reports::models::Location;

/// Coordinates used before the device reports a position (Ranchi)
pub const DEFAULT_LOCATION: Location = Location {
    latitude: 23.3441,
    longitude: 85.3096,
};

/// Source of the device's current position.
///
/// Implementations may wait on a permission prompt or a GPS fix; a denial or
/// timeout comes back as [`ClientError::Location`].
#[async_trait]
pub trait LocationProvider: Send + Sync {
    async fn current_position(&self) -> Result<Location, ClientError>;
}

/// Provider that always answers with the same coordinates
#[derive(Debug, Clone, Copy)]
pub struct FixedLocation(pub Location);

#[async_trait]
impl LocationProvider for FixedLocation {
    async fn current_position(&self) -> Result<Location, ClientError> {
        Ok(self.0)
    }
}
