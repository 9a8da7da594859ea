mod profile_store;
mod user_profile_service;

pub use profile_store::{PgProfileStore, ProfileStore};
pub use user_profile_service::UserProfileService;
