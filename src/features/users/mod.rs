//! User profiles keyed by the auth provider's user id.
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/users/{userId}` | Fetch a profile (404 if none) |
//! | PUT | `/api/users/{userId}` | Create or replace a profile |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use routes::routes;
pub use services::{PgProfileStore, ProfileStore, UserProfileService};
