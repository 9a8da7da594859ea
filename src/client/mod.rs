//! Client side of the reporting flow: the app's report composer and the
//! HTTP client it talks to the backend with.

pub mod api_client;
pub mod composer;
pub mod location;
pub mod session;

pub use api_client::{ClientError, PhotoAttachment, ReportDraft, ReportsApiClient};
pub use composer::{ReportComposer, SubmissionState};
pub use location::{FixedLocation, LocationProvider, DEFAULT_LOCATION};
pub use session::SessionContext;
