use std::path::{Path, PathBuf};

use super::api_client::{ClientError, PhotoAttachment, ReportDraft, ReportsApiClient};
use super::location::{LocationProvider, DEFAULT_LOCATION};
use super::session::SessionContext;
use crate::features::reports::models::{Location, ProblemType, Report};

/// Where the composer is in the submit flow
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionState {
    Idle,
    Submitting,
    Submitted(Report),
    Failed(String),
}

/// Local form state behind the "report a new issue" screen
#[derive(Debug, Clone)]
pub struct ReportComposer {
    description: String,
    problem_type: ProblemType,
    landmark: String,
    photo: Option<PathBuf>,
    location: Location,
    state: SubmissionState,
}

impl Default for ReportComposer {
    fn default() -> Self {
        Self {
            description: String::new(),
            problem_type: ProblemType::default(),
            landmark: String::new(),
            photo: None,
            location: DEFAULT_LOCATION,
            state: SubmissionState::Idle,
        }
    }
}

/// Half-width in degrees of the map preview box around the marker
const MAP_PREVIEW_SPAN: f64 = 0.005;

/// MIME type for a photo, guessed from its extension
fn photo_content_type(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match extension.as_deref() {
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("heic") => "image/heic",
        Some("heif") => "image/heif",
        _ => "image/jpeg",
    }
}

impl ReportComposer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn problem_type(&self) -> ProblemType {
        self.problem_type
    }

    pub fn landmark(&self) -> &str {
        &self.landmark
    }

    pub fn photo(&self) -> Option<&Path> {
        self.photo.as_deref()
    }

    pub fn location(&self) -> Location {
        self.location
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
        self.touch();
    }

    pub fn set_problem_type(&mut self, problem_type: ProblemType) {
        self.problem_type = problem_type;
        self.touch();
    }

    pub fn set_landmark(&mut self, landmark: impl Into<String>) {
        self.landmark = landmark.into();
        self.touch();
    }

    pub fn attach_photo(&mut self, path: impl Into<PathBuf>) {
        self.photo = Some(path.into());
        self.touch();
    }

    pub fn remove_photo(&mut self) {
        self.photo = None;
        self.touch();
    }

    pub fn set_location(&mut self, location: Location) {
        self.location = location;
        self.touch();
    }

    /// Replace the coordinates with the device's current position.
    ///
    /// On failure the previous coordinates are kept and the error is returned.
    pub async fn use_current_position(
        &mut self,
        provider: &dyn LocationProvider,
    ) -> Result<Location, ClientError> {
        let location = provider.current_position().await?;
        self.set_location(location);
        Ok(location)
    }

    /// OpenStreetMap embed showing a marker at the current coordinates
    pub fn map_preview_url(&self) -> String {
        let Location {
            latitude,
            longitude,
        } = self.location;
        format!(
            "https://www.openstreetmap.org/export/embed.html?bbox={},{},{},{}&layer=mapnik&marker={},{}",
            longitude - MAP_PREVIEW_SPAN,
            latitude - MAP_PREVIEW_SPAN,
            longitude + MAP_PREVIEW_SPAN,
            latitude + MAP_PREVIEW_SPAN,
            latitude,
            longitude
        )
    }

    /// Send the form in one round trip.
    ///
    /// Success clears the text fields and photo and keeps the coordinates.
    /// Failure leaves the form as it was so the user can fix it and resubmit.
    pub async fn submit(
        &mut self,
        api: &ReportsApiClient,
        session: &SessionContext,
    ) -> Result<Report, ClientError> {
        self.state = SubmissionState::Submitting;

        match self.send(api, session).await {
            Ok(report) => {
                tracing::info!("Report {} submitted", report.id);
                self.clear();
                self.state = SubmissionState::Submitted(report.clone());
                Ok(report)
            }
            Err(e) => {
                let message = match &e {
                    ClientError::Rejected { message, .. } => message.clone(),
                    other => other.to_string(),
                };
                self.state = SubmissionState::Failed(message);
                Err(e)
            }
        }
    }

    async fn send(
        &self,
        api: &ReportsApiClient,
        session: &SessionContext,
    ) -> Result<Report, ClientError> {
        let photo = match &self.photo {
            Some(path) => {
                let data = tokio::fs::read(path).await?;
                let content_type = photo_content_type(path);
                let extension = content_type.trim_start_matches("image/");
                Some(PhotoAttachment {
                    data,
                    file_name: format!("photo.{}", extension),
                    content_type: content_type.to_string(),
                })
            }
            None => None,
        };

        let draft = ReportDraft {
            description: self.description.clone(),
            problem_type: self.problem_type,
            location: self.location,
            locationn: self.landmark.clone(),
            photo,
        };

        api.submit_report(session, draft).await
    }

    fn clear(&mut self) {
        self.description.clear();
        self.problem_type = ProblemType::default();
        self.landmark.clear();
        self.photo = None;
    }

    /// Any edit after a finished submission starts a new one
    fn touch(&mut self) {
        if matches!(
            self.state,
            SubmissionState::Submitted(_) | SubmissionState::Failed(_)
        ) {
            self.state = SubmissionState::Idle;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::location::FixedLocation;
    use crate::core::router::build_router;
    use crate::features::users::dtos::UpsertProfileDto;
    use crate::features::users::UserProfileService;
    use crate::shared::test_helpers::{
        test_report_service, InMemoryMediaStore, InMemoryProfileStore, InMemoryReportStore,
    };
    use async_trait::async_trait;
    use std::sync::Arc;

    struct DeniedLocation;

    #[async_trait]
    impl LocationProvider for DeniedLocation {
        async fn current_position(&self) -> Result<Location, ClientError> {
            Err(ClientError::Location("permission denied".to_string()))
        }
    }

    /// Serve the full router on an ephemeral port and point a client at it
    async fn spawn_backend() -> (ReportsApiClient, Arc<InMemoryReportStore>) {
        let store = Arc::new(InMemoryReportStore::default());
        let reports = test_report_service(store.clone(), Arc::new(InMemoryMediaStore::default()));
        let profiles = Arc::new(UserProfileService::new(Arc::new(
            InMemoryProfileStore::default(),
        )));
        let app = build_router(reports, profiles, 1024 * 1024);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (ReportsApiClient::new(format!("http://{}", addr)), store)
    }

    #[test]
    fn test_new_composer_defaults() {
        let composer = ReportComposer::new();
        assert_eq!(composer.problem_type(), ProblemType::PublicWorks);
        assert_eq!(composer.location(), DEFAULT_LOCATION);
        assert_eq!(composer.state(), &SubmissionState::Idle);
        assert!(composer.photo().is_none());
    }

    #[test]
    fn test_photo_content_type_from_extension() {
        assert_eq!(photo_content_type(Path::new("a/b/shot.PNG")), "image/png");
        assert_eq!(photo_content_type(Path::new("shot.jpg")), "image/jpeg");
        assert_eq!(photo_content_type(Path::new("shot")), "image/jpeg");
    }

    #[test]
    fn test_map_preview_url_has_marker() {
        let mut composer = ReportComposer::new();
        composer.set_location(Location {
            latitude: 10.0,
            longitude: 20.0,
        });
        let url = composer.map_preview_url();
        assert!(url.ends_with("marker=10,20"));

        let bbox: Vec<f64> = url
            .split("bbox=")
            .nth(1)
            .and_then(|rest| rest.split('&').next())
            .unwrap()
            .split(',')
            .map(|v| v.parse().unwrap())
            .collect();
        assert_eq!(bbox.len(), 4);
        // The marker sits at the centre of the box
        assert!(((bbox[0] + bbox[2]) / 2.0 - 20.0).abs() < 1e-9);
        assert!(((bbox[1] + bbox[3]) / 2.0 - 10.0).abs() < 1e-9);
        assert!((bbox[2] - bbox[0] - 2.0 * MAP_PREVIEW_SPAN).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_use_current_position() {
        let mut composer = ReportComposer::new();
        let here = Location {
            latitude: 12.97,
            longitude: 77.59,
        };

        let got = composer
            .use_current_position(&FixedLocation(here))
            .await
            .unwrap();
        assert_eq!(got, here);
        assert_eq!(composer.location(), here);

        let err = composer.use_current_position(&DeniedLocation).await;
        assert!(matches!(err, Err(ClientError::Location(_))));
        assert_eq!(composer.location(), here);
    }

    #[tokio::test]
    async fn test_submit_clears_form_and_report_is_listed() {
        let (api, store) = spawn_backend().await;
        let session = SessionContext::sign_in("u1");

        let mut composer = ReportComposer::new();
        composer.set_description("Pothole on Main St");
        composer.set_problem_type(ProblemType::Roads);
        composer.set_landmark("Near the bus stop");

        let report = composer.submit(&api, &session).await.unwrap();
        assert_eq!(report.description, "Pothole on Main St");
        assert_eq!(report.problem_type, ProblemType::Roads);
        assert_eq!(report.location, DEFAULT_LOCATION);
        assert_eq!(report.locationn.as_deref(), Some("Near the bus stop"));
        assert_eq!(report.image_uri, "");

        assert_eq!(composer.state(), &SubmissionState::Submitted(report.clone()));
        assert_eq!(composer.description(), "");
        assert_eq!(composer.landmark(), "");
        assert_eq!(composer.problem_type(), ProblemType::PublicWorks);

        let listed = api.list_reports(&session).await.unwrap();
        assert_eq!(listed, vec![report]);
        assert_eq!(store.all().len(), 1);

        composer.set_description("Next one");
        assert_eq!(composer.state(), &SubmissionState::Idle);
    }

    #[tokio::test]
    async fn test_submit_uploads_photo() {
        let (api, _store) = spawn_backend().await;
        let session = SessionContext::sign_in("u2");

        let photo = vec![0x89, b'P', b'N', b'G', 1, 2, 3];
        let path = std::env::temp_dir().join(format!("{}.png", uuid::Uuid::new_v4()));
        tokio::fs::write(&path, &photo).await.unwrap();

        let mut composer = ReportComposer::new();
        composer.set_description("Broken street light");
        composer.set_problem_type(ProblemType::StreetLighting);
        composer.attach_photo(&path);

        let report = composer.submit(&api, &session).await.unwrap();
        assert_eq!(report.image_uri, InMemoryMediaStore::url_for(&photo));
        assert!(composer.photo().is_none());

        tokio::fs::remove_file(&path).await.unwrap();
    }

    #[tokio::test]
    async fn test_rejected_submission_can_be_resubmitted() {
        let (api, store) = spawn_backend().await;
        let session = SessionContext::sign_in("u3");

        let mut composer = ReportComposer::new();
        composer.set_landmark("Market square");

        let err = composer.submit(&api, &session).await.unwrap_err();
        assert!(matches!(err, ClientError::Rejected { status: 400, .. }));
        assert_eq!(
            composer.state(),
            &SubmissionState::Failed("description is required".to_string())
        );
        assert_eq!(composer.landmark(), "Market square");
        assert!(store.all().is_empty());

        composer.set_description("Garbage not collected");
        let report = composer.submit(&api, &session).await.unwrap();
        assert_eq!(report.locationn.as_deref(), Some("Market square"));
        assert!(matches!(composer.state(), SubmissionState::Submitted(_)));
    }

    #[tokio::test]
    async fn test_missing_photo_file_fails_without_request() {
        let (api, store) = spawn_backend().await;
        let session = SessionContext::sign_in("u4");

        let mut composer = ReportComposer::new();
        composer.set_description("Flooded road");
        composer.attach_photo(std::env::temp_dir().join("does-not-exist-4f1c.jpg"));

        let err = composer.submit(&api, &session).await.unwrap_err();
        assert!(matches!(err, ClientError::Io(_)));
        assert!(matches!(composer.state(), SubmissionState::Failed(_)));
        assert!(store.all().is_empty());
    }

    #[tokio::test]
    async fn test_profile_round_trip_through_client() {
        let (api, _store) = spawn_backend().await;
        let session = SessionContext::sign_in("user with spaces");

        assert_eq!(api.get_profile(&session).await.unwrap(), None);

        let saved = api
            .update_profile(
                &session,
                &UpsertProfileDto {
                    phone_number: Some("+911234567890".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(saved.user_id, "user with spaces");

        let fetched = api.get_profile(&session).await.unwrap().unwrap();
        assert_eq!(fetched.phone_number.as_deref(), Some("+911234567890"));

        let err = api
            .update_profile(
                &session,
                &UpsertProfileDto {
                    phone_number: Some("not-a-phone".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Rejected { status: 400, .. }));
    }
}
