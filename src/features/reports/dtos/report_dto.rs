use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::reports::models::{Location, ProblemType};

/// Image content types accepted on submission
pub const ALLOWED_IMAGE_TYPES: &[&str] = &[
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/gif",
    "image/webp",
    "image/heic",
    "image/heif",
];

/// Maximum photo size in bytes (10MB)
pub const MAX_IMAGE_SIZE: usize = 10 * 1024 * 1024;

/// Lowercased media type without parameters, e.g. `image/JPEG; name=x` -> `image/jpeg`
pub fn normalize_content_type(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

pub fn is_image_type_allowed(content_type: &str) -> bool {
    ALLOWED_IMAGE_TYPES.contains(&normalize_content_type(content_type).as_str())
}

/// Submit report form for OpenAPI documentation.
/// The handler reads axum's `Multipart` directly.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[allow(dead_code)]
pub struct SubmitReportForm {
    #[schema(example = "Pothole on Main St")]
    pub description: String,
    #[schema(example = "Roads")]
    pub problem_type: String,
    /// JSON-encoded coordinate pair
    #[schema(example = r#"{"latitude":23.34,"longitude":85.31}"#)]
    pub location: String,
    /// Free-text landmark label
    #[schema(example = "Opposite the post office")]
    pub locationn: Option<String>,
    #[schema(example = "u1")]
    pub user_id: String,
    /// Optional photo of the issue
    #[schema(format = Binary, content_media_type = "image/jpeg")]
    pub image: Option<String>,
}

/// Photo part of a submission
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub data: Vec<u8>,
    pub content_type: String,
}

/// Raw multipart fields as they arrive, before any checks
#[derive(Debug, Default)]
pub struct ReportSubmissionForm {
    pub description: Option<String>,
    pub problem_type: Option<String>,
    pub location: Option<String>,
    pub locationn: Option<String>,
    pub user_id: Option<String>,
    pub image: Option<ImageUpload>,
}

/// A submission whose required fields are present and well-formed
#[derive(Debug, Clone, Validate)]
pub struct ReportSubmission {
    #[validate(length(min = 1, message = "description must not be empty"))]
    pub description: String,
    pub problem_type: ProblemType,
    #[validate(nested)]
    pub location: Location,
    pub locationn: Option<String>,
    #[validate(length(min = 1, message = "userId must not be empty"))]
    pub user_id: String,
    pub image: Option<ImageUpload>,
}

fn required(value: Option<String>, field: &str) -> Result<String> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest(format!("{} is required", field)))
}

impl ReportSubmissionForm {
    /// Check required fields and parse `problemType` and `location`
    pub fn into_submission(self) -> Result<ReportSubmission> {
        let description = required(self.description, "description")?;
        let problem_type = required(self.problem_type, "problemType")?;
        let location = required(self.location, "location")?;
        let user_id = required(self.user_id, "userId")?;

        let problem_type = problem_type
            .parse::<ProblemType>()
            .map_err(|e| AppError::BadRequest(format!("Invalid problemType: {}", e)))?;

        let location: Location = serde_json::from_str(&location).map_err(|e| {
            AppError::BadRequest(format!(
                "location must be a JSON object with numeric latitude and longitude: {}",
                e
            ))
        })?;

        let submission = ReportSubmission {
            description,
            problem_type,
            location,
            locationn: self.locationn,
            user_id,
            image: self.image,
        };

        submission
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        Ok(submission)
    }
}

/// Query for listing a user's reports
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ListReportsQuery {
    /// Owner whose reports are returned
    pub user_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> ReportSubmissionForm {
        ReportSubmissionForm {
            description: Some("Pothole on Main St".to_string()),
            problem_type: Some("Roads".to_string()),
            location: Some(r#"{"latitude":23.34,"longitude":85.31}"#.to_string()),
            locationn: Some("Near the market".to_string()),
            user_id: Some("u1".to_string()),
            image: None,
        }
    }

    #[test]
    fn test_valid_form_becomes_submission() {
        let submission = valid_form().into_submission().unwrap();
        assert_eq!(submission.description, "Pothole on Main St");
        assert_eq!(submission.problem_type, ProblemType::Roads);
        assert_eq!(
            submission.location,
            Location {
                latitude: 23.34,
                longitude: 85.31
            }
        );
        assert_eq!(submission.locationn.as_deref(), Some("Near the market"));
        assert_eq!(submission.user_id, "u1");
    }

    #[test]
    fn test_missing_required_fields_are_rejected() {
        let cases: [(fn(&mut ReportSubmissionForm), &str); 4] = [
            (|f| f.description = None, "description"),
            (|f| f.problem_type = None, "problemType"),
            (|f| f.location = None, "location"),
            (|f| f.user_id = Some("   ".to_string()), "userId"),
        ];

        for (strip, field) in cases {
            let mut form = valid_form();
            strip(&mut form);
            match form.into_submission() {
                Err(AppError::BadRequest(msg)) => assert!(msg.contains(field), "{}", msg),
                other => panic!("expected BadRequest for {}, got {:?}", field, other),
            }
        }
    }

    #[test]
    fn test_malformed_location_is_rejected() {
        for raw in [
            "not json",
            r#"{"latitude":23.34}"#,
            r#"{"latitude":"north","longitude":85.31}"#,
            "{}",
        ] {
            let mut form = valid_form();
            form.location = Some(raw.to_string());
            assert!(matches!(
                form.into_submission(),
                Err(AppError::BadRequest(_))
            ));
        }
    }

    #[test]
    fn test_out_of_range_location_is_rejected() {
        let mut form = valid_form();
        form.location = Some(r#"{"latitude":123.0,"longitude":85.31}"#.to_string());
        assert!(matches!(
            form.into_submission(),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_unknown_problem_type_is_rejected() {
        let mut form = valid_form();
        form.problem_type = Some("Potholes".to_string());
        assert!(matches!(
            form.into_submission(),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn test_missing_landmark_is_allowed() {
        let mut form = valid_form();
        form.locationn = None;
        assert!(form.into_submission().unwrap().locationn.is_none());
    }

    #[test]
    fn test_long_fields_are_kept_verbatim() {
        let mut form = valid_form();
        form.description = Some("d".repeat(20_000));
        form.locationn = Some("l".repeat(2_000));
        form.user_id = Some("u".repeat(300));

        let submission = form.into_submission().unwrap();
        assert_eq!(submission.description.len(), 20_000);
        assert_eq!(submission.locationn.map(|l| l.len()), Some(2_000));
        assert_eq!(submission.user_id.len(), 300);
    }

    #[test]
    fn test_image_type_check_ignores_case_and_parameters() {
        assert!(is_image_type_allowed("image/jpeg"));
        assert!(is_image_type_allowed("image/JPEG"));
        assert!(is_image_type_allowed("Image/PNG; name=photo.png"));
        assert!(!is_image_type_allowed("application/pdf; charset=binary"));
        assert_eq!(normalize_content_type(" image/WebP ;q=1"), "image/webp");
    }
}
