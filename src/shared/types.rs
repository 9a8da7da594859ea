use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Envelope for error responses.
///
/// Successful calls return the bare record or array; only failures are wrapped.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
    pub errors: Option<Vec<String>>,
}

impl<T> ApiResponse<T> {
    pub fn error(message: Option<String>, errors: Option<Vec<String>>) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            message,
            errors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_envelope_shape() {
        let body = serde_json::to_value(ApiResponse::<()>::error(
            Some("User ID is required".to_string()),
            None,
        ))
        .unwrap();

        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "User ID is required");
        assert!(body["data"].is_null());
    }
}
