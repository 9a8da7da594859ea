use utoipa::{Modify, OpenApi};

use crate::features::reports::{
    dtos as reports_dtos, handlers as reports_handlers, models as reports_models,
};
use crate::features::users::{dtos as users_dtos, handlers::profile_handler, models as users_models};
use crate::shared::types::ApiResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        // Reports
        reports_handlers::report_handler::submit_report,
        reports_handlers::report_handler::list_reports,
        // Users
        profile_handler::get_profile,
        profile_handler::upsert_profile,
    ),
    components(
        schemas(
            // Shared
            ApiResponse<String>,
            // Reports
            reports_models::ProblemType,
            reports_models::Location,
            reports_models::Report,
            reports_dtos::SubmitReportForm,
            // Users
            users_models::UserProfile,
            users_dtos::UpsertProfileDto,
        )
    ),
    tags(
        (name = "reports", description = "Citizen report submission and history"),
        (name = "users", description = "User profile management"),
    ),
    info(
        title = "Civic Reports API",
        version = "0.1.0",
        description = "API documentation for the civic issue reporting backend",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
