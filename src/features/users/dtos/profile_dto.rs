use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::shared::validation::PHONE_NUMBER_REGEX;

/// Request DTO for creating or replacing a profile.
///
/// Every field is written on each PUT; omitted fields are cleared.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpsertProfileDto {
    #[schema(example = "female")]
    pub gender: Option<String>,

    #[schema(example = "12 Station Road, Ranchi")]
    pub address: Option<String>,

    #[validate(url(message = "Profile picture must be a valid URL"))]
    pub profile_pic_url: Option<String>,

    #[validate(regex(
        path = *PHONE_NUMBER_REGEX,
        message = "Phone number must be in international format, e.g. +911234567890"
    ))]
    #[schema(example = "+911234567890")]
    pub phone_number: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl UpsertProfileDto {
    /// Trim fields and turn blank strings into `None`
    pub fn normalized(self) -> Self {
        Self {
            gender: non_blank(self.gender),
            address: non_blank(self.address),
            profile_pic_url: non_blank(self.profile_pic_url),
            phone_number: non_blank(self.phone_number),
        }
    }
}
