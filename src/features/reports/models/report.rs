use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Municipal department a report is routed to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum ProblemType {
    #[default]
    #[serde(rename = "Public Works")]
    PublicWorks,
    Sanitation,
    #[serde(rename = "Street Lighting")]
    StreetLighting,
    #[serde(rename = "Parks and Recreation")]
    ParksAndRecreation,
    #[serde(rename = "Water and Drainage")]
    WaterAndDrainage,
    #[serde(rename = "Traffic and Transportation")]
    TrafficAndTransportation,
    #[serde(rename = "Urban Planning")]
    UrbanPlanning,
    #[serde(rename = "Animal Control")]
    AnimalControl,
    #[serde(rename = "Environmental Services")]
    EnvironmentalServices,
    Roads,
    Other,
}

impl ProblemType {
    pub const ALL: [ProblemType; 11] = [
        ProblemType::PublicWorks,
        ProblemType::Sanitation,
        ProblemType::StreetLighting,
        ProblemType::ParksAndRecreation,
        ProblemType::WaterAndDrainage,
        ProblemType::TrafficAndTransportation,
        ProblemType::UrbanPlanning,
        ProblemType::AnimalControl,
        ProblemType::EnvironmentalServices,
        ProblemType::Roads,
        ProblemType::Other,
    ];

    /// Wire value, as sent by the app's category picker
    pub fn as_str(&self) -> &'static str {
        match self {
            ProblemType::PublicWorks => "Public Works",
            ProblemType::Sanitation => "Sanitation",
            ProblemType::StreetLighting => "Street Lighting",
            ProblemType::ParksAndRecreation => "Parks and Recreation",
            ProblemType::WaterAndDrainage => "Water and Drainage",
            ProblemType::TrafficAndTransportation => "Traffic and Transportation",
            ProblemType::UrbanPlanning => "Urban Planning",
            ProblemType::AnimalControl => "Animal Control",
            ProblemType::EnvironmentalServices => "Environmental Services",
            ProblemType::Roads => "Roads",
            ProblemType::Other => "Other",
        }
    }
}

impl std::fmt::Display for ProblemType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown problem type '{0}'")]
pub struct UnknownProblemType(pub String);

impl std::str::FromStr for ProblemType {
    type Err = UnknownProblemType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProblemType::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| UnknownProblemType(s.to_string()))
    }
}

impl TryFrom<String> for ProblemType {
    type Error = UnknownProblemType;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Coordinate pair attached to every report
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, FromRow, Validate, ToSchema)]
pub struct Location {
    #[validate(range(min = -90.0, max = 90.0, message = "latitude must be within [-90, 90]"))]
    pub latitude: f64,
    #[validate(range(
        min = -180.0,
        max = 180.0,
        message = "longitude must be within [-180, 180]"
    ))]
    pub longitude: f64,
}

/// A persisted citizen report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: Uuid,
    pub description: String,
    #[sqlx(try_from = "String")]
    pub problem_type: ProblemType,
    #[sqlx(flatten)]
    pub location: Location,
    /// Free-text landmark label
    pub locationn: Option<String>,
    /// Public photo URL, empty when no photo was attached
    pub image_uri: String,
    pub user_id: String,
    #[sqlx(rename = "submitted_at")]
    pub timestamp: DateTime<Utc>,
}

/// Data for creating a new report; the store assigns the id
#[derive(Debug, Clone)]
pub struct NewReport {
    pub description: String,
    pub problem_type: ProblemType,
    pub location: Location,
    pub locationn: Option<String>,
    pub image_uri: String,
    pub user_id: String,
    pub timestamp: DateTime<Utc>,
}

impl NewReport {
    pub fn into_report(self, id: Uuid) -> Report {
        Report {
            id,
            description: self.description,
            problem_type: self.problem_type,
            location: self.location,
            locationn: self.locationn,
            image_uri: self.image_uri,
            user_id: self.user_id,
            timestamp: self.timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_problem_type_wire_values_round_trip() {
        for problem_type in ProblemType::ALL {
            let parsed: ProblemType = problem_type.as_str().parse().unwrap();
            assert_eq!(parsed, problem_type);

            let json = serde_json::to_string(&problem_type).unwrap();
            assert_eq!(json, format!("\"{}\"", problem_type.as_str()));
        }
    }

    #[test]
    fn test_unknown_problem_type_is_rejected() {
        assert!("Potholes".parse::<ProblemType>().is_err());
        assert!("roads".parse::<ProblemType>().is_err());
        assert!("".parse::<ProblemType>().is_err());
    }

    #[test]
    fn test_report_serializes_camel_case() {
        let report = NewReport {
            description: "Broken street light".to_string(),
            problem_type: ProblemType::StreetLighting,
            location: Location {
                latitude: 23.3441,
                longitude: 85.3096,
            },
            locationn: Some("Near the bus stand".to_string()),
            image_uri: String::new(),
            user_id: "u1".to_string(),
            timestamp: Utc::now(),
        }
        .into_report(Uuid::nil());

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["problemType"], "Street Lighting");
        assert_eq!(value["imageUri"], "");
        assert_eq!(value["userId"], "u1");
        assert_eq!(value["locationn"], "Near the bus stand");
        assert_eq!(value["location"]["latitude"], 23.3441);
        assert!(value.get("timestamp").is_some());
    }
}
