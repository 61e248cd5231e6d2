// SPDX-License-Identifier: MIT

//! User model for storage and API.

use serde::{Deserialize, Serialize};

/// Permission tier attached to a subject.
///
/// Closed enum: role strings in tokens and documents must parse to one of
/// these variants, eliminating silent typos in role checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Lite,
    Premium,
    Trainer,
    Admin,
}

/// User profile stored in Firestore.
///
/// The document ID is the identity-provider-issued subject id, not an
/// independently generated one; same-subject authorization checks and the
/// workout assembly workflow both rely on this.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default, alias = "_firestore_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub health_metrics: HealthMetrics,
    pub workout_preferences: WorkoutPreferences,
    pub background: Background,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthMetrics {
    pub weight: f64,
    pub height: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_fat_percentage: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub injuries_or_limitations: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutPreferences {
    pub days_available: Vec<String>,
    /// Minutes available per day.
    pub time_per_day: u32,
    pub gym_access: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equipment: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Background {
    pub experience: String,
    pub routine: String,
    pub goals: String,
}

/// Partial user update; only present fields are written.
#[derive(Debug, Clone, Serialize, Deserialize, validator::Validate)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(email(message = "Email must be valid"))]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health_metrics: Option<HealthMetrics>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workout_preferences: Option<WorkoutPreferences>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<Background>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips_as_capitalized_string() {
        let json = serde_json::to_string(&Role::Premium).unwrap();
        assert_eq!(json, "\"Premium\"");

        let role: Role = serde_json::from_str("\"Trainer\"").unwrap();
        assert_eq!(role, Role::Trainer);
    }

    #[test]
    fn unknown_role_string_is_rejected() {
        assert!(serde_json::from_str::<Role>("\"premium\"").is_err());
        assert!(serde_json::from_str::<Role>("\"SuperAdmin\"").is_err());
    }

    #[test]
    fn user_serializes_with_camel_case_fields() {
        let user = User {
            id: Some("u1".to_string()),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            role: Role::Lite,
            health_metrics: HealthMetrics {
                weight: 60.0,
                height: 170.0,
                body_fat_percentage: None,
                injuries_or_limitations: None,
            },
            workout_preferences: WorkoutPreferences {
                days_available: vec!["Monday".to_string()],
                time_per_day: 45,
                gym_access: true,
                equipment: None,
            },
            background: Background {
                experience: "beginner".to_string(),
                routine: "none".to_string(),
                goals: "strength".to_string(),
            },
        };

        let value = serde_json::to_value(&user).unwrap();
        assert!(value.get("healthMetrics").is_some());
        assert!(value.get("workoutPreferences").is_some());
        assert!(value["healthMetrics"].get("bodyFatPercentage").is_none());
    }
}
