use serde::{Deserialize, Serialize};

use crate::models::UserFields;
use crate::utils::cast;

/// User as returned to clients. Absent fields are omitted.
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "cast::serialize_number")]
    pub age: Option<f64>,

    pub id: String,
}

/// Create / update request body. Every field is optional and values are
/// cast leniently (see [`cast`]); unknown keys are ignored. No further
/// constraints apply: whatever casts is stored as given.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserRequest {
    #[serde(default, deserialize_with = "cast::to_string")]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "cast::to_string")]
    pub email: Option<String>,

    #[serde(default, deserialize_with = "cast::to_number")]
    pub age: Option<f64>,
}

impl UserRequest {
    pub fn into_fields(self) -> UserFields {
        UserFields {
            name: self.name,
            email: self.email,
            age: self.age,
        }
    }
}

/// `{"message": ...}` body used for not-found and delete confirmations
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unknown_keys_and_client_ids_are_ignored() {
        let request: UserRequest =
            serde_json::from_value(json!({ "name": "Ann", "id": "abc", "role": "admin" })).unwrap();

        assert_eq!(request.name.as_deref(), Some("Ann"));
        assert_eq!(request.into_fields().email, None);
    }

    #[test]
    fn values_are_accepted_without_range_or_length_limits() {
        let long_name = "x".repeat(300);
        let request: UserRequest = serde_json::from_value(json!({ "name": long_name, "age": -5 })).unwrap();
        let fields = request.into_fields();

        assert_eq!(fields.name.map(|n| n.len()), Some(300));
        assert_eq!(fields.age, Some(-5.0));
    }

    #[test]
    fn absent_fields_are_omitted_from_responses() {
        let response = UserResponse {
            name: None,
            email: Some("a@x.com".to_string()),
            age: None,
            id: "42".to_string(),
        };

        assert_eq!(
            serde_json::to_value(response).unwrap(),
            json!({ "email": "a@x.com", "id": "42" })
        );
    }
}
