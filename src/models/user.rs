use sqlx::FromRow;
use uuid::Uuid;

use crate::dto::UserResponse;

/// Schema revision stamped on every stored record. Never serialized.
pub const SCHEMA_VERSION: i32 = 1;

/// User model (stored record)
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: Option<String>,
    pub email: Option<String>,
    pub age: Option<f64>,
    pub schema_version: i32,
}

/// Field values carried by a create or update. `None` means "not supplied".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserFields {
    pub name: Option<String>,
    pub email: Option<String>,
    pub age: Option<f64>,
}

impl User {
    /// Create a new user with a fresh id
    pub fn new(fields: UserFields) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: fields.name,
            email: fields.email,
            age: fields.age,
            schema_version: SCHEMA_VERSION,
        }
    }

    /// Overwrite every supplied field, leaving the rest untouched
    pub fn apply(&mut self, changes: UserFields) {
        if let Some(name) = changes.name {
            self.name = Some(name);
        }
        if let Some(email) = changes.email {
            self.email = Some(email);
        }
        if let Some(age) = changes.age {
            self.age = Some(age);
        }
    }

    /// Convert to response (drops bookkeeping fields)
    pub fn to_response(&self) -> UserResponse {
        UserResponse {
            name: self.name.clone(),
            email: self.email.clone(),
            age: self.age,
            id: self.id.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ann() -> User {
        User::new(UserFields {
            name: Some("Ann".to_string()),
            email: Some("a@x.com".to_string()),
            age: Some(30.0),
        })
    }

    #[test]
    fn new_users_get_distinct_ids() {
        let a = User::new(UserFields::default());
        let b = User::new(UserFields::default());

        assert_ne!(a.id, b.id);
        assert_eq!(a.schema_version, SCHEMA_VERSION);
    }

    #[test]
    fn apply_only_touches_supplied_fields() {
        let mut user = ann();
        user.apply(UserFields {
            age: Some(31.0),
            ..Default::default()
        });

        assert_eq!(user.age, Some(31.0));
        assert_eq!(user.name.as_deref(), Some("Ann"));
        assert_eq!(user.email.as_deref(), Some("a@x.com"));
    }

    #[test]
    fn response_keeps_id_and_drops_schema_version() {
        let user = ann();
        let json = serde_json::to_value(user.to_response()).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "name": "Ann",
                "email": "a@x.com",
                "age": 30,
                "id": user.id.to_string(),
            })
        );
        assert!(json.get("schema_version").is_none());
    }
}
