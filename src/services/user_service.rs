use std::sync::Arc;

use crate::dto::{UserRequest, UserResponse};
use crate::interceptors::AppError;
use crate::store::UserStore;

/// One request, one store call. Maps store outcomes onto [`AppError`].
#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn UserStore>,
}

impl UserService {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    /// Create a user
    pub async fn create_user(&self, request: UserRequest) -> Result<UserResponse, AppError> {
        let user = self
            .store
            .insert(request.into_fields())
            .await
            .map_err(AppError::from_write)?;

        tracing::info!(user_id = %user.id, "user created");
        Ok(user.to_response())
    }

    /// List all users
    pub async fn list_users(&self) -> Result<Vec<UserResponse>, AppError> {
        let users = self.store.find_all().await.map_err(AppError::from_read)?;

        Ok(users.iter().map(|user| user.to_response()).collect())
    }

    /// Get user by ID
    pub async fn get_user_by_id(&self, user_id: &str) -> Result<UserResponse, AppError> {
        let user = self
            .store
            .find_by_id(user_id)
            .await
            .map_err(AppError::from_read)?
            .ok_or_else(AppError::user_not_found)?;

        Ok(user.to_response())
    }

    /// Update user
    pub async fn update_user(&self, user_id: &str, request: UserRequest) -> Result<UserResponse, AppError> {
        let user = self
            .store
            .update_by_id(user_id, request.into_fields())
            .await
            .map_err(AppError::from_write)?
            .ok_or_else(AppError::user_not_found)?;

        tracing::info!(user_id = %user.id, "user updated");
        Ok(user.to_response())
    }

    /// Delete user
    pub async fn delete_user(&self, user_id: &str) -> Result<(), AppError> {
        let user = self
            .store
            .delete_by_id(user_id)
            .await
            .map_err(AppError::from_read)?
            .ok_or_else(AppError::user_not_found)?;

        tracing::info!(user_id = %user.id, "user deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{User, UserFields};
    use crate::store::{MockUserStore, StoreError};
    use axum::http::StatusCode;

    fn service(store: MockUserStore) -> UserService {
        UserService::new(Arc::new(store))
    }

    fn stored() -> User {
        User::new(UserFields {
            name: Some("Ann".to_string()),
            email: Some("a@x.com".to_string()),
            age: Some(30.0),
        })
    }

    #[tokio::test]
    async fn create_passes_fields_through_to_the_store() {
        let user = stored();
        let returned = user.clone();

        let mut store = MockUserStore::new();
        store
            .expect_insert()
            .withf(|fields| fields.name.as_deref() == Some("Ann") && fields.age == Some(30.0))
            .times(1)
            .return_once(move |_| Ok(returned));

        let request = UserRequest {
            name: Some("Ann".to_string()),
            email: Some("a@x.com".to_string()),
            age: Some(30.0),
        };
        let response = service(store).create_user(request).await.unwrap();

        assert_eq!(response.id, user.id.to_string());
        assert_eq!(response.name.as_deref(), Some("Ann"));
    }

    #[tokio::test]
    async fn negative_age_is_stored_as_given() {
        let mut store = MockUserStore::new();
        store
            .expect_insert()
            .withf(|fields| fields.age == Some(-5.0))
            .times(1)
            .return_once(|fields| Ok(User::new(fields)));

        let request = UserRequest {
            age: Some(-5.0),
            ..Default::default()
        };
        let response = service(store).create_user(request).await.unwrap();

        assert_eq!(response.age, Some(-5.0));
    }

    #[tokio::test]
    async fn rejected_write_is_a_client_error() {
        let mut store = MockUserStore::new();
        store
            .expect_insert()
            .return_once(|_| Err(StoreError::Rejected("invalid byte sequence".to_string())));

        let err = service(store).create_user(UserRequest::default()).await.unwrap_err();

        assert!(matches!(err, AppError::Validation(ref m) if m == "invalid byte sequence"));
    }

    #[tokio::test]
    async fn list_failure_is_a_server_error() {
        let mut store = MockUserStore::new();
        store
            .expect_find_all()
            .return_once(|| Err(StoreError::Unavailable("connection refused".to_string())));

        let err = service(store).list_users().await.unwrap_err();

        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "connection refused");
    }

    #[tokio::test]
    async fn missing_user_is_not_found() {
        let mut store = MockUserStore::new();
        store
            .expect_find_by_id()
            .withf(|id| id == "0b8f2b1e-4c3e-4d55-9d7e-8f0c1d2e3f40")
            .return_once(|_| Ok(None));

        let err = service(store)
            .get_user_by_id("0b8f2b1e-4c3e-4d55-9d7e-8f0c1d2e3f40")
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound(ref m) if m == "User not found"));
    }

    #[tokio::test]
    async fn malformed_id_on_get_is_a_server_error() {
        let mut store = MockUserStore::new();
        store
            .expect_find_by_id()
            .return_once(|id| Err(StoreError::InvalidId(id.to_string())));

        let err = service(store).get_user_by_id("42").await.unwrap_err();

        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn malformed_id_on_update_is_a_client_error() {
        let mut store = MockUserStore::new();
        store
            .expect_update_by_id()
            .return_once(|id, _| Err(StoreError::InvalidId(id.to_string())));

        let err = service(store)
            .update_user("42", UserRequest::default())
            .await
            .unwrap_err();

        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn update_of_missing_user_is_not_found() {
        let mut store = MockUserStore::new();
        store.expect_update_by_id().return_once(|_, _| Ok(None));

        let err = service(store)
            .update_user("0b8f2b1e-4c3e-4d55-9d7e-8f0c1d2e3f40", UserRequest::default())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_failure_is_a_server_error() {
        let mut store = MockUserStore::new();
        store
            .expect_delete_by_id()
            .return_once(|_| Err(StoreError::Rejected("foreign key".to_string())));

        let err = service(store).delete_user("x").await.unwrap_err();

        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
