use axum::extract::{Path, State};

use crate::config::AppState;
use crate::dto::{MessageResponse, UserRequest, UserResponse};
use crate::interceptors::{ApiSuccess, AppError, AppJson};
use crate::services::UserService;

/// Create a user
pub async fn create_user(
    State(state): State<AppState>,
    AppJson(request): AppJson<UserRequest>,
) -> Result<ApiSuccess<UserResponse>, AppError> {
    let user_service = UserService::new(state.store);
    let user = user_service.create_user(request).await?;

    Ok(ApiSuccess::created(user))
}

/// List all users
pub async fn list_users(State(state): State<AppState>) -> Result<ApiSuccess<Vec<UserResponse>>, AppError> {
    let user_service = UserService::new(state.store);
    let users = user_service.list_users().await?;

    Ok(ApiSuccess::ok(users))
}

/// Get a user by id
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiSuccess<UserResponse>, AppError> {
    let user_service = UserService::new(state.store);
    let user = user_service.get_user_by_id(&id).await?;

    Ok(ApiSuccess::ok(user))
}

/// Update a user by id
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(request): AppJson<UserRequest>,
) -> Result<ApiSuccess<UserResponse>, AppError> {
    let user_service = UserService::new(state.store);
    let user = user_service.update_user(&id, request).await?;

    Ok(ApiSuccess::ok(user))
}

/// Delete a user by id
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiSuccess<MessageResponse>, AppError> {
    let user_service = UserService::new(state.store);
    user_service.delete_user(&id).await?;

    Ok(ApiSuccess::ok(MessageResponse::new("User deleted successfully")))
}
