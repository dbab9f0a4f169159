//! User CRUD handlers.
//!
//! Every response body is an envelope: `{"message": ..., <key>: payload}`.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::{json, Value};

use userstore_core::user::{NewUser, UserId, UserUpdate};

use crate::{handlers::ApiError, state::AppState};

type Envelope = Json<Value>;

/// List all users (GET /api/users).
pub async fn list_users(State(state): State<AppState>) -> Result<Envelope, ApiError> {
    let users = state
        .user_repo
        .list_users()
        .await
        .map_err(|e| ApiError::from_repository(&e, "Failed to retrieve users"))?;

    Ok(Json(json!({
        "message": "All users retrieved successfully",
        "users": users,
    })))
}

/// Get a user by id (GET /api/users/{id}).
pub async fn get_user(
    State(state): State<AppState>,
    path: Result<Path<UserId>, PathRejection>,
) -> Result<Envelope, ApiError> {
    let Path(id) = path?;

    let user = state
        .user_repo
        .get_user(id)
        .await
        .map_err(|e| ApiError::from_repository(&e, "Failed to retrieve user"))?
        .ok_or_else(ApiError::not_found)?;

    Ok(Json(json!({
        "message": "User retrieved successfully",
        "user": user,
    })))
}

/// Get a user through the email index (GET /api/users/email/{email}).
///
/// The password is not part of the index projection and is never returned here.
pub async fn get_user_by_email(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Envelope, ApiError> {
    let Path(email) = path?;

    let user = state
        .user_repo
        .get_user_by_email(&email)
        .await
        .map_err(|e| ApiError::from_repository(&e, "Failed to retrieve user by email"))?
        .ok_or_else(ApiError::not_found)?;

    Ok(Json(json!({
        "message": "User retrieved successfully",
        "user": user,
    })))
}

/// Create a user (POST /api/users).
pub async fn create_user(
    State(state): State<AppState>,
    body: Result<Json<NewUser>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(new_user) = body?;

    let user = state
        .user_repo
        .create_user(&new_user)
        .await
        .map_err(|e| ApiError::from_create(&e))?;

    tracing::info!(user_id = user.id, email = %user.email, "Created new user");

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "User created successfully",
            "newUser": user,
        })),
    ))
}

/// Write the supplied fields of a user (PUT /api/users/{id}).
pub async fn update_user(
    State(state): State<AppState>,
    path: Result<Path<UserId>, PathRejection>,
    body: Result<Json<UserUpdate>, JsonRejection>,
) -> Result<Envelope, ApiError> {
    let Path(id) = path?;
    let Json(update) = body?;

    let user = state
        .user_repo
        .update_user(id, &update)
        .await
        .map_err(|e| ApiError::from_repository(&e, "Failed to update user"))?
        .ok_or_else(ApiError::not_found)?;

    tracing::info!(user_id = id, "Updated user");

    Ok(Json(json!({
        "message": "User updated successfully",
        "updatedUser": user,
    })))
}

/// Merge the supplied fields over a user (PATCH /api/users/{id}).
///
/// Blank values keep the stored ones.
pub async fn patch_user(
    State(state): State<AppState>,
    path: Result<Path<UserId>, PathRejection>,
    body: Result<Json<UserUpdate>, JsonRejection>,
) -> Result<Envelope, ApiError> {
    let Path(id) = path?;
    let Json(patch) = body?;

    let user = state
        .user_repo
        .patch_user(id, &patch)
        .await
        .map_err(|e| ApiError::from_repository(&e, "Failed to patch user"))?
        .ok_or_else(ApiError::not_found)?;

    tracing::info!(user_id = id, "Patched user");

    Ok(Json(json!({
        "message": "User patched successfully",
        "patchedUser": user,
    })))
}

/// Delete a user (DELETE /api/users/{id}).
pub async fn delete_user(
    State(state): State<AppState>,
    path: Result<Path<UserId>, PathRejection>,
) -> Result<Envelope, ApiError> {
    let Path(id) = path?;

    let user = state
        .user_repo
        .delete_user(id)
        .await
        .map_err(|e| ApiError::from_repository(&e, "Failed to delete user"))?
        .ok_or_else(ApiError::not_found)?;

    tracing::info!(user_id = id, "Deleted user");

    Ok(Json(json!({
        "message": "User deleted successfully",
        "deletedUser": user,
    })))
}
