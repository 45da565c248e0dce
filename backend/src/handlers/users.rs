//! Administrative user-account management.

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};

use crate::{
    error::AppError,
    models::user::{CreateUser, ResetPasswordRequest, UpdateUser, User, UserResponse},
    repositories::user as user_repo,
    state::AppState,
    utils::password::hash_password,
    validation::rules,
};

pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserResponse>>, AppError> {
    let users = user_repo::list_users(&state.pool).await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

pub async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<CreateUser>,
) -> Result<Json<UserResponse>, AppError> {
    let mut errors = Vec::new();
    if rules::validate_username(&payload.username).is_err() {
        errors.push("username: must be 1-50 alphanumeric characters".to_string());
    }
    if rules::validate_password(&payload.password).is_err() {
        errors.push("password: must be 8-128 characters".to_string());
    }
    if let Some(ref nrp) = payload.nrp {
        if rules::validate_nrp(nrp).is_err() {
            errors.push("nrp: invalid format".to_string());
        }
    }
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    if user_repo::find_user_by_username(&state.pool, &payload.username)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict("Username is already taken".into()));
    }

    let password_hash = hash_password(&payload.password)?;
    let user = User::new(
        payload.username,
        password_hash,
        payload.full_name,
        payload.role,
        payload.nrp,
    );
    user_repo::insert_user(&state.pool, &user).await?;

    Ok(Json(UserResponse::from(user)))
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<UserResponse>, AppError> {
    let user = user_repo::find_user_by_id(&state.pool, &user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;
    Ok(Json(UserResponse::from(user)))
}

pub async fn update_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(payload): Json<UpdateUser>,
) -> Result<Json<UserResponse>, AppError> {
    let mut user = user_repo::find_user_by_id(&state.pool, &user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;

    if let Some(full_name) = payload.full_name {
        user.full_name = full_name;
    }
    if let Some(role) = payload.role {
        user.role = role;
    }
    if payload.nrp.is_some() {
        if let Some(ref nrp) = payload.nrp {
            if rules::validate_nrp(nrp).is_err() {
                return Err(AppError::Validation(vec!["nrp: invalid format".to_string()]));
            }
        }
        user.nrp = payload.nrp;
    }
    if let Some(is_active) = payload.is_active {
        user.is_active = is_active;
    }

    user_repo::update_user(&state.pool, &user).await?;
    Ok(Json(UserResponse::from(user)))
}

pub async fn reset_password(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(payload): Json<ResetPasswordRequest>,
) -> Result<Json<Value>, AppError> {
    if rules::validate_password(&payload.new_password).is_err() {
        return Err(AppError::Validation(vec![
            "new_password: must be 8-128 characters".to_string(),
        ]));
    }

    let password_hash = hash_password(&payload.new_password)?;
    let updated = user_repo::update_password(&state.pool, &user_id, &password_hash).await?;
    if updated == 0 {
        return Err(AppError::NotFound("User not found".into()));
    }

    Ok(Json(json!({"message": "Password reset"})))
}

pub async fn deactivate_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let deactivated = user_repo::deactivate_user(&state.pool, &user_id).await?;
    if deactivated == 0 {
        return Err(AppError::NotFound("User not found".into()));
    }

    Ok(Json(json!({"message": "User deactivated"})))
}
