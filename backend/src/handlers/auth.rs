use axum::{
    extract::{Extension, State},
    Json,
};
use serde_json::{json, Value};

use crate::{
    error::AppError,
    models::user::{ChangePasswordRequest, LoginRequest, LoginResponse, User, UserResponse},
    repositories::user as user_repo,
    state::AppState,
    utils::{
        jwt::create_access_token,
        password::{hash_password, verify_password},
    },
    validation::rules,
};

pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let user = user_repo::find_user_by_username(&state.pool, &payload.username)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Invalid username or password".into()))?;

    let matches = verify_password(&payload.password, &user.password_hash)?;
    if !matches {
        return Err(AppError::Unauthorized("Invalid username or password".into()));
    }
    if !user.is_active {
        return Err(AppError::Unauthorized("Account is deactivated".into()));
    }

    let access_token = create_access_token(
        user.id.clone(),
        user.username.clone(),
        user.role.as_str().to_string(),
        &state.config.jwt_secret,
        state.config.jwt_expiration_hours,
    )?;

    Ok(Json(LoginResponse {
        access_token,
        user: UserResponse::from(user),
    }))
}

pub async fn me(Extension(user): Extension<User>) -> Json<UserResponse> {
    Json(UserResponse::from(user))
}

pub async fn logout(Extension(_user): Extension<User>) -> Json<Value> {
    // Stateless tokens: nothing to revoke server-side. The call exists so
    // the audit layer records the logout.
    Json(json!({"message": "Logged out"}))
}

pub async fn change_password(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Json(payload): Json<ChangePasswordRequest>,
) -> Result<Json<Value>, AppError> {
    let matches = verify_password(&payload.current_password, &user.password_hash)?;
    if !matches {
        return Err(AppError::BadRequest("Current password is incorrect".into()));
    }

    if rules::validate_password(&payload.new_password).is_err() {
        return Err(AppError::Validation(vec![
            "new_password: must be 8-128 characters".to_string(),
        ]));
    }

    let password_hash = hash_password(&payload.new_password)?;
    user_repo::update_password(&state.pool, &user.id, &password_hash).await?;

    Ok(Json(json!({"message": "Password updated"})))
}
