use axum::extract::{Extension, State};
use axum::Json;
use sqlx::PgPool;

use siparhanud_backend::{
    error::AppError,
    handlers::{
        auth::{change_password, login, me},
        setup::init_setup,
    },
    models::user::{ChangePasswordRequest, LoginRequest, UserRole},
    repositories::user as user_repo,
    utils::jwt::verify_access_token,
};

mod support;
use support::{seed_user, test_state, TEST_PASSWORD};

fn init_tracing() {
    let _ = tracing_subscriber::fmt::try_init();
}

#[sqlx::test(migrations = "./migrations")]
async fn login_issues_token_with_role_claims(pool: PgPool) {
    init_tracing();
    let state = test_state(&pool);
    let user = seed_user(&pool, UserRole::Verifier, None).await;

    let response = login(
        State(state.clone()),
        Json(LoginRequest {
            username: user.username.clone(),
            password: TEST_PASSWORD.to_string(),
        }),
    )
    .await
    .expect("login ok")
    .0;

    let claims = verify_access_token(&response.access_token, &state.config.jwt_secret)
        .expect("token verifies");
    assert_eq!(claims.sub, user.id);
    assert_eq!(claims.role, "verifier");
    assert_eq!(response.user.username, user.username);
}

#[sqlx::test(migrations = "./migrations")]
async fn login_rejects_bad_password_and_unknown_user(pool: PgPool) {
    init_tracing();
    let state = test_state(&pool);
    let user = seed_user(&pool, UserRole::Staff, None).await;

    let result = login(
        State(state.clone()),
        Json(LoginRequest {
            username: user.username.clone(),
            password: "wrong-password".to_string(),
        }),
    )
    .await;
    assert!(matches!(result, Err(AppError::Unauthorized(_))));

    let result = login(
        State(state),
        Json(LoginRequest {
            username: "nobody".to_string(),
            password: TEST_PASSWORD.to_string(),
        }),
    )
    .await;
    assert!(matches!(result, Err(AppError::Unauthorized(_))));
}

#[sqlx::test(migrations = "./migrations")]
async fn login_rejects_deactivated_account(pool: PgPool) {
    init_tracing();
    let state = test_state(&pool);
    let user = seed_user(&pool, UserRole::Staff, None).await;
    user_repo::deactivate_user(&pool, &user.id).await.unwrap();

    let result = login(
        State(state),
        Json(LoginRequest {
            username: user.username,
            password: TEST_PASSWORD.to_string(),
        }),
    )
    .await;
    assert!(matches!(result, Err(AppError::Unauthorized(_))));
}

#[sqlx::test(migrations = "./migrations")]
async fn me_returns_public_profile(pool: PgPool) {
    init_tracing();
    let user = seed_user(&pool, UserRole::Leader, None).await;

    let response = me(Extension(user.clone())).await.0;
    assert_eq!(response.id, user.id);
    assert_eq!(response.role, "leader");
}

#[sqlx::test(migrations = "./migrations")]
async fn change_password_requires_current_password(pool: PgPool) {
    init_tracing();
    let state = test_state(&pool);
    let user = seed_user(&pool, UserRole::Staff, None).await;

    let result = change_password(
        State(state.clone()),
        Extension(user.clone()),
        Json(ChangePasswordRequest {
            current_password: "wrong".to_string(),
            new_password: "another-password".to_string(),
        }),
    )
    .await;
    assert!(matches!(result, Err(AppError::BadRequest(_))));

    change_password(
        State(state.clone()),
        Extension(user.clone()),
        Json(ChangePasswordRequest {
            current_password: TEST_PASSWORD.to_string(),
            new_password: "another-password".to_string(),
        }),
    )
    .await
    .expect("change ok");

    // The new password works for login.
    let response = login(
        State(state),
        Json(LoginRequest {
            username: user.username,
            password: "another-password".to_string(),
        }),
    )
    .await;
    assert!(response.is_ok());
}

#[sqlx::test(migrations = "./migrations")]
async fn setup_seeds_default_accounts_once(pool: PgPool) {
    init_tracing();
    let state = test_state(&pool);

    let first = init_setup(State(state.clone())).await.expect("setup ok").0;
    assert_eq!(first["message"], "System initialized successfully");
    assert_eq!(first["users"].as_array().unwrap().len(), 5);

    let admin = user_repo::find_user_by_username(&pool, "admin")
        .await
        .unwrap();
    assert!(admin.is_some());

    let second = init_setup(State(state)).await.expect("setup ok").0;
    assert_eq!(second["message"], "System already initialized");
}
