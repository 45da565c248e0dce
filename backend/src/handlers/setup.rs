//! First-run bootstrap: seeds one account per role so a fresh deployment
//! can be logged into. Idempotent; refuses to run once an admin exists.

use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::{
    error::AppError,
    models::user::{User, UserRole},
    repositories::user as user_repo,
    state::AppState,
    utils::password::hash_password,
};

const DEFAULT_ACCOUNTS: &[(&str, &str, UserRole, Option<&str>)] = &[
    ("admin", "Administrator", UserRole::Admin, None),
    ("staff1", "Staf Kepegawaian 1", UserRole::Staff, None),
    ("verifikator1", "Pejabat Verifikator", UserRole::Verifier, None),
    ("pimpinan", "Pimpinan Satuan", UserRole::Leader, None),
    (
        "personel1",
        "Fredy Jaguar",
        UserRole::Personnel,
        Some("11120017460989"),
    ),
];

pub async fn init_setup(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    if user_repo::admin_exists(&state.pool).await? {
        return Ok(Json(json!({"message": "System already initialized"})));
    }

    let mut created = Vec::new();
    for (username, full_name, role, nrp) in DEFAULT_ACCOUNTS {
        let password = format!("{}123", username);
        let password_hash = hash_password(&password)?;
        let user = User::new(
            (*username).to_string(),
            password_hash,
            (*full_name).to_string(),
            *role,
            nrp.map(|n| n.to_string()),
        );
        user_repo::insert_user(&state.pool, &user).await?;
        created.push(json!({
            "username": username,
            "password": password,
            "role": role.as_str(),
        }));
    }

    Ok(Json(json!({
        "message": "System initialized successfully",
        "users": created,
    })))
}
