#![allow(dead_code)]

use sqlx::PgPool;

use siparhanud_backend::{
    config::Config,
    models::{
        personnel::Personnel,
        request::{
            CorrectionPayload, MutationPayload, PromotionPayload, Request, RequestPayload,
        },
        user::{User, UserRole},
    },
    repositories::{personnel as personnel_repo, request as request_repo, user as user_repo},
    state::AppState,
    utils::password::hash_password,
};

pub const TEST_PASSWORD: &str = "password-123";

pub fn test_config() -> Config {
    Config {
        database_url: String::new(),
        jwt_secret: "test-secret".to_string(),
        jwt_expiration_hours: 1,
        bind_addr: "127.0.0.1:0".parse().unwrap(),
    }
}

pub fn test_state(pool: &PgPool) -> AppState {
    AppState::new(pool.clone(), test_config())
}

pub async fn seed_user(pool: &PgPool, role: UserRole, nrp: Option<&str>) -> User {
    let password_hash = hash_password(TEST_PASSWORD).expect("hash password");
    let user = User::new(
        format!("{}-{}", role.as_str(), uuid::Uuid::new_v4()),
        password_hash,
        format!("Test {}", role.as_str()),
        role,
        nrp.map(|n| n.to_string()),
    );
    user_repo::insert_user(pool, &user).await.expect("seed user");
    user
}

pub async fn seed_personnel(pool: &PgPool, nrp: &str) -> Personnel {
    let mut personnel = Personnel::new(
        nrp.to_string(),
        "Fredy Jaguar".to_string(),
        "KAPTEN".to_string(),
        "Danton".to_string(),
    );
    personnel.unit = Some("Yonarhanud 1".to_string());
    personnel_repo::insert_personnel(pool, &personnel)
        .await
        .expect("seed personnel");
    personnel
}

pub fn correction_payload(field_name: &str, old: &str, new: &str) -> RequestPayload {
    RequestPayload::Correction(CorrectionPayload {
        field_name: field_name.to_string(),
        old_value: old.to_string(),
        new_value: new.to_string(),
        justification: "data entry error".to_string(),
    })
}

pub fn mutation_payload(destination_position: &str) -> RequestPayload {
    RequestPayload::Mutation(MutationPayload {
        origin_position: "Danton".to_string(),
        destination_position: Some(destination_position.to_string()),
        origin_unit: Some("Yonarhanud 1".to_string()),
        destination_unit: Some("Yonarhanud 2".to_string()),
        reason: Some("rotation".to_string()),
        effective_date: Some("2025-06-01".to_string()),
    })
}

pub fn promotion_payload(target_rank: &str) -> RequestPayload {
    RequestPayload::Promotion(PromotionPayload {
        current_rank: "KAPTEN".to_string(),
        target_rank: target_rank.to_string(),
        effective_date: "2025-06-01".to_string(),
        decree_number: Some("SK/123/2025".to_string()),
    })
}

pub async fn seed_request(
    pool: &PgPool,
    nrp: &str,
    payload: RequestPayload,
    submitted_by: &str,
) -> Request {
    let request = Request::new(nrp.to_string(), payload, submitted_by.to_string());
    request_repo::insert_request(pool, &request)
        .await
        .expect("seed request");
    request
}
