use axum::extract::{Extension, Query, State};
use axum::Json;
use chrono::{Duration, Utc};
use sqlx::PgPool;

use siparhanud_backend::{
    error::AppError,
    handlers::requests::{list_requests, submit_request, RequestListQuery},
    models::{
        request::{CreateRequest, Request, RequestStatus, RequestType},
        user::UserRole,
    },
    repositories::request as request_repo,
};

mod support;
use support::{
    correction_payload, mutation_payload, seed_personnel, seed_user, test_state,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt::try_init();
}

#[sqlx::test(migrations = "./migrations")]
async fn submit_correction_request_starts_pending(pool: PgPool) {
    init_tracing();
    let state = test_state(&pool);
    seed_personnel(&pool, "NRP-001").await;
    let staff = seed_user(&pool, UserRole::Staff, None).await;

    let response = submit_request(
        State(state),
        Extension(staff.clone()),
        Json(CreateRequest {
            personnel_nrp: "NRP-001".to_string(),
            payload: correction_payload("name", "A", "B"),
        }),
    )
    .await
    .expect("submit ok")
    .0;

    assert_eq!(response.status, RequestStatus::Pending);
    assert_eq!(response.request_type, RequestType::Correction);
    assert_eq!(response.submitted_by, staff.id);
    assert!(response.verifier_note.is_none());
    assert!(response.verified_by.is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn submit_with_empty_new_value_fails_validation(pool: PgPool) {
    init_tracing();
    let state = test_state(&pool);
    seed_personnel(&pool, "NRP-001").await;
    let staff = seed_user(&pool, UserRole::Staff, None).await;

    let result = submit_request(
        State(state),
        Extension(staff),
        Json(CreateRequest {
            personnel_nrp: "NRP-001".to_string(),
            payload: correction_payload("name", "A", ""),
        }),
    )
    .await;

    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[sqlx::test(migrations = "./migrations")]
async fn submit_for_unknown_nrp_fails_validation(pool: PgPool) {
    init_tracing();
    let state = test_state(&pool);
    let staff = seed_user(&pool, UserRole::Staff, None).await;

    let result = submit_request(
        State(state),
        Extension(staff),
        Json(CreateRequest {
            personnel_nrp: "NRP-404".to_string(),
            payload: correction_payload("name", "A", "B"),
        }),
    )
    .await;

    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[sqlx::test(migrations = "./migrations")]
async fn personnel_role_may_only_submit_own_corrections(pool: PgPool) {
    init_tracing();
    let state = test_state(&pool);
    seed_personnel(&pool, "NRP-001").await;
    seed_personnel(&pool, "NRP-002").await;
    let member = seed_user(&pool, UserRole::Personnel, Some("NRP-001")).await;

    // A mutation request is not a self-service correction.
    let result = submit_request(
        State(state.clone()),
        Extension(member.clone()),
        Json(CreateRequest {
            personnel_nrp: "NRP-001".to_string(),
            payload: mutation_payload("Danki"),
        }),
    )
    .await;
    assert!(matches!(result, Err(AppError::Forbidden(_))));

    // A correction for someone else's record is rejected.
    let result = submit_request(
        State(state.clone()),
        Extension(member.clone()),
        Json(CreateRequest {
            personnel_nrp: "NRP-002".to_string(),
            payload: correction_payload("name", "A", "B"),
        }),
    )
    .await;
    assert!(matches!(result, Err(AppError::Forbidden(_))));

    // A correction for their own record goes through.
    let result = submit_request(
        State(state),
        Extension(member),
        Json(CreateRequest {
            personnel_nrp: "NRP-001".to_string(),
            payload: correction_payload("name", "A", "B"),
        }),
    )
    .await;
    assert!(result.is_ok());
}

#[sqlx::test(migrations = "./migrations")]
async fn list_orders_newest_first_with_id_tiebreak(pool: PgPool) {
    init_tracing();
    let state = test_state(&pool);
    seed_personnel(&pool, "NRP-001").await;
    let staff = seed_user(&pool, UserRole::Staff, None).await;

    let base = Utc::now();
    let mut older = Request::new(
        "NRP-001".to_string(),
        correction_payload("name", "A", "B"),
        staff.id.clone(),
    );
    older.id = "req-older".to_string();
    older.created_at = base - Duration::minutes(5);
    request_repo::insert_request(&pool, &older).await.unwrap();

    // Two requests sharing a timestamp resolve by ascending id.
    for id in ["req-b", "req-a"] {
        let mut request = Request::new(
            "NRP-001".to_string(),
            correction_payload("name", "A", "B"),
            staff.id.clone(),
        );
        request.id = id.to_string();
        request.created_at = base;
        request_repo::insert_request(&pool, &request).await.unwrap();
    }

    let response = list_requests(
        State(state),
        Extension(staff),
        Query(RequestListQuery::default()),
    )
    .await
    .expect("list ok")
    .0;

    let ids: Vec<&str> = response.data.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["req-a", "req-b", "req-older"]);
    assert_eq!(response.total, 3);
}

#[sqlx::test(migrations = "./migrations")]
async fn list_filters_by_status_and_type(pool: PgPool) {
    init_tracing();
    let state = test_state(&pool);
    seed_personnel(&pool, "NRP-001").await;
    let staff = seed_user(&pool, UserRole::Staff, None).await;

    support::seed_request(&pool, "NRP-001", correction_payload("name", "A", "B"), &staff.id)
        .await;
    let mut decided = Request::new(
        "NRP-001".to_string(),
        mutation_payload("Danki"),
        staff.id.clone(),
    );
    decided.status = RequestStatus::Approved;
    decided.verifier_note = Some("ok".to_string());
    decided.verified_by = Some("verifier-x".to_string());
    decided.verified_at = Some(Utc::now());
    request_repo::insert_request(&pool, &decided).await.unwrap();

    let pending_only = list_requests(
        State(state.clone()),
        Extension(staff.clone()),
        Query(RequestListQuery {
            status: Some(RequestStatus::Pending),
            ..Default::default()
        }),
    )
    .await
    .expect("list ok")
    .0;
    assert_eq!(pending_only.data.len(), 1);
    assert!(pending_only
        .data
        .iter()
        .all(|r| r.status == RequestStatus::Pending));

    let mutations_only = list_requests(
        State(state),
        Extension(staff),
        Query(RequestListQuery {
            r#type: Some(RequestType::Mutation),
            ..Default::default()
        }),
    )
    .await
    .expect("list ok")
    .0;
    assert_eq!(mutations_only.data.len(), 1);
    assert_eq!(mutations_only.data[0].request_type, RequestType::Mutation);
}

#[sqlx::test(migrations = "./migrations")]
async fn personnel_role_sees_only_own_submissions(pool: PgPool) {
    init_tracing();
    let state = test_state(&pool);
    seed_personnel(&pool, "NRP-001").await;
    let staff = seed_user(&pool, UserRole::Staff, None).await;
    let member = seed_user(&pool, UserRole::Personnel, Some("NRP-001")).await;

    support::seed_request(&pool, "NRP-001", mutation_payload("Danki"), &staff.id).await;
    support::seed_request(&pool, "NRP-001", correction_payload("name", "A", "B"), &member.id)
        .await;

    let visible = list_requests(
        State(state),
        Extension(member.clone()),
        Query(RequestListQuery::default()),
    )
    .await
    .expect("list ok")
    .0;

    assert_eq!(visible.data.len(), 1);
    assert_eq!(visible.data[0].submitted_by, member.id);
}

#[sqlx::test(migrations = "./migrations")]
async fn list_searches_payload_text(pool: PgPool) {
    init_tracing();
    let state = test_state(&pool);
    seed_personnel(&pool, "NRP-001").await;
    let staff = seed_user(&pool, UserRole::Staff, None).await;

    support::seed_request(&pool, "NRP-001", promotion(), &staff.id).await;
    support::seed_request(&pool, "NRP-001", correction_payload("name", "A", "B"), &staff.id)
        .await;

    let response = list_requests(
        State(state),
        Extension(staff),
        Query(RequestListQuery {
            q: Some("MAYOR".to_string()),
            ..Default::default()
        }),
    )
    .await
    .expect("list ok")
    .0;

    assert_eq!(response.data.len(), 1);
    assert_eq!(response.data[0].request_type, RequestType::Promotion);
}

fn promotion() -> siparhanud_backend::models::request::RequestPayload {
    support::promotion_payload("MAYOR")
}
