use axum::extract::{Extension, Path, Query, State};
use axum::Json;
use sqlx::PgPool;

use siparhanud_backend::{
    error::AppError,
    handlers::personnel::{
        create_personnel, get_personnel, list_personnel, update_personnel, PersonnelListQuery,
    },
    handlers::service_records::{create_rank_history, list_rank_history},
    models::{
        personnel::{CreatePersonnel, UpdatePersonnel},
        rank_history::CreateRankHistory,
        user::UserRole,
    },
    repositories::personnel as personnel_repo,
};

mod support;
use support::{seed_personnel, seed_user, test_state};

fn init_tracing() {
    let _ = tracing_subscriber::fmt::try_init();
}

fn create_payload(nrp: &str, name: &str) -> CreatePersonnel {
    CreatePersonnel {
        nrp: nrp.to_string(),
        name: name.to_string(),
        rank: "SERDA".to_string(),
        position: "Tabak".to_string(),
        unit: Some("Yonarhanud 1".to_string()),
        position_since: None,
        birth_date: None,
        achievements: None,
        general_education: None,
        specialist_education: None,
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn create_and_fetch_personnel(pool: PgPool) {
    init_tracing();
    let state = test_state(&pool);
    let staff = seed_user(&pool, UserRole::Staff, None).await;

    let created = create_personnel(
        State(state.clone()),
        Json(create_payload("NRP-100", "Agus Salim")),
    )
    .await
    .expect("create ok")
    .0;

    let fetched = get_personnel(
        State(state),
        Extension(staff),
        Path(created.id.clone()),
    )
    .await
    .expect("get ok")
    .0;
    assert_eq!(fetched.nrp, "NRP-100");
    assert_eq!(fetched.name, "Agus Salim");
}

#[sqlx::test(migrations = "./migrations")]
async fn duplicate_nrp_conflicts(pool: PgPool) {
    init_tracing();
    let state = test_state(&pool);
    seed_personnel(&pool, "NRP-100").await;

    let result = create_personnel(State(state), Json(create_payload("NRP-100", "Someone Else")))
        .await;
    assert!(matches!(result, Err(AppError::Conflict(_))));
}

#[sqlx::test(migrations = "./migrations")]
async fn create_rejects_missing_required_fields(pool: PgPool) {
    init_tracing();
    let state = test_state(&pool);

    let mut payload = create_payload("NRP-100", "Agus Salim");
    payload.rank = "  ".to_string();
    let result = create_personnel(State(state), Json(payload)).await;
    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[sqlx::test(migrations = "./migrations")]
async fn list_filters_by_search_and_unit(pool: PgPool) {
    init_tracing();
    let state = test_state(&pool);
    let staff = seed_user(&pool, UserRole::Staff, None).await;
    seed_personnel(&pool, "NRP-100").await;

    create_personnel(State(state.clone()), Json(create_payload("NRP-200", "Agus Salim")))
        .await
        .expect("create ok");

    let response = list_personnel(
        State(state.clone()),
        Extension(staff.clone()),
        Query(PersonnelListQuery {
            search: Some("Agus".to_string()),
            ..Default::default()
        }),
    )
    .await
    .expect("list ok")
    .0;
    assert_eq!(response.total, 1);
    assert_eq!(response.data[0].nrp, "NRP-200");

    let response = list_personnel(
        State(state),
        Extension(staff),
        Query(PersonnelListQuery {
            unit: Some("Yonarhanud".to_string()),
            ..Default::default()
        }),
    )
    .await
    .expect("list ok")
    .0;
    assert_eq!(response.total, 2);
}

#[sqlx::test(migrations = "./migrations")]
async fn personnel_role_is_scoped_to_own_record(pool: PgPool) {
    init_tracing();
    let state = test_state(&pool);
    let own = seed_personnel(&pool, "NRP-100").await;
    let other = seed_personnel(&pool, "NRP-200").await;
    let member = seed_user(&pool, UserRole::Personnel, Some("NRP-100")).await;

    let listed = list_personnel(
        State(state.clone()),
        Extension(member.clone()),
        Query(PersonnelListQuery::default()),
    )
    .await
    .expect("list ok")
    .0;
    assert_eq!(listed.total, 1);
    assert_eq!(listed.data[0].nrp, "NRP-100");

    let allowed = get_personnel(
        State(state.clone()),
        Extension(member.clone()),
        Path(own.id.clone()),
    )
    .await;
    assert!(allowed.is_ok());

    let denied = get_personnel(State(state), Extension(member), Path(other.id.clone())).await;
    assert!(matches!(denied, Err(AppError::Forbidden(_))));
}

#[sqlx::test(migrations = "./migrations")]
async fn update_merges_partial_fields(pool: PgPool) {
    init_tracing();
    let state = test_state(&pool);
    let personnel = seed_personnel(&pool, "NRP-100").await;

    let updated = update_personnel(
        State(state),
        Path(personnel.id.clone()),
        Json(UpdatePersonnel {
            position: Some("Danki".to_string()),
            ..Default::default()
        }),
    )
    .await
    .expect("update ok")
    .0;

    assert_eq!(updated.position, "Danki");
    assert_eq!(updated.name, "Fredy Jaguar");
}

#[sqlx::test(migrations = "./migrations")]
async fn rank_history_create_moves_current_rank(pool: PgPool) {
    init_tracing();
    let state = test_state(&pool);
    let personnel = seed_personnel(&pool, "NRP-100").await;

    create_rank_history(
        State(state.clone()),
        Path(personnel.id.clone()),
        Json(CreateRankHistory {
            previous_rank: "KAPTEN".to_string(),
            new_rank: "MAYOR".to_string(),
            effective_date: "2025-04-01".to_string(),
            decree_number: Some("SK/9/2025".to_string()),
            notes: None,
        }),
    )
    .await
    .expect("create ok");

    let current = personnel_repo::find_personnel_by_nrp(&pool, "NRP-100")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(current.rank, "MAYOR");

    let history = list_rank_history(State(state), Path(personnel.id.clone()))
        .await
        .expect("list ok")
        .0;
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].new_rank, "MAYOR");
}
