use axum::{
    extract::{Extension, Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::{
    error::AppError,
    models::{
        personnel::{
            CreatePersonnel, Personnel, PersonnelResponse, PersonnelStatus, UpdatePersonnel,
        },
        user::{User, UserRole},
        PaginatedResponse, PaginationQuery,
    },
    repositories::personnel as personnel_repo,
    state::AppState,
    validation::rules,
};

#[derive(Debug, Default, Deserialize, Serialize, IntoParams, ToSchema)]
pub struct PersonnelListQuery {
    /// Free-text search over name, NRP, and position.
    pub search: Option<String>,
    pub rank: Option<String>,
    pub unit: Option<String>,
    pub status: Option<PersonnelStatus>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

pub async fn list_personnel(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Query(query): Query<PersonnelListQuery>,
) -> Result<Json<PaginatedResponse<PersonnelResponse>>, AppError> {
    let pagination = PaginationQuery {
        limit: query.limit.unwrap_or(50),
        offset: query.offset.unwrap_or(0),
    };

    let mut filters = personnel_repo::PersonnelFilters {
        search: query.search,
        rank: query.rank,
        unit: query.unit,
        status: query.status,
        nrp: None,
    };

    // Self-service accounts only ever see their own record.
    if user.role == UserRole::Personnel {
        filters.nrp = Some(user.nrp.clone().unwrap_or_default());
    }

    let total = personnel_repo::count_personnel(&state.pool, &filters).await?;
    let items = personnel_repo::list_personnel(
        &state.pool,
        &filters,
        pagination.limit(),
        pagination.offset(),
    )
    .await?;

    Ok(Json(PaginatedResponse::new(
        items.into_iter().map(PersonnelResponse::from).collect(),
        total,
        pagination.limit(),
        pagination.offset(),
    )))
}

pub async fn get_personnel(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(personnel_id): Path<String>,
) -> Result<Json<PersonnelResponse>, AppError> {
    let personnel = personnel_repo::find_personnel_by_id(&state.pool, &personnel_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Personnel record not found".into()))?;

    if user.role == UserRole::Personnel && user.nrp.as_deref() != Some(personnel.nrp.as_str()) {
        return Err(AppError::Forbidden(
            "Personnel accounts can only access their own record".into(),
        ));
    }

    Ok(Json(PersonnelResponse::from(personnel)))
}

pub async fn create_personnel(
    State(state): State<AppState>,
    Json(payload): Json<CreatePersonnel>,
) -> Result<Json<PersonnelResponse>, AppError> {
    let mut errors = Vec::new();
    if rules::validate_nrp(&payload.nrp).is_err() {
        errors.push("nrp: invalid format".to_string());
    }
    if payload.name.trim().is_empty() {
        errors.push("name: required".to_string());
    }
    if payload.rank.trim().is_empty() {
        errors.push("rank: required".to_string());
    }
    if payload.position.trim().is_empty() {
        errors.push("position: required".to_string());
    }
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    if personnel_repo::find_personnel_by_nrp(&state.pool, &payload.nrp)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict("NRP is already registered".into()));
    }

    let mut personnel = Personnel::new(payload.nrp, payload.name, payload.rank, payload.position);
    personnel.unit = payload.unit;
    personnel.position_since = payload.position_since;
    personnel.birth_date = payload.birth_date;
    personnel.achievements = payload.achievements;
    personnel.general_education = payload.general_education;
    personnel.specialist_education = payload.specialist_education;

    personnel_repo::insert_personnel(&state.pool, &personnel).await?;
    Ok(Json(PersonnelResponse::from(personnel)))
}

pub async fn update_personnel(
    State(state): State<AppState>,
    Path(personnel_id): Path<String>,
    Json(payload): Json<UpdatePersonnel>,
) -> Result<Json<PersonnelResponse>, AppError> {
    let existing = personnel_repo::find_personnel_by_id(&state.pool, &personnel_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Personnel record not found".into()))?;

    let merged = payload.apply_to(existing);
    personnel_repo::update_personnel(&state.pool, &merged).await?;

    Ok(Json(PersonnelResponse::from(merged)))
}
