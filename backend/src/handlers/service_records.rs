//! Subresources of a personnel record: rank history, position history,
//! education, and family members. Creating a rank or position entry also
//! moves the personnel record's current rank/position, matching how the
//! records section and the master record stay in sync.

use axum::{
    extract::{Path, State},
    Json,
};
use validator::Validate;

use crate::{
    error::AppError,
    models::{
        education::{CreateEducationRecord, EducationRecord},
        family::{CreateFamilyMember, FamilyMember},
        personnel::Personnel,
        position_history::{CreatePositionHistory, PositionHistory},
        rank_history::{CreateRankHistory, RankHistory},
    },
    repositories::{
        education as education_repo, family as family_repo, personnel as personnel_repo,
        position_history as position_history_repo, rank_history as rank_history_repo,
    },
    state::AppState,
};

async fn load_personnel(state: &AppState, personnel_id: &str) -> Result<Personnel, AppError> {
    personnel_repo::find_personnel_by_id(&state.pool, personnel_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Personnel record not found".into()))
}

pub async fn list_rank_history(
    State(state): State<AppState>,
    Path(personnel_id): Path<String>,
) -> Result<Json<Vec<RankHistory>>, AppError> {
    load_personnel(&state, &personnel_id).await?;
    let history = rank_history_repo::list_rank_history(&state.pool, &personnel_id).await?;
    Ok(Json(history))
}

pub async fn create_rank_history(
    State(state): State<AppState>,
    Path(personnel_id): Path<String>,
    Json(payload): Json<CreateRankHistory>,
) -> Result<Json<RankHistory>, AppError> {
    let personnel = load_personnel(&state, &personnel_id).await?;

    if payload.new_rank.trim().is_empty() {
        return Err(AppError::Validation(vec!["new_rank: required".to_string()]));
    }

    let entry = RankHistory::new(
        personnel.id.clone(),
        payload.previous_rank,
        payload.new_rank.clone(),
        payload.effective_date,
        payload.decree_number,
        payload.notes,
    );
    rank_history_repo::insert_rank_history(&state.pool, &entry).await?;
    personnel_repo::set_personnel_rank(&state.pool, &personnel.nrp, &payload.new_rank).await?;

    Ok(Json(entry))
}

pub async fn list_position_history(
    State(state): State<AppState>,
    Path(personnel_id): Path<String>,
) -> Result<Json<Vec<PositionHistory>>, AppError> {
    load_personnel(&state, &personnel_id).await?;
    let history = position_history_repo::list_position_history(&state.pool, &personnel_id).await?;
    Ok(Json(history))
}

pub async fn create_position_history(
    State(state): State<AppState>,
    Path(personnel_id): Path<String>,
    Json(payload): Json<CreatePositionHistory>,
) -> Result<Json<PositionHistory>, AppError> {
    let personnel = load_personnel(&state, &personnel_id).await?;

    if payload.new_position.trim().is_empty() {
        return Err(AppError::Validation(vec![
            "new_position: required".to_string(),
        ]));
    }

    let entry = PositionHistory::new(
        personnel.id.clone(),
        payload.previous_position,
        payload.new_position.clone(),
        payload.unit.clone(),
        payload.effective_date,
        payload.decree_number,
        payload.notes,
    );
    position_history_repo::insert_position_history(&state.pool, &entry).await?;
    personnel_repo::set_personnel_assignment(
        &state.pool,
        &personnel.nrp,
        Some(&payload.new_position),
        payload.unit.as_deref(),
    )
    .await?;

    Ok(Json(entry))
}

pub async fn list_education_records(
    State(state): State<AppState>,
    Path(personnel_id): Path<String>,
) -> Result<Json<Vec<EducationRecord>>, AppError> {
    load_personnel(&state, &personnel_id).await?;
    let records = education_repo::list_education_records(&state.pool, &personnel_id).await?;
    Ok(Json(records))
}

pub async fn create_education_record(
    State(state): State<AppState>,
    Path(personnel_id): Path<String>,
    Json(payload): Json<CreateEducationRecord>,
) -> Result<Json<EducationRecord>, AppError> {
    let personnel = load_personnel(&state, &personnel_id).await?;
    payload.validate()?;

    let record = EducationRecord::new(
        personnel.id,
        payload.education_kind,
        payload.education_name,
        payload.year,
        payload.location,
        payload.notes,
    );
    education_repo::insert_education_record(&state.pool, &record).await?;

    Ok(Json(record))
}

pub async fn list_family_members(
    State(state): State<AppState>,
    Path(personnel_id): Path<String>,
) -> Result<Json<Vec<FamilyMember>>, AppError> {
    load_personnel(&state, &personnel_id).await?;
    let members = family_repo::list_family_members(&state.pool, &personnel_id).await?;
    Ok(Json(members))
}

pub async fn create_family_member(
    State(state): State<AppState>,
    Path(personnel_id): Path<String>,
    Json(payload): Json<CreateFamilyMember>,
) -> Result<Json<FamilyMember>, AppError> {
    let personnel = load_personnel(&state, &personnel_id).await?;

    let mut errors = Vec::new();
    if payload.relationship.trim().is_empty() {
        errors.push("relationship: required".to_string());
    }
    if payload.name.trim().is_empty() {
        errors.push("name: required".to_string());
    }
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let member = FamilyMember::new(
        personnel.id,
        payload.relationship,
        payload.name,
        payload.birth_date,
        payload.occupation,
        payload.notes,
    );
    family_repo::insert_family_member(&state.pool, &member).await?;

    Ok(Json(member))
}
