//! Static and derived reference data used by form dropdowns.

use axum::{extract::State, Json};

use crate::{error::AppError, repositories::personnel as personnel_repo, state::AppState};

/// Rank ladder from enlisted to general officers, in promotion order.
pub const RANKS: &[&str] = &[
    "PRADA", "PRATU", "PRAKA", "KOPDA", "KOPTU", "KOPKA", "SERDA", "SERTU", "SERKA", "SERMA",
    "PELDA", "PELTU", "LETDA", "LETTU", "KAPTEN", "MAYOR", "LETKOL", "KOLONEL", "BRIGJEN",
    "MAYJEN", "LETJEN", "JENDERAL",
];

pub async fn list_ranks() -> Json<Vec<&'static str>> {
    Json(RANKS.to_vec())
}

pub async fn list_units(State(state): State<AppState>) -> Result<Json<Vec<String>>, AppError> {
    let units = personnel_repo::distinct_units(&state.pool).await?;
    Ok(Json(units))
}
