use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

use crate::{
    error::AppError,
    models::audit_log::AuditLogResponse,
    repositories::{
        audit_log as audit_log_repo, personnel as personnel_repo, request as request_repo,
    },
    state::AppState,
};

const RECENT_ACTIVITY_LIMIT: i64 = 10;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DashboardStats {
    pub total_personnel: i64,
    pub active_personnel: i64,
    /// Pending request counts keyed by request type.
    pub pending_requests: BTreeMap<String, i64>,
    /// Active personnel counts keyed by rank.
    pub by_rank: BTreeMap<String, i64>,
    pub recent_activities: Vec<AuditLogResponse>,
}

pub async fn get_dashboard_stats(
    State(state): State<AppState>,
) -> Result<Json<DashboardStats>, AppError> {
    let filters = personnel_repo::PersonnelFilters::default();
    let total_personnel = personnel_repo::count_personnel(&state.pool, &filters).await?;

    let by_status = personnel_repo::count_by_status(&state.pool).await?;
    let active_personnel = by_status
        .iter()
        .find(|(status, _)| status == "active")
        .map(|(_, count)| *count)
        .unwrap_or(0);

    let pending_requests: BTreeMap<String, i64> = request_repo::count_pending_by_type(&state.pool)
        .await?
        .into_iter()
        .collect();

    let by_rank: BTreeMap<String, i64> = personnel_repo::count_active_by_rank(&state.pool)
        .await?
        .into_iter()
        .collect();

    let recent_activities = audit_log_repo::recent_audit_logs(&state.pool, RECENT_ACTIVITY_LIMIT)
        .await?
        .into_iter()
        .map(AuditLogResponse::from)
        .collect();

    Ok(Json(DashboardStats {
        total_personnel,
        active_personnel,
        pending_requests,
        by_rank,
        recent_activities,
    }))
}
