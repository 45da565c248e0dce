use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::{
    error::AppError,
    models::{audit_log::AuditLogResponse, PaginationQuery},
    repositories::audit_log as audit_log_repo,
    state::AppState,
};

#[derive(Debug, Default, Deserialize, Serialize, IntoParams, ToSchema)]
pub struct AuditLogListQuery {
    pub entity_type: Option<String>,
    pub actor_id: Option<String>,
    pub action: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

pub async fn list_audit_logs(
    State(state): State<AppState>,
    Query(query): Query<AuditLogListQuery>,
) -> Result<Json<Vec<AuditLogResponse>>, AppError> {
    let pagination = PaginationQuery {
        limit: query.limit.unwrap_or(50),
        offset: query.offset.unwrap_or(0),
    };

    let filters = audit_log_repo::AuditLogFilters {
        entity_type: query.entity_type,
        actor_id: query.actor_id,
        action: query.action,
    };

    let logs = audit_log_repo::list_audit_logs(
        &state.pool,
        &filters,
        pagination.limit(),
        pagination.offset(),
    )
    .await?;

    Ok(Json(logs.into_iter().map(AuditLogResponse::from).collect()))
}
