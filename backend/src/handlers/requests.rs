//! Request submission and listing. Verification decisions live in
//! `handlers::verification`.

use axum::{
    extract::{Extension, Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::{
    authz::{role_allows, Operation},
    error::AppError,
    models::{
        request::{CreateRequest, Request, RequestPayload, RequestResponse, RequestStatus, RequestType},
        user::{User, UserRole},
        PaginatedResponse, PaginationQuery,
    },
    repositories::{personnel as personnel_repo, request as request_repo},
    state::AppState,
};

pub async fn submit_request(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Json(payload): Json<CreateRequest>,
) -> Result<Json<RequestResponse>, AppError> {
    if !role_allows(user.role, Operation::RequestSubmit) {
        return Err(AppError::Forbidden(
            "Your role cannot submit requests".into(),
        ));
    }

    // Self-service accounts may only request corrections to their own record.
    if user.role == UserRole::Personnel {
        if !matches!(payload.payload, RequestPayload::Correction(_)) {
            return Err(AppError::Forbidden(
                "Personnel accounts can only submit correction requests".into(),
            ));
        }
        if user.nrp.as_deref() != Some(payload.personnel_nrp.as_str()) {
            return Err(AppError::Forbidden(
                "Corrections can only be requested for your own record".into(),
            ));
        }
    }

    payload.payload.validate().map_err(AppError::Validation)?;

    if personnel_repo::find_personnel_by_nrp(&state.pool, &payload.personnel_nrp)
        .await?
        .is_none()
    {
        return Err(AppError::Validation(vec![format!(
            "personnel_nrp: no personnel record with NRP {}",
            payload.personnel_nrp
        )]));
    }

    let request = Request::new(payload.personnel_nrp, payload.payload, user.id);
    request_repo::insert_request(&state.pool, &request).await?;

    Ok(Json(RequestResponse::from(request)))
}

#[derive(Debug, Default, Deserialize, Serialize, IntoParams, ToSchema)]
pub struct RequestListQuery {
    pub status: Option<RequestStatus>,
    #[serde(rename = "type")]
    #[param(value_type = Option<String>)]
    pub r#type: Option<RequestType>,
    pub personnel_nrp: Option<String>,
    pub submitted_by: Option<String>,
    /// Free-text search over the request payload.
    pub q: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

pub async fn list_requests(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Query(query): Query<RequestListQuery>,
) -> Result<Json<PaginatedResponse<RequestResponse>>, AppError> {
    let pagination = PaginationQuery {
        limit: query.limit.unwrap_or(50),
        offset: query.offset.unwrap_or(0),
    };

    let mut filters = request_repo::RequestFilters {
        status: query.status,
        request_type: query.r#type,
        personnel_nrp: query.personnel_nrp,
        submitted_by: query.submitted_by,
        search: query.q,
    };

    // Self-service accounts only see their own submissions.
    if user.role == UserRole::Personnel {
        filters.submitted_by = Some(user.id.clone());
    }

    let total = request_repo::count_requests(&state.pool, &filters).await?;
    let items = request_repo::list_requests(
        &state.pool,
        &filters,
        pagination.limit(),
        pagination.offset(),
    )
    .await?;

    Ok(Json(PaginatedResponse::new(
        items.into_iter().map(RequestResponse::from).collect(),
        total,
        pagination.limit(),
        pagination.offset(),
    )))
}

pub async fn get_request(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(request_id): Path<String>,
) -> Result<Json<RequestResponse>, AppError> {
    let request = request_repo::fetch_request(&state.pool, &request_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Request not found".into()))?;

    if user.role == UserRole::Personnel && request.submitted_by != user.id {
        return Err(AppError::Forbidden(
            "Personnel accounts can only access their own requests".into(),
        ));
    }

    Ok(Json(RequestResponse::from(request)))
}
