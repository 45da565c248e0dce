use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::{IntoParams, ToSchema};

use crate::{
    error::AppError,
    models::{
        personnel::{PersonnelResponse, PersonnelStatus},
        request::{RequestResponse, RequestStatus},
    },
    repositories::{personnel as personnel_repo, request as request_repo},
    state::AppState,
    utils::csv::append_csv_row,
};

const REPORT_ROW_LIMIT: i64 = 10_000;

const PERSONNEL_CSV_HEADER: &[&str] = &[
    "nrp",
    "name",
    "rank",
    "position",
    "unit",
    "position_since",
    "birth_date",
    "status",
];

#[derive(Debug, Default, Deserialize, Serialize, IntoParams, ToSchema)]
pub struct PersonnelReportQuery {
    /// `json` (default) or `csv`.
    pub format: Option<String>,
    pub rank: Option<String>,
    pub unit: Option<String>,
    pub status: Option<PersonnelStatus>,
}

pub async fn personnel_report(
    State(state): State<AppState>,
    Query(query): Query<PersonnelReportQuery>,
) -> Result<Response, AppError> {
    let format = query.format.as_deref().unwrap_or("json");
    if !matches!(format, "json" | "csv") {
        return Err(AppError::Validation(vec![
            "format: must be json or csv".to_string(),
        ]));
    }

    let filters = personnel_repo::PersonnelFilters {
        rank: query.rank,
        unit: query.unit,
        status: Some(query.status.unwrap_or(PersonnelStatus::Active)),
        ..Default::default()
    };

    let personnel =
        personnel_repo::list_personnel(&state.pool, &filters, REPORT_ROW_LIMIT, 0).await?;

    if format == "csv" {
        let mut buffer = String::new();
        append_csv_row(
            &mut buffer,
            &PERSONNEL_CSV_HEADER
                .iter()
                .map(|s| s.to_string())
                .collect::<Vec<_>>(),
        );
        for p in &personnel {
            append_csv_row(
                &mut buffer,
                &[
                    p.nrp.clone(),
                    p.name.clone(),
                    p.rank.clone(),
                    p.position.clone(),
                    p.unit.clone().unwrap_or_default(),
                    p.position_since.clone().unwrap_or_default(),
                    p.birth_date.clone().unwrap_or_default(),
                    p.status.db_value().to_string(),
                ],
            );
        }

        return Ok((
            [
                (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
                (
                    header::CONTENT_DISPOSITION,
                    "attachment; filename=\"personnel.csv\"",
                ),
            ],
            buffer,
        )
            .into_response());
    }

    let data: Vec<PersonnelResponse> = personnel.into_iter().map(PersonnelResponse::from).collect();
    let total = data.len();
    Ok(Json(json!({ "data": data, "total": total })).into_response())
}

#[derive(Debug, Default, Deserialize, Serialize, IntoParams, ToSchema)]
pub struct RequestsReportQuery {
    pub status: Option<RequestStatus>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
/// A request enriched with the subject's identity for reporting.
pub struct RequestReportRow {
    #[serde(flatten)]
    pub request: RequestResponse,
    pub personnel_name: Option<String>,
    pub personnel_rank: Option<String>,
}

pub async fn requests_report(
    State(state): State<AppState>,
    Query(query): Query<RequestsReportQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let filters = request_repo::RequestFilters {
        status: query.status,
        ..Default::default()
    };
    let requests = request_repo::list_requests(&state.pool, &filters, REPORT_ROW_LIMIT, 0).await?;

    let mut rows = Vec::with_capacity(requests.len());
    for request in requests {
        let personnel =
            personnel_repo::find_personnel_by_nrp(&state.pool, &request.personnel_nrp).await?;
        rows.push(RequestReportRow {
            request: RequestResponse::from(request),
            personnel_name: personnel.as_ref().map(|p| p.name.clone()),
            personnel_rank: personnel.map(|p| p.rank),
        });
    }

    let total = rows.len();
    Ok(Json(json!({ "data": rows, "total": total })))
}
