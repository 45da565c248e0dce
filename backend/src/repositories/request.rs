//! Repository functions for the request workflow. The decision write is a
//! conditional UPDATE on the stored status so two racing verifiers can
//! never both succeed.

use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::models::request::{Request, RequestStatus, RequestType};

const REQUEST_COLUMNS: &str = "id, personnel_nrp, request_type, payload, status, submitted_by, \
     verifier_note, verified_by, verified_at, created_at, updated_at";

#[derive(Debug, Clone, Default)]
pub struct RequestFilters {
    pub status: Option<RequestStatus>,
    pub request_type: Option<RequestType>,
    pub personnel_nrp: Option<String>,
    pub submitted_by: Option<String>,
    /// Case-insensitive match against the serialized payload.
    pub search: Option<String>,
}

pub async fn insert_request(pool: &PgPool, request: &Request) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO requests (id, personnel_nrp, request_type, payload, status, submitted_by, \
         verifier_note, verified_by, verified_at, created_at, updated_at) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)",
    )
    .bind(&request.id)
    .bind(&request.personnel_nrp)
    .bind(request.request_type.db_value())
    .bind(&request.payload)
    .bind(request.status.db_value())
    .bind(&request.submitted_by)
    .bind(&request.verifier_note)
    .bind(&request.verified_by)
    .bind(request.verified_at)
    .bind(request.created_at)
    .bind(request.updated_at)
    .execute(pool)
    .await
    .map(|_| ())
}

pub async fn fetch_request(pool: &PgPool, id: &str) -> Result<Option<Request>, sqlx::Error> {
    sqlx::query_as::<_, Request>(&format!(
        "SELECT {REQUEST_COLUMNS} FROM requests WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Lists requests newest first; ties on `created_at` break on ascending id
/// so the order is deterministic.
pub async fn list_requests(
    pool: &PgPool,
    filters: &RequestFilters,
    limit: i64,
    offset: i64,
) -> Result<Vec<Request>, sqlx::Error> {
    let mut builder: QueryBuilder<Postgres> =
        QueryBuilder::new(format!("SELECT {REQUEST_COLUMNS} FROM requests"));
    apply_request_filters(&mut builder, filters);
    builder
        .push(" ORDER BY created_at DESC, id ASC LIMIT ")
        .push_bind(limit)
        .push(" OFFSET ")
        .push_bind(offset);
    builder.build_query_as::<Request>().fetch_all(pool).await
}

pub async fn count_requests(pool: &PgPool, filters: &RequestFilters) -> Result<i64, sqlx::Error> {
    let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("SELECT COUNT(*) FROM requests");
    apply_request_filters(&mut builder, filters);
    let (count,): (i64,) = builder.build_query_as().fetch_one(pool).await?;
    Ok(count)
}

fn apply_request_filters<'a>(
    builder: &mut QueryBuilder<'a, Postgres>,
    filters: &'a RequestFilters,
) {
    let mut has_clause = false;
    if let Some(status) = filters.status {
        push_clause(builder, &mut has_clause);
        builder.push("status = ").push_bind(status.db_value());
    }
    if let Some(request_type) = filters.request_type {
        push_clause(builder, &mut has_clause);
        builder
            .push("request_type = ")
            .push_bind(request_type.db_value());
    }
    if let Some(ref nrp) = filters.personnel_nrp {
        push_clause(builder, &mut has_clause);
        builder.push("personnel_nrp = ").push_bind(nrp);
    }
    if let Some(ref submitter) = filters.submitted_by {
        push_clause(builder, &mut has_clause);
        builder.push("submitted_by = ").push_bind(submitter);
    }
    if let Some(ref search) = filters.search {
        push_clause(builder, &mut has_clause);
        builder
            .push("payload::text ILIKE ")
            .push_bind(format!("%{}%", search));
    }
}

fn push_clause(builder: &mut QueryBuilder<'_, Postgres>, has_clause: &mut bool) {
    if *has_clause {
        builder.push(" AND ");
    } else {
        builder.push(" WHERE ");
        *has_clause = true;
    }
}

/// Applies a verification decision if and only if the stored status is
/// still `pending` (compare-and-swap). Returns the number of rows updated:
/// 0 means another decision won the race or the id is unknown.
pub async fn decide_request(
    pool: &PgPool,
    id: &str,
    status: RequestStatus,
    verifier_note: &str,
    verified_by: &str,
    verified_at: DateTime<Utc>,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE requests SET status = $1, verifier_note = $2, verified_by = $3, \
         verified_at = $4, updated_at = $4 \
         WHERE id = $5 AND status = 'pending'",
    )
    .bind(status.db_value())
    .bind(verifier_note)
    .bind(verified_by)
    .bind(verified_at)
    .bind(id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected())
}

pub async fn count_pending_by_type(pool: &PgPool) -> Result<Vec<(String, i64)>, sqlx::Error> {
    sqlx::query_as(
        "SELECT request_type, COUNT(*) FROM requests WHERE status = 'pending' \
         GROUP BY request_type",
    )
    .fetch_all(pool)
    .await
}
