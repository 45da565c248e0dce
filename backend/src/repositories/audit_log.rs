//! Repository functions for the audit trail.

use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::models::audit_log::AuditLog;

const AUDIT_COLUMNS: &str = "id, occurred_at, actor_id, actor_username, action, entity_type, \
     entity_id, result, metadata, request_id";

pub async fn insert_audit_log(pool: &PgPool, log: &AuditLog) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO audit_logs (id, occurred_at, actor_id, actor_username, action, entity_type, \
         entity_id, result, metadata, request_id) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
    )
    .bind(&log.id)
    .bind(log.occurred_at)
    .bind(&log.actor_id)
    .bind(&log.actor_username)
    .bind(&log.action)
    .bind(&log.entity_type)
    .bind(&log.entity_id)
    .bind(&log.result)
    .bind(&log.metadata)
    .bind(&log.request_id)
    .execute(pool)
    .await
    .map(|_| ())
}

#[derive(Debug, Clone, Default)]
pub struct AuditLogFilters {
    pub entity_type: Option<String>,
    pub actor_id: Option<String>,
    pub action: Option<String>,
}

pub async fn list_audit_logs(
    pool: &PgPool,
    filters: &AuditLogFilters,
    limit: i64,
    offset: i64,
) -> Result<Vec<AuditLog>, sqlx::Error> {
    let mut builder: QueryBuilder<Postgres> =
        QueryBuilder::new(format!("SELECT {AUDIT_COLUMNS} FROM audit_logs"));
    let mut has_clause = false;
    if let Some(ref entity_type) = filters.entity_type {
        push_clause(&mut builder, &mut has_clause);
        builder.push("entity_type = ").push_bind(entity_type);
    }
    if let Some(ref actor_id) = filters.actor_id {
        push_clause(&mut builder, &mut has_clause);
        builder.push("actor_id = ").push_bind(actor_id);
    }
    if let Some(ref action) = filters.action {
        push_clause(&mut builder, &mut has_clause);
        builder.push("action = ").push_bind(action);
    }
    builder
        .push(" ORDER BY occurred_at DESC, id ASC LIMIT ")
        .push_bind(limit)
        .push(" OFFSET ")
        .push_bind(offset);
    builder.build_query_as::<AuditLog>().fetch_all(pool).await
}

pub async fn recent_audit_logs(pool: &PgPool, limit: i64) -> Result<Vec<AuditLog>, sqlx::Error> {
    sqlx::query_as::<_, AuditLog>(&format!(
        "SELECT {AUDIT_COLUMNS} FROM audit_logs ORDER BY occurred_at DESC, id ASC LIMIT $1"
    ))
    .bind(limit)
    .fetch_all(pool)
    .await
}

fn push_clause(builder: &mut QueryBuilder<'_, Postgres>, has_clause: &mut bool) {
    if *has_clause {
        builder.push(" AND ");
    } else {
        builder.push(" WHERE ");
        *has_clause = true;
    }
}
