//! Best-effort audit trail. Recording failures are logged and never
//! propagate to the request that triggered them.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::{types::Json, PgPool};
use uuid::Uuid;

use crate::models::audit_log::AuditLog;
use crate::repositories::audit_log as audit_log_repo;

#[derive(Debug, Clone)]
pub struct AuditLogEntry {
    pub occurred_at: DateTime<Utc>,
    pub actor_id: Option<String>,
    pub actor_username: Option<String>,
    pub action: String,
    pub entity_type: String,
    pub entity_id: Option<String>,
    pub result: String,
    pub metadata: Option<Value>,
    pub request_id: Option<String>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuditLogServiceTrait: Send + Sync {
    async fn record_event(&self, entry: AuditLogEntry) -> Result<(), sqlx::Error>;
}

#[derive(Debug, Clone)]
pub struct AuditLogService {
    pool: PgPool,
}

impl AuditLogService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuditLogServiceTrait for AuditLogService {
    async fn record_event(&self, entry: AuditLogEntry) -> Result<(), sqlx::Error> {
        let log = AuditLog {
            id: Uuid::new_v4().to_string(),
            occurred_at: entry.occurred_at,
            actor_id: entry.actor_id,
            actor_username: entry.actor_username,
            action: entry.action,
            entity_type: entry.entity_type,
            entity_id: entry.entity_id,
            result: entry.result,
            metadata: entry.metadata.map(Json),
            request_id: entry.request_id,
        };

        audit_log_repo::insert_audit_log(&self.pool, &log).await
    }
}
