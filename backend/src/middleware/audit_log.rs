//! Best-effort activity recording. Write operations are classified by
//! method and path; matching events are recorded through the audit service
//! after the response is produced. Recording runs detached so it can never
//! delay or fail the request.

use axum::{
    extract::Request,
    http::{HeaderMap, Method},
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    models::user::User,
    services::audit_log::{AuditLogEntry, AuditLogServiceTrait},
};

struct AuditEventDescriptor {
    action: &'static str,
    entity_type: &'static str,
    entity_id: Option<String>,
}

pub async fn audit_log(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let Some(descriptor) = classify_event(&method, &path) else {
        return next.run(request).await;
    };

    let audit_service = request
        .extensions()
        .get::<Arc<dyn AuditLogServiceTrait>>()
        .cloned();
    let actor_before = request.extensions().get::<User>().cloned();
    let request_id = extract_request_id(request.headers());

    let response = next.run(request).await;

    let Some(audit_service) = audit_service else {
        return response;
    };

    let status = response.status();
    let actor = response
        .extensions()
        .get::<User>()
        .cloned()
        .or(actor_before);
    let result = if status.is_client_error() || status.is_server_error() {
        "failure"
    } else {
        "success"
    };
    let metadata = if result == "failure" {
        Some(serde_json::json!({ "http_status": status.as_u16() }))
    } else {
        None
    };

    let entry = AuditLogEntry {
        occurred_at: Utc::now(),
        actor_id: actor.as_ref().map(|user| user.id.clone()),
        actor_username: actor.as_ref().map(|user| user.username.clone()),
        action: descriptor.action.to_string(),
        entity_type: descriptor.entity_type.to_string(),
        entity_id: descriptor.entity_id,
        result: result.to_string(),
        metadata,
        request_id: Some(request_id),
    };

    let method = method.to_string();
    tokio::spawn(async move {
        if let Err(err) = audit_service.record_event(entry).await {
            tracing::warn!(
                error = ?err,
                method = %method,
                path = %path,
                "Failed to record audit log"
            );
        }
    });

    response
}

fn classify_event(method: &Method, path: &str) -> Option<AuditEventDescriptor> {
    let normalized = path.trim_end_matches('/');
    if !normalized.starts_with("/api/") {
        return None;
    }

    let segments: Vec<&str> = normalized.trim_start_matches('/').split('/').collect();

    match (method, segments.as_slice()) {
        (&Method::POST, ["api", "auth", "login"]) => Some(event("auth_login", "user", None)),
        (&Method::POST, ["api", "auth", "logout"]) => Some(event("auth_logout", "user", None)),
        (&Method::PUT, ["api", "auth", "change-password"]) => {
            Some(event("password_change", "user", None))
        }
        (&Method::POST, ["api", "init", "setup"]) => Some(event("system_setup", "system", None)),
        (&Method::POST, ["api", "users"]) => Some(event("user_create", "user", None)),
        (&Method::PUT, ["api", "users", user_id]) => Some(event(
            "user_update",
            "user",
            Some((*user_id).to_string()),
        )),
        (&Method::POST, ["api", "users", user_id, "reset-password"]) => Some(event(
            "user_password_reset",
            "user",
            Some((*user_id).to_string()),
        )),
        (&Method::DELETE, ["api", "users", user_id]) => Some(event(
            "user_deactivate",
            "user",
            Some((*user_id).to_string()),
        )),
        (&Method::POST, ["api", "personnel"]) => Some(event("personnel_create", "personnel", None)),
        (&Method::PUT, ["api", "personnel", personnel_id]) => Some(event(
            "personnel_update",
            "personnel",
            Some((*personnel_id).to_string()),
        )),
        (&Method::POST, ["api", "personnel", personnel_id, "rank-history"]) => Some(event(
            "rank_history_create",
            "rank_history",
            Some((*personnel_id).to_string()),
        )),
        (&Method::POST, ["api", "personnel", personnel_id, "position-history"]) => Some(event(
            "position_history_create",
            "position_history",
            Some((*personnel_id).to_string()),
        )),
        (&Method::POST, ["api", "personnel", personnel_id, "education"]) => Some(event(
            "education_create",
            "education_record",
            Some((*personnel_id).to_string()),
        )),
        (&Method::POST, ["api", "personnel", personnel_id, "family"]) => Some(event(
            "family_create",
            "family_member",
            Some((*personnel_id).to_string()),
        )),
        (&Method::POST, ["api", "requests"]) => Some(event("request_submit", "request", None)),
        (&Method::PUT, ["api", "requests", request_id, "verify"]) => Some(event(
            "request_verify",
            "request",
            Some((*request_id).to_string()),
        )),
        _ => None,
    }
}

fn event(
    action: &'static str,
    entity_type: &'static str,
    entity_id: Option<String>,
) -> AuditEventDescriptor {
    AuditEventDescriptor {
        action,
        entity_type,
        entity_id,
    }
}

fn extract_request_id(headers: &HeaderMap) -> String {
    headers
        .get("x-request-id")
        .or_else(|| headers.get("x-correlation-id"))
        .and_then(|value| value.to_str().ok())
        .map(|value| value.to_string())
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}
