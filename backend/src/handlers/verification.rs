//! The verification decision: the single transition out of `pending`.
//!
//! The decision is written with a conditional UPDATE so a racing second
//! decision loses cleanly, and the downstream record update runs only
//! after the flip is durable. A propagation failure is reported as its own
//! error kind because at that point the request IS verified.

use axum::{
    extract::{Extension, Path, State},
    Json,
};
use chrono::Utc;

use crate::{
    authz,
    error::AppError,
    models::{
        request::{Decision, RequestResponse, VerifyPayload},
        user::User,
    },
    repositories::request as request_repo,
    services::record_update::RecordUpdateService,
    state::AppState,
    validation::rules,
};

pub async fn verify_request(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(request_id): Path<String>,
    Json(payload): Json<VerifyPayload>,
) -> Result<Json<RequestResponse>, AppError> {
    let note = payload.note.unwrap_or_default();
    if rules::validate_verifier_note(&note).is_err() {
        return Err(AppError::Validation(vec![format!(
            "note: must be at most {} characters",
            rules::MAX_VERIFIER_NOTE_LENGTH
        )]));
    }

    let request = request_repo::fetch_request(&state.pool, &request_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Request not found".into()))?;

    request.ensure_decidable(&user.id)?;
    authz::ensure_can_verify(&user, &request)?;

    let target_status = payload.decision.as_status();
    let now = Utc::now();
    let updated =
        request_repo::decide_request(&state.pool, &request_id, target_status, &note, &user.id, now)
            .await?;
    if updated == 0 {
        // Lost the race against another verifier between our read and write.
        return Err(AppError::InvalidState(
            "Request was decided concurrently; refresh and review the outcome".into(),
        ));
    }

    let verified = request_repo::fetch_request(&state.pool, &request_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Request not found".into()))?;

    if payload.decision == Decision::Approved {
        let record_update = RecordUpdateService::new(state.pool.clone());
        if let Err(err) = record_update.apply(&verified).await {
            return Err(AppError::Propagation {
                request_id: verified.id.clone(),
                decision: verified.status.db_value().to_string(),
                source: err,
            });
        }
    }

    Ok(Json(RequestResponse::from(verified)))
}
