//! The unified personnel request ("pengajuan") and its verification
//! lifecycle. One tagged entity covers mutation, retirement, promotion,
//! and correction requests; `request_type` selects the payload shape.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow};
use utoipa::ToSchema;
use uuid::Uuid;

/// Personnel fields a correction request is allowed to target.
pub const CORRECTABLE_FIELDS: &[&str] = &[
    "name",
    "rank",
    "position",
    "unit",
    "position_since",
    "birth_date",
    "achievements",
    "general_education",
    "specialist_education",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "TEXT", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum RequestType {
    Mutation,
    Retirement,
    Promotion,
    Correction,
}

impl RequestType {
    pub fn db_value(&self) -> &'static str {
        match self {
            RequestType::Mutation => "mutation",
            RequestType::Retirement => "retirement",
            RequestType::Promotion => "promotion",
            RequestType::Correction => "correction",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema, Default)]
#[sqlx(type_name = "TEXT", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
/// Workflow status. `Pending` is the only non-terminal state; a request
/// leaves it exactly once.
pub enum RequestStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl RequestStatus {
    pub fn db_value(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Approved => "approved",
            RequestStatus::Rejected => "rejected",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, RequestStatus::Pending)
    }

    /// The only legal transitions are pending -> approved and
    /// pending -> rejected.
    pub fn can_transition_to(&self, next: RequestStatus) -> bool {
        matches!(self, RequestStatus::Pending) && next.is_terminal()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
/// The outcome a verifier selects for a pending request.
pub enum Decision {
    Approved,
    Rejected,
}

impl Decision {
    pub fn as_status(&self) -> RequestStatus {
        match self {
            Decision::Approved => RequestStatus::Approved,
            Decision::Rejected => RequestStatus::Rejected,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MutationPayload {
    pub origin_position: String,
    #[serde(default)]
    pub destination_position: Option<String>,
    #[serde(default)]
    pub origin_unit: Option<String>,
    #[serde(default)]
    pub destination_unit: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub effective_date: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RetirementPayload {
    pub origin_position: String,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub effective_date: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PromotionPayload {
    pub current_rank: String,
    pub target_rank: String,
    pub effective_date: String,
    #[serde(default)]
    pub decree_number: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CorrectionPayload {
    pub field_name: String,
    pub old_value: String,
    pub new_value: String,
    pub justification: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(tag = "request_type", rename_all = "snake_case")]
/// Type-specific request payload, immutable after submission.
pub enum RequestPayload {
    Mutation(MutationPayload),
    Retirement(RetirementPayload),
    Promotion(PromotionPayload),
    Correction(CorrectionPayload),
}

impl RequestPayload {
    pub fn request_type(&self) -> RequestType {
        match self {
            RequestPayload::Mutation(_) => RequestType::Mutation,
            RequestPayload::Retirement(_) => RequestType::Retirement,
            RequestPayload::Promotion(_) => RequestType::Promotion,
            RequestPayload::Correction(_) => RequestType::Correction,
        }
    }

    /// Checks the required-field set for this payload's type. Returns all
    /// problems at once so the caller can report them together.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();
        match self {
            RequestPayload::Mutation(p) => {
                require(&mut errors, "origin_position", &p.origin_position);
                let has_destination = is_present(p.destination_position.as_deref())
                    || is_present(p.destination_unit.as_deref());
                if !has_destination {
                    errors.push(
                        "destination_position or destination_unit is required".to_string(),
                    );
                }
            }
            RequestPayload::Retirement(p) => {
                require(&mut errors, "origin_position", &p.origin_position);
            }
            RequestPayload::Promotion(p) => {
                require(&mut errors, "current_rank", &p.current_rank);
                require(&mut errors, "target_rank", &p.target_rank);
                require(&mut errors, "effective_date", &p.effective_date);
            }
            RequestPayload::Correction(p) => {
                require(&mut errors, "field_name", &p.field_name);
                require(&mut errors, "new_value", &p.new_value);
                require(&mut errors, "justification", &p.justification);
                if is_present(Some(&p.field_name))
                    && !CORRECTABLE_FIELDS.contains(&p.field_name.as_str())
                {
                    errors.push(format!("field_name: {} is not correctable", p.field_name));
                }
            }
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

fn is_present(value: Option<&str>) -> bool {
    value.map(|v| !v.trim().is_empty()).unwrap_or(false)
}

fn require(errors: &mut Vec<String>, field: &str, value: &str) {
    if value.trim().is_empty() {
        errors.push(format!("{}: required", field));
    }
}

#[derive(Debug, thiserror::Error)]
/// Why a verification decision cannot be applied to a request.
pub enum VerificationError {
    #[error("request has already been decided ({status})")]
    AlreadyDecided { status: &'static str },
    #[error("a request cannot be verified by its submitter")]
    SelfVerification,
    #[error("verification of this request type requires the {required} role")]
    WrongRole { required: &'static str },
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Request {
    pub id: String,
    /// NRP of the personnel record this request concerns.
    pub personnel_nrp: String,
    pub request_type: RequestType,
    pub payload: Json<RequestPayload>,
    pub status: RequestStatus,
    pub submitted_by: String,
    pub verifier_note: Option<String>,
    pub verified_by: Option<String>,
    pub verified_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Request {
    pub fn new(personnel_nrp: String, payload: RequestPayload, submitted_by: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            personnel_nrp,
            request_type: payload.request_type(),
            payload: Json(payload),
            status: RequestStatus::Pending,
            submitted_by,
            verifier_note: None,
            verified_by: None,
            verified_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.status, RequestStatus::Pending)
    }

    /// Precondition check for a verification decision. The database write
    /// re-checks the pending status atomically; this gives the caller a
    /// precise error for the common stale-view case.
    pub fn ensure_decidable(&self, verifier_id: &str) -> Result<(), VerificationError> {
        if self.status.is_terminal() {
            return Err(VerificationError::AlreadyDecided {
                status: self.status.db_value(),
            });
        }
        if self.submitted_by == verifier_id {
            return Err(VerificationError::SelfVerification);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
/// Payload for submitting a new request. `submitted_by` comes from the
/// caller's session, never from the body.
pub struct CreateRequest {
    pub personnel_nrp: String,
    #[serde(flatten)]
    pub payload: RequestPayload,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
/// Payload for a verification decision.
pub struct VerifyPayload {
    pub decision: Decision,
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RequestResponse {
    pub id: String,
    pub personnel_nrp: String,
    pub request_type: RequestType,
    pub payload: RequestPayload,
    pub status: RequestStatus,
    pub submitted_by: String,
    pub verifier_note: Option<String>,
    pub verified_by: Option<String>,
    pub verified_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<Request> for RequestResponse {
    fn from(request: Request) -> Self {
        RequestResponse {
            id: request.id,
            personnel_nrp: request.personnel_nrp,
            request_type: request.request_type,
            payload: request.payload.0,
            status: request.status,
            submitted_by: request.submitted_by,
            verifier_note: request.verifier_note,
            verified_by: request.verified_by,
            verified_at: request.verified_at,
            created_at: request.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn correction_payload() -> RequestPayload {
        RequestPayload::Correction(CorrectionPayload {
            field_name: "name".to_string(),
            old_value: "A".to_string(),
            new_value: "B".to_string(),
            justification: "typo in the decree".to_string(),
        })
    }

    #[test]
    fn status_transitions_leave_pending_exactly_once() {
        assert!(RequestStatus::Pending.can_transition_to(RequestStatus::Approved));
        assert!(RequestStatus::Pending.can_transition_to(RequestStatus::Rejected));
        assert!(!RequestStatus::Pending.can_transition_to(RequestStatus::Pending));
        assert!(!RequestStatus::Approved.can_transition_to(RequestStatus::Rejected));
        assert!(!RequestStatus::Rejected.can_transition_to(RequestStatus::Approved));
        assert!(!RequestStatus::Approved.can_transition_to(RequestStatus::Pending));
    }

    #[test]
    fn ensure_decidable_rejects_terminal_states() {
        let mut request = Request::new("NRP-001".to_string(), correction_payload(), "staff-1".into());
        assert!(request.ensure_decidable("verifier-1").is_ok());

        request.status = RequestStatus::Approved;
        let err = request.ensure_decidable("verifier-1").unwrap_err();
        assert!(matches!(
            err,
            VerificationError::AlreadyDecided { status: "approved" }
        ));
    }

    #[test]
    fn ensure_decidable_forbids_self_verification() {
        let request = Request::new("NRP-001".to_string(), correction_payload(), "staff-1".into());
        let err = request.ensure_decidable("staff-1").unwrap_err();
        assert!(matches!(err, VerificationError::SelfVerification));
    }

    #[test]
    fn correction_requires_new_value() {
        let payload = RequestPayload::Correction(CorrectionPayload {
            field_name: "name".to_string(),
            old_value: "A".to_string(),
            new_value: "   ".to_string(),
            justification: "typo".to_string(),
        });
        let errors = payload.validate().unwrap_err();
        assert!(errors.iter().any(|e| e.starts_with("new_value")));
    }

    #[test]
    fn correction_rejects_unknown_field() {
        let payload = RequestPayload::Correction(CorrectionPayload {
            field_name: "password_hash".to_string(),
            old_value: "A".to_string(),
            new_value: "B".to_string(),
            justification: "nope".to_string(),
        });
        let errors = payload.validate().unwrap_err();
        assert!(errors.iter().any(|e| e.contains("not correctable")));
    }

    #[test]
    fn mutation_requires_some_destination() {
        let payload = RequestPayload::Mutation(MutationPayload {
            origin_position: "Danton".to_string(),
            destination_position: None,
            origin_unit: None,
            destination_unit: None,
            reason: None,
            effective_date: None,
        });
        let errors = payload.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("destination_position or destination_unit"));
    }

    #[test]
    fn promotion_requires_target_rank_and_effective_date() {
        let payload = RequestPayload::Promotion(PromotionPayload {
            current_rank: "KAPTEN".to_string(),
            target_rank: "".to_string(),
            effective_date: "".to_string(),
            decree_number: None,
        });
        let errors = payload.validate().unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn payload_serde_is_tagged_by_request_type() {
        let json = serde_json::json!({
            "request_type": "correction",
            "field_name": "name",
            "old_value": "A",
            "new_value": "B",
            "justification": "typo"
        });
        let payload: RequestPayload = serde_json::from_value(json).unwrap();
        assert_eq!(payload.request_type(), RequestType::Correction);

        let back = serde_json::to_value(&payload).unwrap();
        assert_eq!(back["request_type"], "correction");
        assert_eq!(back["new_value"], "B");
    }

    #[test]
    fn create_request_flattens_payload_tag() {
        let json = serde_json::json!({
            "personnel_nrp": "NRP-001",
            "request_type": "promotion",
            "current_rank": "KAPTEN",
            "target_rank": "MAYOR",
            "effective_date": "2025-04-01"
        });
        let create: CreateRequest = serde_json::from_value(json).unwrap();
        assert_eq!(create.personnel_nrp, "NRP-001");
        assert_eq!(create.payload.request_type(), RequestType::Promotion);
    }

    #[test]
    fn decision_serde_and_status_mapping() {
        let d: Decision = serde_json::from_str("\"approved\"").unwrap();
        assert_eq!(d.as_status(), RequestStatus::Approved);
        let d: Decision = serde_json::from_str("\"rejected\"").unwrap();
        assert_eq!(d.as_status(), RequestStatus::Rejected);
        assert!(serde_json::from_str::<Decision>("\"pending\"").is_err());
    }
}
