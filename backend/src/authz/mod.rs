//! Role-based authorization: a closed set of operations mapped to the
//! roles allowed to perform them. Checked at the routing boundary by the
//! auth middleware and re-checked inside the verification handler, which
//! also owns the per-request-type verifier rule.

use crate::error::AppError;
use crate::models::request::{Request, RequestType, VerificationError};
use crate::models::user::{User, UserRole};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    PersonnelRead,
    PersonnelWrite,
    RequestSubmit,
    RequestVerify,
    UserManage,
    AuditRead,
    ReportRead,
}

/// Fixed permission table. Every entry is explicit so a reviewer can read
/// the whole policy in one place.
pub fn role_allows(role: UserRole, operation: Operation) -> bool {
    use Operation::*;
    use UserRole::*;
    match operation {
        PersonnelRead => true,
        PersonnelWrite => matches!(role, Admin | Staff),
        RequestSubmit => matches!(role, Admin | Staff | Personnel),
        RequestVerify => matches!(role, Verifier),
        UserManage => matches!(role, Admin),
        AuditRead => matches!(role, Admin | Leader),
        ReportRead => matches!(role, Admin | Staff | Leader),
    }
}

/// The role required to verify a given request type. All four types are
/// decided by the verifier role today; the table keeps the per-type knob.
pub fn required_verifier_role(request_type: RequestType) -> UserRole {
    match request_type {
        RequestType::Mutation => UserRole::Verifier,
        RequestType::Retirement => UserRole::Verifier,
        RequestType::Promotion => UserRole::Verifier,
        RequestType::Correction => UserRole::Verifier,
    }
}

/// Full authorization check for a verification decision: the caller must
/// hold the verifier role configured for the request type and must not be
/// the submitter.
pub fn ensure_can_verify(user: &User, request: &Request) -> Result<(), AppError> {
    let required = required_verifier_role(request.request_type);
    if user.role != required {
        return Err(VerificationError::WrongRole {
            required: required.as_str(),
        }
        .into());
    }
    if request.submitted_by == user.id {
        return Err(VerificationError::SelfVerification.into());
    }
    Ok(())
}
