#![allow(dead_code)] // OpenAPI doc stubs are only referenced by utoipa macros.

use crate::{
    handlers::{
        audit_logs::AuditLogListQuery,
        dashboard::DashboardStats,
        personnel::PersonnelListQuery,
        reports::{PersonnelReportQuery, RequestsReportQuery},
        requests::RequestListQuery,
    },
    models::{
        audit_log::AuditLogResponse,
        education::{CreateEducationRecord, EducationKind, EducationRecord},
        family::{CreateFamilyMember, FamilyMember},
        personnel::{CreatePersonnel, PersonnelResponse, PersonnelStatus, UpdatePersonnel},
        position_history::{CreatePositionHistory, PositionHistory},
        rank_history::{CreateRankHistory, RankHistory},
        request::{
            CorrectionPayload, CreateRequest, Decision, MutationPayload, PromotionPayload,
            RequestPayload, RequestResponse, RequestStatus, RequestType, RetirementPayload,
            VerifyPayload,
        },
        user::{
            ChangePasswordRequest, CreateUser, LoginRequest, LoginResponse, ResetPasswordRequest,
            UpdateUser, UserResponse,
        },
    },
};
use utoipa::{
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
    Modify, OpenApi,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        login_doc,
        me_doc,
        change_password_doc,
        logout_doc,
        init_setup_doc,
        list_users_doc,
        create_user_doc,
        update_user_doc,
        reset_password_doc,
        deactivate_user_doc,
        list_personnel_doc,
        get_personnel_doc,
        create_personnel_doc,
        update_personnel_doc,
        list_rank_history_doc,
        create_rank_history_doc,
        list_position_history_doc,
        create_position_history_doc,
        submit_request_doc,
        list_requests_doc,
        get_request_doc,
        verify_request_doc,
        list_audit_logs_doc,
        dashboard_stats_doc,
        list_ranks_doc,
        list_units_doc,
        personnel_report_doc,
        requests_report_doc
    ),
    components(
        schemas(
            // auth & users
            LoginRequest,
            LoginResponse,
            ChangePasswordRequest,
            ResetPasswordRequest,
            CreateUser,
            UpdateUser,
            UserResponse,
            // personnel
            CreatePersonnel,
            UpdatePersonnel,
            PersonnelResponse,
            PersonnelStatus,
            PersonnelListQuery,
            // service records
            CreateRankHistory,
            RankHistory,
            CreatePositionHistory,
            PositionHistory,
            CreateEducationRecord,
            EducationRecord,
            EducationKind,
            CreateFamilyMember,
            FamilyMember,
            // requests
            CreateRequest,
            RequestPayload,
            MutationPayload,
            RetirementPayload,
            PromotionPayload,
            CorrectionPayload,
            RequestResponse,
            RequestStatus,
            RequestType,
            Decision,
            VerifyPayload,
            RequestListQuery,
            // audit & reporting
            AuditLogResponse,
            AuditLogListQuery,
            DashboardStats,
            PersonnelReportQuery,
            RequestsReportQuery
        )
    ),
    modifiers(&SecuritySchemes),
    tags(
        (name = "Auth", description = "Authentication and account self-service"),
        (name = "Users", description = "Administrative account management"),
        (name = "Personnel", description = "Personnel master records and service history"),
        (name = "Requests", description = "Request submission and verification workflow"),
        (name = "Reports", description = "Dashboards, audit trail, and exports")
    ),
    security(("BearerAuth" = []))
)]
pub struct ApiDoc;

struct SecuritySchemes;

impl Modify for SecuritySchemes {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_default();

        let mut bearer = Http::new(HttpAuthScheme::Bearer);
        bearer.bearer_format = Some("JWT".to_string());

        components.add_security_scheme("BearerAuth", SecurityScheme::Http(bearer));
    }
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login succeeded", body = LoginResponse),
        (status = 401, description = "Invalid credentials or inactive account")
    ),
    tag = "Auth",
    security(())
)]
fn login_doc() {}

#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses((status = 200, description = "The authenticated user", body = UserResponse)),
    tag = "Auth"
)]
fn me_doc() {}

#[utoipa::path(
    put,
    path = "/api/auth/change-password",
    request_body = ChangePasswordRequest,
    responses(
        (status = 200, description = "Password updated"),
        (status = 400, description = "Current password incorrect or new password invalid")
    ),
    tag = "Auth"
)]
fn change_password_doc() {}

#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses((status = 200, description = "Logged out")),
    tag = "Auth"
)]
fn logout_doc() {}

#[utoipa::path(
    post,
    path = "/api/init/setup",
    responses((status = 200, description = "Default accounts created (idempotent)")),
    tag = "Auth",
    security(())
)]
fn init_setup_doc() {}

#[utoipa::path(
    get,
    path = "/api/users",
    responses((status = 200, body = [UserResponse])),
    tag = "Users"
)]
fn list_users_doc() {}

#[utoipa::path(
    post,
    path = "/api/users",
    request_body = CreateUser,
    responses(
        (status = 200, body = UserResponse),
        (status = 409, description = "Username already taken")
    ),
    tag = "Users"
)]
fn create_user_doc() {}

#[utoipa::path(
    put,
    path = "/api/users/{user_id}",
    request_body = UpdateUser,
    params(("user_id" = String, Path, description = "User id")),
    responses((status = 200, body = UserResponse), (status = 404, description = "Unknown user")),
    tag = "Users"
)]
fn update_user_doc() {}

#[utoipa::path(
    post,
    path = "/api/users/{user_id}/reset-password",
    request_body = ResetPasswordRequest,
    params(("user_id" = String, Path, description = "User id")),
    responses((status = 200, description = "Password reset")),
    tag = "Users"
)]
fn reset_password_doc() {}

#[utoipa::path(
    delete,
    path = "/api/users/{user_id}",
    params(("user_id" = String, Path, description = "User id")),
    responses((status = 200, description = "User deactivated")),
    tag = "Users"
)]
fn deactivate_user_doc() {}

#[utoipa::path(
    get,
    path = "/api/personnel",
    params(PersonnelListQuery),
    responses((status = 200, description = "Paginated personnel list")),
    tag = "Personnel"
)]
fn list_personnel_doc() {}

#[utoipa::path(
    get,
    path = "/api/personnel/{personnel_id}",
    params(("personnel_id" = String, Path, description = "Personnel id")),
    responses(
        (status = 200, body = PersonnelResponse),
        (status = 403, description = "Personnel accounts may only read their own record"),
        (status = 404, description = "Unknown personnel id")
    ),
    tag = "Personnel"
)]
fn get_personnel_doc() {}

#[utoipa::path(
    post,
    path = "/api/personnel",
    request_body = CreatePersonnel,
    responses(
        (status = 200, body = PersonnelResponse),
        (status = 409, description = "NRP already registered")
    ),
    tag = "Personnel"
)]
fn create_personnel_doc() {}

#[utoipa::path(
    put,
    path = "/api/personnel/{personnel_id}",
    request_body = UpdatePersonnel,
    params(("personnel_id" = String, Path, description = "Personnel id")),
    responses((status = 200, body = PersonnelResponse)),
    tag = "Personnel"
)]
fn update_personnel_doc() {}

#[utoipa::path(
    get,
    path = "/api/personnel/{personnel_id}/rank-history",
    params(("personnel_id" = String, Path, description = "Personnel id")),
    responses((status = 200, body = [RankHistory])),
    tag = "Personnel"
)]
fn list_rank_history_doc() {}

#[utoipa::path(
    post,
    path = "/api/personnel/{personnel_id}/rank-history",
    request_body = CreateRankHistory,
    params(("personnel_id" = String, Path, description = "Personnel id")),
    responses((status = 200, body = RankHistory)),
    tag = "Personnel"
)]
fn create_rank_history_doc() {}

#[utoipa::path(
    get,
    path = "/api/personnel/{personnel_id}/position-history",
    params(("personnel_id" = String, Path, description = "Personnel id")),
    responses((status = 200, body = [PositionHistory])),
    tag = "Personnel"
)]
fn list_position_history_doc() {}

#[utoipa::path(
    post,
    path = "/api/personnel/{personnel_id}/position-history",
    request_body = CreatePositionHistory,
    params(("personnel_id" = String, Path, description = "Personnel id")),
    responses((status = 200, body = PositionHistory)),
    tag = "Personnel"
)]
fn create_position_history_doc() {}

#[utoipa::path(
    post,
    path = "/api/requests",
    request_body = CreateRequest,
    responses(
        (status = 200, description = "Request accepted in pending state", body = RequestResponse),
        (status = 400, description = "Payload is missing required fields or the NRP is unknown"),
        (status = 403, description = "Caller's role may not submit this request")
    ),
    tag = "Requests"
)]
fn submit_request_doc() {}

#[utoipa::path(
    get,
    path = "/api/requests",
    params(RequestListQuery),
    responses((status = 200, description = "Requests, newest first")),
    tag = "Requests"
)]
fn list_requests_doc() {}

#[utoipa::path(
    get,
    path = "/api/requests/{request_id}",
    params(("request_id" = String, Path, description = "Request id")),
    responses((status = 200, body = RequestResponse), (status = 404, description = "Unknown id")),
    tag = "Requests"
)]
fn get_request_doc() {}

#[utoipa::path(
    put,
    path = "/api/requests/{request_id}/verify",
    request_body = VerifyPayload,
    params(("request_id" = String, Path, description = "Request id")),
    responses(
        (status = 200, description = "Decision applied", body = RequestResponse),
        (status = 404, description = "Unknown id"),
        (status = 409, description = "Request already decided (stale view)"),
        (status = 403, description = "Caller lacks the verifier role or submitted the request"),
        (status = 500, description = "PROPAGATION_FAILED: decision persisted, record update needs attention")
    ),
    tag = "Requests"
)]
fn verify_request_doc() {}

#[utoipa::path(
    get,
    path = "/api/audit-logs",
    params(AuditLogListQuery),
    responses((status = 200, body = [AuditLogResponse])),
    tag = "Reports"
)]
fn list_audit_logs_doc() {}

#[utoipa::path(
    get,
    path = "/api/dashboard/stats",
    responses((status = 200, body = DashboardStats)),
    tag = "Reports"
)]
fn dashboard_stats_doc() {}

#[utoipa::path(
    get,
    path = "/api/reference/ranks",
    responses((status = 200, description = "Rank ladder in promotion order")),
    tag = "Personnel",
    security(())
)]
fn list_ranks_doc() {}

#[utoipa::path(
    get,
    path = "/api/reference/units",
    responses((status = 200, description = "Distinct units present in the personnel store")),
    tag = "Personnel"
)]
fn list_units_doc() {}

#[utoipa::path(
    get,
    path = "/api/reports/personnel",
    params(PersonnelReportQuery),
    responses((status = 200, description = "Personnel report as JSON or CSV")),
    tag = "Reports"
)]
fn personnel_report_doc() {}

#[utoipa::path(
    get,
    path = "/api/reports/requests",
    params(RequestsReportQuery),
    responses((status = 200, description = "Requests enriched with subject identity")),
    tag = "Reports"
)]
fn requests_report_doc() {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_document_builds() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/requests/{request_id}/verify"));
        assert!(doc.paths.paths.contains_key("/api/auth/login"));
    }
}
