use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::Response,
};

use crate::{
    authz::{role_allows, Operation},
    models::user::User,
    repositories::user as user_repo,
    state::AppState,
    utils::jwt::{verify_access_token, Claims},
};

pub async fn auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let (claims, user) = authenticate_request(&state, request.headers()).await?;
    request.extensions_mut().insert(claims);
    request.extensions_mut().insert(user.clone());

    let mut response = next.run(request).await;
    response.extensions_mut().insert(user);
    Ok(response)
}

// Auth + permission-table check for routes gated on a single operation.
async fn auth_with_operation(
    state: AppState,
    mut request: Request,
    next: Next,
    operation: Operation,
) -> Result<Response, StatusCode> {
    let (claims, user) = authenticate_request(&state, request.headers()).await?;
    if !role_allows(user.role, operation) {
        return Err(StatusCode::FORBIDDEN);
    }

    request.extensions_mut().insert(claims);
    request.extensions_mut().insert(user.clone());
    let mut response = next.run(request).await;
    response.extensions_mut().insert(user);
    Ok(response)
}

pub async fn auth_personnel_write(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    auth_with_operation(state, request, next, Operation::PersonnelWrite).await
}

pub async fn auth_verifier(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    auth_with_operation(state, request, next, Operation::RequestVerify).await
}

pub async fn auth_user_manage(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    auth_with_operation(state, request, next, Operation::UserManage).await
}

pub async fn auth_audit_read(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    auth_with_operation(state, request, next, Operation::AuditRead).await
}

pub async fn auth_report_read(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    auth_with_operation(state, request, next, Operation::ReportRead).await
}

fn parse_bearer_token(header: &str) -> Option<&str> {
    if let Some(rest) = header.strip_prefix("Bearer ") {
        return Some(rest);
    }
    if let Some(rest) = header.strip_prefix("bearer ") {
        return Some(rest);
    }
    if let Some(space_idx) = header.find(' ') {
        let (scheme, rest) = header.split_at(space_idx);
        if scheme.eq_ignore_ascii_case("bearer") {
            return Some(rest.trim_start());
        }
    }
    None
}

async fn authenticate_request(
    state: &AppState,
    headers: &axum::http::HeaderMap,
) -> Result<(Claims, User), StatusCode> {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(parse_bearer_token)
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let claims = verify_access_token(token, &state.config.jwt_secret)
        .map_err(|_| StatusCode::UNAUTHORIZED)?;

    let user = user_repo::find_user_by_id(&state.pool, &claims.sub)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
        .ok_or(StatusCode::UNAUTHORIZED)?;

    if !user.is_active {
        return Err(StatusCode::UNAUTHORIZED);
    }

    Ok((claims, user))
}
