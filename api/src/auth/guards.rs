use crate::auth::claims::AuthUser;
use crate::response::ApiResponse;
use axum::{
    Json,
    body::Body,
    extract::FromRequestParts,
    http::{Request, StatusCode},
    middleware::Next,
    response::Response,
};

#[derive(serde::Serialize, Default)]
pub struct Empty;

type GuardResult = Result<Response, (StatusCode, Json<ApiResponse<Empty>>)>;

/// Helper to extract and validate the user, then insert it back into the request.
async fn extract_and_insert_authuser(
    req: Request<Body>,
) -> Result<(Request<Body>, AuthUser), (StatusCode, Json<ApiResponse<Empty>>)> {
    let (mut parts, body) = req.into_parts();
    let user = AuthUser::from_request_parts(&mut parts, &())
        .await
        .map_err(|_| {
            (
                StatusCode::UNAUTHORIZED,
                Json(ApiResponse::error("Authentication required")),
            )
        })?;

    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(user.clone());
    Ok((req, user))
}

/// Basic guard to ensure the request is authenticated.
pub async fn allow_authenticated(req: Request<Body>, next: Next) -> GuardResult {
    let (req, _user) = extract_and_insert_authuser(req).await?;
    Ok(next.run(req).await)
}

/// Admin-only guard.
pub async fn allow_admin(req: Request<Body>, next: Next) -> GuardResult {
    let (req, user) = extract_and_insert_authuser(req).await?;

    if !user.is_admin() {
        return Err((
            StatusCode::FORBIDDEN,
            Json(ApiResponse::error("Admin access required")),
        ));
    }

    Ok(next.run(req).await)
}

/// Admins and programme coordinators.
pub async fn allow_coordinator(req: Request<Body>, next: Next) -> GuardResult {
    let (req, user) = extract_and_insert_authuser(req).await?;

    if !user.is_coordinator() {
        return Err((
            StatusCode::FORBIDDEN,
            Json(ApiResponse::error("Coordinator access required")),
        ));
    }

    Ok(next.run(req).await)
}

/// Accounts linked to a faculty profile. Sessions are always opened by one.
pub async fn allow_faculty(req: Request<Body>, next: Next) -> GuardResult {
    let (req, user) = extract_and_insert_authuser(req).await?;

    if user.0.faculty_id.is_none() {
        return Err((
            StatusCode::FORBIDDEN,
            Json(ApiResponse::error("A faculty profile is required")),
        ));
    }

    Ok(next.run(req).await)
}
