//! API middleware

use axum::{
    body::Body,
    extract::State,
    http::{header, Request},
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use tracing::{info, warn};

use crate::AppState;
use crate::auth::{authorize, validate_token, Claims};
use crate::error::ApiError;

/// Authentication middleware
///
/// Validates the bearer token, checks the required scope, and stores the
/// claims and the caller's `UserName` in the request extensions
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header.and_then(|h| h.strip_prefix("Bearer ")) {
        Some(token) => token.trim(),
        None => {
            warn!("Missing or invalid Authorization header");
            return Err(ApiError::Unauthorized("missing bearer token".to_string()));
        }
    };

    let claims = validate_token(token, &state.config.jwt_secret).map_err(|e| {
        warn!("Token validation failed: {:?}", e);
        ApiError::from(e)
    })?;

    authorize(&claims, state.config.required_scope.as_deref()).map_err(|e| {
        warn!(user = %claims.display_name(), "Token lacks required scope");
        ApiError::from(e)
    })?;

    let user_name = claims.user_name()?;
    request.extensions_mut().insert(user_name);
    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}

/// Audit logging middleware
///
/// Logs every insurance request with the caller it was made for
pub async fn audit_middleware(
    request: Request<Body>,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let user = request
        .extensions()
        .get::<Claims>()
        .map(|c| c.display_name().to_string())
        .unwrap_or_else(|| "anonymous".to_string());

    let start = Utc::now();

    let response = next.run(request).await;

    let duration = Utc::now() - start;
    let status = response.status();

    info!(
        method = %method,
        uri = %uri,
        user = %user,
        status = %status.as_u16(),
        duration_ms = duration.num_milliseconds(),
        "API request"
    );

    response
}
