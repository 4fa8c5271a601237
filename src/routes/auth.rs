use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use crate::{error::AppError, AppState};

pub const SERVICE_KEY_HEADER: &str = "X-Service-Key";

/// Rejects requests whose `X-Service-Key` does not match the configured
/// secret. With no secret configured every request is rejected.
pub async fn require_service_key(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let provided = request
        .headers()
        .get(SERVICE_KEY_HEADER)
        .and_then(|value| value.to_str().ok());

    let authorized = matches!(
        (state.config.service_key.as_deref(), provided),
        (Some(expected), Some(provided)) if expected == provided
    );

    if !authorized {
        tracing::warn!(
            "Unauthorized {} request: missing/invalid {}",
            request.uri().path(),
            SERVICE_KEY_HEADER
        );
        return Err(AppError::Unauthorized);
    }

    Ok(next.run(request).await)
}
