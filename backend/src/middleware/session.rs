//! Session middleware
//!
//! Resolves the `X-Session-Id` header to a live session and hands it to
//! handlers through request extensions.

use axum::{
    extract::{Request, State},
    http::request::Parts,
    middleware::Next,
    response::{IntoResponse, Response},
};
use uuid::Uuid;

use crate::error::AppError;
use crate::sessions::SessionHandle;
use crate::AppState;

/// Header carrying the session id
pub const SESSION_HEADER: &str = "x-session-id";

/// Session resolved for the current request
#[derive(Clone)]
pub struct CurrentSession {
    pub id: Uuid,
    pub handle: SessionHandle,
}

/// Reject requests without a known session
pub async fn session_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let id = match session_id(request.headers()) {
        Some(id) => id,
        None => return AppError::SessionNotFound.into_response(),
    };

    let handle = match state.sessions.get(id).await {
        Some(handle) => handle,
        None => return AppError::SessionNotFound.into_response(),
    };

    request
        .extensions_mut()
        .insert(CurrentSession { id, handle });

    next.run(request).await
}

fn session_id(headers: &axum::http::HeaderMap) -> Option<Uuid> {
    headers
        .get(SESSION_HEADER)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| Uuid::parse_str(s.trim()).ok())
}

#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for CurrentSession
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentSession>()
            .cloned()
            .ok_or(AppError::SessionNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderMap, HeaderValue};

    #[test]
    fn test_session_id_parsing() {
        let mut headers = HeaderMap::new();
        assert_eq!(session_id(&headers), None);

        headers.insert(SESSION_HEADER, HeaderValue::from_static("not-a-uuid"));
        assert_eq!(session_id(&headers), None);

        let id = Uuid::new_v4();
        headers.insert(
            SESSION_HEADER,
            HeaderValue::from_str(&format!(" {} ", id)).unwrap(),
        );
        assert_eq!(session_id(&headers), Some(id));
    }
}
