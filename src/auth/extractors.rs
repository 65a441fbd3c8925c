use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::extract::cookie::CookieJar;
use tracing::warn;

use crate::auth::token::SessionKeys;
use crate::error::ApiError;

pub const SESSION_COOKIE: &str = "auth_token";

/// Extracts and validates the session cookie, yielding the caller's user id.
///
/// Absent, malformed, expired and mis-signed tokens are all the same 401;
/// the caller learns nothing about which it was.
#[derive(Debug)]
pub struct SessionUser(pub i32);

#[async_trait]
impl<S> FromRequestParts<S> for SessionUser
where
    S: Send + Sync,
    SessionKeys: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar
            .get(SESSION_COOKIE)
            .map(|c| c.value().to_owned())
            .ok_or(ApiError::Unauthenticated)?;

        let keys = SessionKeys::from_ref(state);
        let claims = keys.verify(&token).map_err(|_| {
            warn!("invalid or expired session token");
            ApiError::Unauthenticated
        })?;

        Ok(SessionUser(claims.sub))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AppState;
    use axum::http::{header, Request};

    fn parts_with_cookie(cookie: Option<String>) -> Parts {
        let mut builder = Request::builder().uri("/auth/me");
        if let Some(c) = cookie {
            builder = builder.header(header::COOKIE, c);
        }
        let (parts, _) = builder.body(()).unwrap().into_parts();
        parts
    }

    #[tokio::test]
    async fn accepts_valid_session_cookie() {
        let state = AppState::fake();
        let keys = SessionKeys::from_ref(&state);
        let token = keys.sign(42).expect("sign");

        let mut parts = parts_with_cookie(Some(format!("{SESSION_COOKIE}={token}")));
        let SessionUser(user_id) = SessionUser::from_request_parts(&mut parts, &state)
            .await
            .expect("extract");
        assert_eq!(user_id, 42);
    }

    #[tokio::test]
    async fn rejects_missing_cookie() {
        let state = AppState::fake();
        let mut parts = parts_with_cookie(None);
        let err = SessionUser::from_request_parts(&mut parts, &state)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Unauthenticated));
    }

    #[tokio::test]
    async fn rejects_garbage_token() {
        let state = AppState::fake();
        let mut parts = parts_with_cookie(Some(format!("{SESSION_COOKIE}=garbage")));
        let err = SessionUser::from_request_parts(&mut parts, &state)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Unauthenticated));
    }

    #[tokio::test]
    async fn rejects_unrelated_cookie() {
        let state = AppState::fake();
        let mut parts = parts_with_cookie(Some("other_cookie=value".to_string()));
        let err = SessionUser::from_request_parts(&mut parts, &state)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Unauthenticated));
    }
}
