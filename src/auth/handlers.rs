use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use lazy_static::lazy_static;
use regex::Regex;
use time::Duration as CookieDuration;
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{
            LoginRequest, LoginResponse, LoginUser, MeResponse, MessageResponse, PublicUser,
            RegisterRequest, RegisterResponse,
        },
        extractors::{SessionUser, SESSION_COOKIE},
        password::{hash_password, verify_password},
        repo::User,
        token::SessionKeys,
    },
    config::SessionConfig,
    error::ApiError,
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
        .route("/auth/me", get(me))
}

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

fn session_cookie(token: String, config: &SessionConfig) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .http_only(true)
        .secure(config.cookie_secure)
        .path("/")
        .max_age(CookieDuration::minutes(config.ttl_minutes))
        .build()
}

fn removal_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .max_age(CookieDuration::ZERO)
        .build()
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(mut payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    payload.email = payload.email.trim().to_lowercase();
    payload.username = payload.username.trim().to_string();

    if payload.email.is_empty() || payload.username.is_empty() || payload.password.is_empty() {
        warn!("registration with missing fields");
        return Err(ApiError::Validation("All fields are required".into()));
    }

    if !is_valid_email(&payload.email) {
        warn!(email = %payload.email, "invalid email format");
        return Err(ApiError::Validation("Invalid email format".into()));
    }

    // Pre-check keeps the common case a clean 409; the unique constraint
    // below still catches the race.
    if User::find_by_email(&state.db, &payload.email).await?.is_some() {
        warn!(email = %payload.email, "email already registered");
        return Err(ApiError::Conflict("Email already registered".into()));
    }

    let hash = hash_password(&payload.password)?;

    let user = match User::create(&state.db, &payload.email, &payload.username, &hash).await {
        Ok(u) => u,
        Err(e) => {
            let unique_violation = e
                .downcast_ref::<sqlx::Error>()
                .and_then(|e| e.as_database_error())
                .map(|d| d.is_unique_violation())
                .unwrap_or(false);
            if unique_violation {
                warn!(email = %payload.email, "email already registered");
                return Err(ApiError::Conflict("Email already registered".into()));
            }
            return Err(e.into());
        }
    };

    info!(user_id = user.id, email = %user.email, "user registered");
    // No auto-login: the client must call /auth/login to get a session.
    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "Registration successful".into(),
            user: PublicUser {
                id: user.id,
                email: user.email,
                username: user.username,
            },
        }),
    ))
}

#[instrument(skip(state, jar, payload))]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<LoginRequest>,
) -> Result<(CookieJar, Json<LoginResponse>), ApiError> {
    let identifier = payload.username.trim();

    if identifier.is_empty() || payload.password.is_empty() {
        warn!("login with missing fields");
        return Err(ApiError::Validation(
            "Username and password are required".into(),
        ));
    }

    // Same 401 for unknown identifier and wrong password.
    let user = match User::find_by_identifier(&state.db, identifier).await? {
        Some(u) => u,
        None => {
            warn!("login with unknown identifier");
            return Err(ApiError::InvalidCredentials);
        }
    };

    if !verify_password(&payload.password, &user.password_hash)? {
        warn!(user_id = user.id, "login with invalid password");
        return Err(ApiError::InvalidCredentials);
    }

    let keys = SessionKeys::from_ref(&state);
    let token = keys.sign(user.id)?;
    let jar = jar.add(session_cookie(token, &state.config.session));

    info!(user_id = user.id, "user logged in");
    Ok((
        jar,
        Json(LoginResponse {
            message: "Login successful".into(),
            user: LoginUser {
                id: user.id,
                email: user.email,
            },
        }),
    ))
}

/// Always succeeds, with or without an existing session.
#[instrument(skip(jar))]
pub async fn logout(jar: CookieJar) -> (CookieJar, Json<MessageResponse>) {
    let jar = jar.remove(removal_cookie());
    (
        jar,
        Json(MessageResponse {
            message: "Logged out successfully".into(),
        }),
    )
}

#[instrument(skip(state))]
pub async fn me(
    State(state): State<AppState>,
    SessionUser(user_id): SessionUser,
) -> Result<Json<MeResponse>, ApiError> {
    // A valid token for a vanished user reads the same as a bad token.
    let user = User::find_by_id(&state.db, user_id)
        .await?
        .ok_or(ApiError::Unauthenticated)?;

    Ok(Json(MeResponse {
        user: PublicUser {
            id: user.id,
            email: user.email,
            username: user.username,
        },
    }))
}
