//! `/auth` routes — registration, login and session management.

use axum::{
    extract::{Extension, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tower_cookies::{
    cookie::{time::Duration as CookieDuration, SameSite},
    Cookie, Cookies,
};
use uuid::Uuid;

use crate::{
    auth::{generate_token, hash_password, validate_password_strength, verify_password},
    db::Db,
    errors::{AppError, AppResult},
    middleware::auth_guard::AuthUser,
    state::AppState,
};

// ── Session cookie constants ──────────────────────────────────

const SESSION_COOKIE: &str = "session";
const SESSION_DAYS:   i64  = 30;

// ── Request / response types ──────────────────────────────────

#[derive(Deserialize)]
struct RegisterRequest {
    email:    String,
    password: String,
}

#[derive(Deserialize)]
struct LoginRequest {
    email:    String,
    password: String,
}

#[derive(Serialize)]
struct UserResponse {
    id:    String,
    email: String,
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id:            String,
    email:         String,
    password_hash: String,
}

// ── Router ────────────────────────────────────────────────────

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login",    post(login))
        .route("/auth/logout",   post(logout))
}

/// Routes that themselves sit behind the auth guard.
pub fn guarded_router() -> Router<AppState> {
    Router::new().route("/auth/me", get(me))
}

// ── Handlers ──────────────────────────────────────────────────

/// POST /auth/register — create a new account.
async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> AppResult<impl IntoResponse> {
    let pool   = &state.pool;
    let config = &state.config;

    validate_email(&body.email)?;

    // DEV: password strength is disabled in development for easy testing.
    if !config.is_development() {
        validate_password_strength(&body.password)?;
    }

    let email_taken: bool =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE email = ?)")
            .bind(&body.email)
            .fetch_one(pool)
            .await?;
    if email_taken {
        return Err(AppError::Conflict("Email address is already registered".into()));
    }

    let hash = hash_password(&body.password)?;
    let id   = Uuid::new_v4().to_string();

    let insert_result = sqlx::query(
        "INSERT INTO users (id, email, password_hash) VALUES (?, ?, ?)",
    )
    .bind(&id)
    .bind(&body.email)
    .bind(hash)
    .execute(pool)
    .await;

    // Guard against duplicate key (race condition / double-submit)
    if let Err(sqlx::Error::Database(ref db_err)) = insert_result {
        if db_err.code().as_deref() == Some("23000") {
            return Err(AppError::Conflict("Email address is already registered".into()));
        }
    }
    insert_result?;

    Ok((
        StatusCode::CREATED,
        Json(UserResponse { id, email: body.email }),
    ))
}

/// POST /auth/login — email+password login.
async fn login(
    State(state): State<AppState>,
    cookies: Cookies,
    Json(body): Json<LoginRequest>,
) -> AppResult<impl IntoResponse> {
    let pool = &state.pool;

    let row = sqlx::query_as::<_, UserRow>(
        "SELECT id, email, password_hash FROM users WHERE email = ? LIMIT 1",
    )
    .bind(&body.email)
    .fetch_optional(pool)
    .await?
    .ok_or(AppError::Unauthorized)?;

    verify_password(&body.password, &row.password_hash)?;

    let session_token = create_session(pool, &row.id, SESSION_DAYS).await?;
    set_session_cookie(&cookies, &session_token, SESSION_DAYS);

    Ok(Json(UserResponse {
        id:    row.id,
        email: row.email,
    }))
}

/// POST /auth/logout — delete the current session.
async fn logout(
    State(state): State<AppState>,
    cookies: Cookies,
) -> AppResult<impl IntoResponse> {
    let pool = &state.pool;
    if let Some(token) = cookies.get(SESSION_COOKIE).map(|c| c.value().to_owned()) {
        sqlx::query("DELETE FROM user_sessions WHERE token = ?")
            .bind(&token)
            .execute(pool)
            .await?;
    }
    clear_session_cookie(&cookies);
    Ok(StatusCode::NO_CONTENT)
}

/// GET /auth/me — return the currently logged-in user.
async fn me(Extension(user): Extension<AuthUser>) -> AppResult<impl IntoResponse> {
    Ok(Json(UserResponse {
        id:    user.user_id,
        email: user.email,
    }))
}

// ── Internal helpers ──────────────────────────────────────────

async fn create_session(pool: &Db, user_id: &str, days: i64) -> AppResult<String> {
    let token = generate_token();
    let id    = Uuid::new_v4().to_string();
    let expires_at = (Utc::now() + chrono::Duration::days(days)).naive_utc();

    sqlx::query(
        "INSERT INTO user_sessions (id, user_id, token, expires_at) VALUES (?, ?, ?, ?)",
    )
    .bind(id)
    .bind(user_id)
    .bind(&token)
    .bind(expires_at)
    .execute(pool)
    .await?;

    Ok(token)
}

fn set_session_cookie(cookies: &Cookies, token: &str, days: i64) {
    let cookie = Cookie::build((SESSION_COOKIE, token.to_owned()))
        .http_only(true)
        .same_site(SameSite::Strict)
        .path("/")
        .max_age(CookieDuration::days(days))
        .build();
    cookies.add(cookie);
}

fn clear_session_cookie(cookies: &Cookies) {
    let cookie = Cookie::build((SESSION_COOKIE, ""))
        .http_only(true)
        .path("/")
        .max_age(CookieDuration::ZERO)
        .build();
    cookies.add(cookie);
}

fn validate_email(email: &str) -> AppResult<()> {
    if !email.contains('@') || email.len() < 5 {
        return Err(AppError::BadRequest("Invalid email address".into()));
    }
    Ok(())
}
