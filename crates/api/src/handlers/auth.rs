//! Handlers for the `/auth` resource (register, login, me).

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use cityvetcare_core::error::CoreError;
use cityvetcare_core::roles::ROLE_CITIZEN;
use cityvetcare_core::types::DbId;
use cityvetcare_core::validation::{optional_short_text, require_short_text};
use cityvetcare_db::models::user::{CreateUser, User};
use cityvetcare_db::repositories::UserRepo;
use serde::{Deserialize, Serialize};

use crate::auth::jwt::generate_access_token;
use crate::auth::password::{hash_password, validate_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /auth/register`.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub full_name: Option<String>,
    pub contact_number: Option<String>,
}

/// Request body for `POST /auth/login`. `username` also accepts an email.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Successful authentication response returned by register and login.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: &'static str,
    /// Seconds.
    pub expires_in: i64,
    pub user: UserInfo,
}

#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub full_name: Option<String>,
    pub role: String,
}

impl From<&User> for UserInfo {
    fn from(user: &User) -> Self {
        UserInfo {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            full_name: user.full_name.clone(),
            role: user.role.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

impl RegisterRequest {
    fn check(&self) -> Result<(), CoreError> {
        require_short_text("username", &self.username)?;
        require_short_text("email", &self.email)?;
        if !self.email.contains('@') {
            return Err(CoreError::Validation("email must be a valid address".into()));
        }
        optional_short_text("full_name", self.full_name.as_deref())?;
        optional_short_text("contact_number", self.contact_number.as_deref())?;
        validate_password(&self.password)
    }
}

/// POST /api/auth/register
///
/// Self-registration always creates a `citizen` account.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<impl IntoResponse> {
    input.check()?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("hash failed: {e}")))?;

    let new_user = CreateUser {
        username: input.username.trim().to_string(),
        email: input.email.trim().to_lowercase(),
        password_hash,
        full_name: input.full_name,
        contact_number: input.contact_number,
        role: ROLE_CITIZEN.to_string(),
    };
    let user = UserRepo::create(&state.pool, &new_user).await?;

    tracing::info!(user_id = user.id, "Citizen account registered");

    Ok((StatusCode::CREATED, Json(issue_session(&state, &user)?)))
}

/// POST /api/auth/login
///
/// `username` may also be the account email. Unknown accounts and wrong
/// passwords get the same 401.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let rejected = || CoreError::Unauthorized("Invalid username or password".into());

    let Some(user) = UserRepo::find_by_login(&state.pool, input.username.trim()).await? else {
        return Err(rejected().into());
    };
    if !user.is_active {
        return Err(CoreError::Forbidden("Account is deactivated".into()).into());
    }

    let matches = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("stored hash unreadable: {e}")))?;
    if !matches {
        tracing::debug!(user_id = user.id, "Password mismatch");
        return Err(rejected().into());
    }

    tracing::info!(user_id = user.id, role = %user.role, "User logged in");
    Ok(Json(issue_session(&state, &user)?))
}

/// GET /api/auth/me
pub async fn me(auth: AuthUser, State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| CoreError::not_found("User", auth.user_id))?;
    Ok(Json(DataResponse { data: user }))
}

fn issue_session(state: &AppState, user: &User) -> AppResult<AuthResponse> {
    let jwt = &state.config.jwt;
    let access_token = generate_access_token(user.id, &user.role, jwt)
        .map_err(|e| AppError::InternalError(format!("token signing failed: {e}")))?;
    Ok(AuthResponse {
        access_token,
        token_type: "Bearer",
        expires_in: jwt.access_token_expiry_mins * 60,
        user: UserInfo::from(user),
    })
}
