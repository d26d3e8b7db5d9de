//! Role gates layered on [`AuthUser`].
//!
//! Back-office endpoints take [`RequireStaff`]; destructive ones take
//! [`RequireAdmin`]. A missing or bad token is still a 401; a valid token
//! with too small a role is a 403.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use cityvetcare_core::error::CoreError;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

async fn gated(
    parts: &mut Parts,
    state: &AppState,
    allowed: fn(&AuthUser) -> bool,
    denied: &'static str,
) -> Result<AuthUser, AppError> {
    let user = AuthUser::from_request_parts(parts, state).await?;
    if allowed(&user) {
        Ok(user)
    } else {
        tracing::debug!(user_id = user.user_id, role = %user.role, "Role gate denied request");
        Err(AppError::Core(CoreError::Forbidden(denied.into())))
    }
}

/// Admin only.
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        gated(parts, state, AuthUser::is_admin, "Admin role required")
            .await
            .map(RequireAdmin)
    }
}

/// Admin or staff.
pub struct RequireStaff(pub AuthUser);

impl FromRequestParts<AppState> for RequireStaff {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        gated(parts, state, AuthUser::is_staff, "Staff or admin role required")
            .await
            .map(RequireStaff)
    }
}
