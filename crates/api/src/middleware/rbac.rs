//! Role-based access control (RBAC) extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects requests whose role does not
//! meet the minimum requirement.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use campus_core::error::CoreError;
use campus_core::roles::{is_inventory_manager, is_privileged, is_staff};

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires `admin`, `owner`, or `superadmin`. Rejects with 403 otherwise.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(user): RequireAdmin) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        ensure_admin(&user)?;
        Ok(RequireAdmin(user))
    }
}

/// Requires any authenticated user (any valid role).
///
/// Functionally equivalent to [`AuthUser`] but named explicitly for route
/// definitions where "this route requires authentication" should read clearly.
pub struct RequireAuth(pub AuthUser);

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        Ok(RequireAuth(user))
    }
}

/// Reject non-privileged callers. For handlers that already hold a
/// [`CampusScope`](super::campus::CampusScope).
pub fn ensure_admin(user: &AuthUser) -> Result<(), AppError> {
    if !is_privileged(&user.role) {
        return Err(AppError::Core(CoreError::Forbidden(
            "Admin role required".into(),
        )));
    }
    Ok(())
}

/// Reject callers that are neither privileged nor teachers.
pub fn ensure_staff(user: &AuthUser) -> Result<(), AppError> {
    if !is_staff(&user.role) {
        return Err(AppError::Core(CoreError::Forbidden(
            "Teacher or Admin role required".into(),
        )));
    }
    Ok(())
}

/// Reject callers that may not write inventory data.
pub fn ensure_inventory_manager(user: &AuthUser) -> Result<(), AppError> {
    if !is_inventory_manager(&user.role) {
        return Err(AppError::Core(CoreError::Forbidden(
            "Staff or Admin role required".into(),
        )));
    }
    Ok(())
}
