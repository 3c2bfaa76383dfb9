//! Handlers for the `/admin` resource (user management).
//!
//! All handlers require a privileged role. Users are listed and managed per
//! resolved campus.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use campus_core::error::CoreError;
use campus_core::roles::validate_role;
use campus_core::types::DbId;
use campus_db::models::user::{CreateUser, UpdateUser, User, UserResponse};
use campus_db::repositories::UserRepo;
use serde::Deserialize;
use validator::Validate;

use crate::auth::password::{hash_password, validate_password_strength, MIN_PASSWORD_LENGTH};
use crate::error::{AppError, AppResult};
use crate::middleware::campus::CampusScope;
use crate::middleware::rbac::ensure_admin;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /admin/users`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 3, max = 100))]
    pub username: String,
    #[validate(email)]
    pub email: String,
    pub password: String,
    pub role: String,
    pub campus_id: Option<DbId>,
}

/// Request body for `PUT /admin/users/{id}`.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 3, max = 100))]
    pub username: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub role: Option<String>,
    pub campus_id: Option<DbId>,
    pub is_active: Option<bool>,
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "User", id })
}

/// Load a user and hide it unless it belongs to the scope's campus.
///
/// An unscoped privileged caller (no campus at all) may reach any user.
async fn find_scoped_user(state: &AppState, scope: &CampusScope, id: DbId) -> AppResult<User> {
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    match scope.campus_id() {
        Some(campus) if user.campus_id != Some(campus) => Err(not_found(id)),
        _ => Ok(user),
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/admin/users
///
/// Create a user bound to the resolved campus (if any).
pub async fn create_user(
    State(state): State<AppState>,
    scope: CampusScope,
    Json(input): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<UserResponse>>)> {
    ensure_admin(&scope.user)?;
    input.validate()?;
    validate_role(&input.role)?;
    validate_password_strength(&input.password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let scope = scope.with_body(input.campus_id);
    let hashed = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let create_dto = CreateUser {
        username: input.username,
        email: input.email,
        password_hash: hashed,
        role: input.role,
        campus_id: scope.campus_id(),
    };

    let user = UserRepo::create(&state.pool, &create_dto).await?;
    tracing::info!(
        user_id = user.id,
        role = %user.role,
        campus_id = ?user.campus_id,
        created_by = scope.user.user_id,
        "User created"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: user.into() })))
}

/// GET /api/v1/admin/users
pub async fn list_users(
    State(state): State<AppState>,
    scope: CampusScope,
) -> AppResult<Json<DataResponse<Vec<UserResponse>>>> {
    ensure_admin(&scope.user)?;
    let Some(campus_id) = scope.campus_id() else {
        return Ok(Json(DataResponse { data: Vec::new() }));
    };
    let users = UserRepo::list_by_campus(&state.pool, campus_id).await?;
    Ok(Json(DataResponse {
        data: users.into_iter().map(UserResponse::from).collect(),
    }))
}

/// GET /api/v1/admin/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    scope: CampusScope,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    ensure_admin(&scope.user)?;
    let user = find_scoped_user(&state, &scope, id).await?;
    Ok(Json(DataResponse { data: user.into() }))
}

/// PUT /api/v1/admin/users/{id}
///
/// Update profile fields (not the password).
pub async fn update_user(
    State(state): State<AppState>,
    scope: CampusScope,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateUserRequest>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    ensure_admin(&scope.user)?;
    input.validate()?;
    if let Some(role) = &input.role {
        validate_role(role)?;
    }
    find_scoped_user(&state, &scope, id).await?;

    let update_dto = UpdateUser {
        username: input.username,
        email: input.email,
        role: input.role,
        campus_id: input.campus_id,
        is_active: input.is_active,
    };
    let user = UserRepo::update(&state.pool, id, &update_dto)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: user.into() }))
}

/// DELETE /api/v1/admin/users/{id}
///
/// Soft-deactivate the user. Returns 204.
pub async fn deactivate_user(
    State(state): State<AppState>,
    scope: CampusScope,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    ensure_admin(&scope.user)?;
    if id == scope.user.user_id {
        return Err(AppError::BadRequest(
            "You cannot deactivate your own account".into(),
        ));
    }
    find_scoped_user(&state, &scope, id).await?;
    UserRepo::deactivate(&state.pool, id).await?;
    tracing::info!(user_id = id, by = scope.user.user_id, "User deactivated");
    Ok(StatusCode::NO_CONTENT)
}
