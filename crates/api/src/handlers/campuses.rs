//! Handlers for the `/campuses` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use campus_core::error::CoreError;
use campus_core::roles::is_privileged;
use campus_core::types::DbId;
use campus_db::models::campus::{Campus, CreateCampus, UpdateCampus};
use campus_db::repositories::CampusRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireAuth};
use crate::query::IncludeInactiveParams;
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Campus",
        id,
    })
}

/// GET /api/v1/campuses
///
/// Privileged roles see every campus; everyone else sees only their own.
pub async fn list_campuses(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Query(params): Query<IncludeInactiveParams>,
) -> AppResult<Json<DataResponse<Vec<Campus>>>> {
    let campuses = if is_privileged(&user.role) {
        CampusRepo::list(&state.pool, params.include_inactive).await?
    } else {
        match user.campus_id {
            Some(id) => CampusRepo::find_by_id(&state.pool, id)
                .await?
                .into_iter()
                .collect(),
            None => Vec::new(),
        }
    };
    Ok(Json(DataResponse { data: campuses }))
}

/// POST /api/v1/campuses
pub async fn create_campus(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(input): Json<CreateCampus>,
) -> AppResult<(StatusCode, Json<DataResponse<Campus>>)> {
    input.validate()?;
    let campus = CampusRepo::create(&state.pool, &input).await?;
    tracing::info!(campus_id = campus.id, code = %campus.code, user_id = admin.user_id, "Campus created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: campus })))
}

/// GET /api/v1/campuses/{id}
pub async fn get_campus(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Campus>>> {
    if !is_privileged(&user.role) && user.campus_id != Some(id) {
        return Err(not_found(id));
    }
    let campus = CampusRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: campus }))
}

/// PUT /api/v1/campuses/{id}
pub async fn update_campus(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCampus>,
) -> AppResult<Json<DataResponse<Campus>>> {
    input.validate()?;
    let campus = CampusRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: campus }))
}

/// DELETE /api/v1/campuses/{id}
///
/// Soft-deactivates the campus. Returns 204.
pub async fn deactivate_campus(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !CampusRepo::deactivate(&state.pool, id).await? {
        return Err(not_found(id));
    }
    tracing::info!(campus_id = id, user_id = admin.user_id, "Campus deactivated");
    Ok(StatusCode::NO_CONTENT)
}
