//! Handlers for the `/teachers` resource.
//!
//! Reads are open to any authenticated user of the campus; writes require a
//! privileged role.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use campus_core::error::CoreError;
use campus_core::types::DbId;
use campus_db::models::teacher::{CreateTeacher, Teacher, UpdateTeacher};
use campus_db::repositories::TeacherRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::campus::CampusScope;
use crate::middleware::rbac::ensure_admin;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Teacher",
        id,
    })
}

/// GET /api/v1/teachers
pub async fn list_teachers(
    State(state): State<AppState>,
    scope: CampusScope,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<Teacher>>>> {
    let Some(campus_id) = scope.campus_id() else {
        return Ok(Json(DataResponse { data: Vec::new() }));
    };
    let (limit, offset) = params.resolve();
    let teachers = TeacherRepo::list_by_campus(&state.pool, campus_id, limit, offset).await?;
    Ok(Json(DataResponse { data: teachers }))
}

/// POST /api/v1/teachers
pub async fn create_teacher(
    State(state): State<AppState>,
    scope: CampusScope,
    Json(input): Json<CreateTeacher>,
) -> AppResult<(StatusCode, Json<DataResponse<Teacher>>)> {
    ensure_admin(&scope.user)?;
    input.validate()?;
    let campus_id = scope.with_body(input.campus_id).require()?;

    let teacher = TeacherRepo::create(&state.pool, campus_id, &input).await?;
    tracing::info!(teacher_id = teacher.id, campus_id, "Teacher created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: teacher })))
}

/// GET /api/v1/teachers/{id}
pub async fn get_teacher(
    State(state): State<AppState>,
    scope: CampusScope,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Teacher>>> {
    let campus_id = scope.require()?;
    let teacher = TeacherRepo::find_by_id(&state.pool, campus_id, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: teacher }))
}

/// PUT /api/v1/teachers/{id}
pub async fn update_teacher(
    State(state): State<AppState>,
    scope: CampusScope,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTeacher>,
) -> AppResult<Json<DataResponse<Teacher>>> {
    ensure_admin(&scope.user)?;
    input.validate()?;
    let campus_id = scope.require()?;
    let teacher = TeacherRepo::update(&state.pool, campus_id, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: teacher }))
}

/// DELETE /api/v1/teachers/{id}
pub async fn delete_teacher(
    State(state): State<AppState>,
    scope: CampusScope,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    ensure_admin(&scope.user)?;
    let campus_id = scope.require()?;
    if !TeacherRepo::delete(&state.pool, campus_id, id).await? {
        return Err(not_found(id));
    }
    tracing::info!(teacher_id = id, campus_id, "Teacher deleted");
    Ok(StatusCode::NO_CONTENT)
}
