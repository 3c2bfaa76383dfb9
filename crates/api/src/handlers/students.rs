//! Handlers for the `/students` resource.
//!
//! Reads are open to any authenticated user of the campus; writes require a
//! privileged role.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use campus_core::error::CoreError;
use campus_core::types::DbId;
use campus_db::models::student::{CreateStudent, Student, UpdateStudent};
use campus_db::repositories::StudentRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::campus::CampusScope;
use crate::middleware::rbac::ensure_admin;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Student",
        id,
    })
}

/// GET /api/v1/students
pub async fn list_students(
    State(state): State<AppState>,
    scope: CampusScope,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<Student>>>> {
    let Some(campus_id) = scope.campus_id() else {
        return Ok(Json(DataResponse { data: Vec::new() }));
    };
    let (limit, offset) = params.resolve();
    let students = StudentRepo::list_by_campus(&state.pool, campus_id, limit, offset).await?;
    Ok(Json(DataResponse { data: students }))
}

/// POST /api/v1/students
pub async fn create_student(
    State(state): State<AppState>,
    scope: CampusScope,
    Json(input): Json<CreateStudent>,
) -> AppResult<(StatusCode, Json<DataResponse<Student>>)> {
    ensure_admin(&scope.user)?;
    input.validate()?;
    let campus_id = scope.with_body(input.campus_id).require()?;

    let student = StudentRepo::create(&state.pool, campus_id, &input).await?;
    tracing::info!(student_id = student.id, campus_id, "Student created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: student })))
}

/// GET /api/v1/students/{id}
pub async fn get_student(
    State(state): State<AppState>,
    scope: CampusScope,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Student>>> {
    let campus_id = scope.require()?;
    let student = StudentRepo::find_by_id(&state.pool, campus_id, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: student }))
}

/// PUT /api/v1/students/{id}
pub async fn update_student(
    State(state): State<AppState>,
    scope: CampusScope,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateStudent>,
) -> AppResult<Json<DataResponse<Student>>> {
    ensure_admin(&scope.user)?;
    input.validate()?;
    let campus_id = scope.require()?;
    let student = StudentRepo::update(&state.pool, campus_id, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: student }))
}

/// DELETE /api/v1/students/{id}
pub async fn delete_student(
    State(state): State<AppState>,
    scope: CampusScope,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    ensure_admin(&scope.user)?;
    let campus_id = scope.require()?;
    if !StudentRepo::delete(&state.pool, campus_id, id).await? {
        return Err(not_found(id));
    }
    tracing::info!(student_id = id, campus_id, "Student deleted");
    Ok(StatusCode::NO_CONTENT)
}
