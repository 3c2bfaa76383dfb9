//! Repository for the `teachers` table.

use campus_core::types::DbId;
use sqlx::PgPool;

use crate::models::teacher::{CreateTeacher, Teacher, UpdateTeacher};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, campus_id, user_id, employee_code, first_name, last_name, \
    subject, phone, email, is_active, created_at, updated_at";

/// Campus-scoped CRUD for teachers.
pub struct TeacherRepo;

impl TeacherRepo {
    /// Insert a new teacher on `campus_id`, returning the created row.
    pub async fn create(
        pool: &PgPool,
        campus_id: DbId,
        input: &CreateTeacher,
    ) -> Result<Teacher, sqlx::Error> {
        let query = format!(
            "INSERT INTO teachers
                (campus_id, user_id, employee_code, first_name, last_name, subject, phone, email)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Teacher>(&query)
            .bind(campus_id)
            .bind(input.user_id)
            .bind(&input.employee_code)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.subject)
            .bind(&input.phone)
            .bind(&input.email)
            .fetch_one(pool)
            .await
    }

    /// Find a teacher by ID within a campus.
    pub async fn find_by_id(
        pool: &PgPool,
        campus_id: DbId,
        id: DbId,
    ) -> Result<Option<Teacher>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM teachers WHERE id = $1 AND campus_id = $2");
        sqlx::query_as::<_, Teacher>(&query)
            .bind(id)
            .bind(campus_id)
            .fetch_optional(pool)
            .await
    }

    /// Find the teacher linked to a login account.
    pub async fn find_by_user_id(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<Teacher>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM teachers WHERE user_id = $1");
        sqlx::query_as::<_, Teacher>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// List teachers on a campus by name.
    pub async fn list_by_campus(
        pool: &PgPool,
        campus_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Teacher>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM teachers
             WHERE campus_id = $1
             ORDER BY first_name ASC, last_name ASC NULLS LAST, id ASC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Teacher>(&query)
            .bind(campus_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Update a teacher. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        campus_id: DbId,
        id: DbId,
        input: &UpdateTeacher,
    ) -> Result<Option<Teacher>, sqlx::Error> {
        let query = format!(
            "UPDATE teachers SET
                user_id = COALESCE($3, user_id),
                employee_code = COALESCE($4, employee_code),
                first_name = COALESCE($5, first_name),
                last_name = COALESCE($6, last_name),
                subject = COALESCE($7, subject),
                phone = COALESCE($8, phone),
                email = COALESCE($9, email),
                is_active = COALESCE($10, is_active)
             WHERE id = $1 AND campus_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Teacher>(&query)
            .bind(id)
            .bind(campus_id)
            .bind(input.user_id)
            .bind(&input.employee_code)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.subject)
            .bind(&input.phone)
            .bind(&input.email)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Delete a teacher on a campus. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, campus_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM teachers WHERE id = $1 AND campus_id = $2")
            .bind(id)
            .bind(campus_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
