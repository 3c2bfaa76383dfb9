//! Repository for the `students` table.

use campus_core::types::DbId;
use sqlx::PgPool;

use crate::models::student::{CreateStudent, Student, UpdateStudent};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, campus_id, user_id, admission_no, first_name, last_name, \
    class_name, section, roll_no, guardian_name, phone, is_active, created_at, updated_at";

/// Campus-scoped CRUD for students.
pub struct StudentRepo;

impl StudentRepo {
    /// Insert a new student on `campus_id`, returning the created row.
    pub async fn create(
        pool: &PgPool,
        campus_id: DbId,
        input: &CreateStudent,
    ) -> Result<Student, sqlx::Error> {
        let query = format!(
            "INSERT INTO students
                (campus_id, user_id, admission_no, first_name, last_name,
                 class_name, section, roll_no, guardian_name, phone)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Student>(&query)
            .bind(campus_id)
            .bind(input.user_id)
            .bind(&input.admission_no)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.class_name)
            .bind(&input.section)
            .bind(&input.roll_no)
            .bind(&input.guardian_name)
            .bind(&input.phone)
            .fetch_one(pool)
            .await
    }

    /// Find a student by ID within a campus.
    pub async fn find_by_id(
        pool: &PgPool,
        campus_id: DbId,
        id: DbId,
    ) -> Result<Option<Student>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM students WHERE id = $1 AND campus_id = $2");
        sqlx::query_as::<_, Student>(&query)
            .bind(id)
            .bind(campus_id)
            .fetch_optional(pool)
            .await
    }

    /// Find the student linked to a login account.
    pub async fn find_by_user_id(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<Student>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM students WHERE user_id = $1");
        sqlx::query_as::<_, Student>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// List students on a campus, ordered by class, section, and roll number.
    pub async fn list_by_campus(
        pool: &PgPool,
        campus_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Student>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM students
             WHERE campus_id = $1
             ORDER BY class_name ASC NULLS LAST, section ASC NULLS LAST, roll_no ASC NULLS LAST, id ASC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Student>(&query)
            .bind(campus_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Update a student. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no such student exists on the campus.
    pub async fn update(
        pool: &PgPool,
        campus_id: DbId,
        id: DbId,
        input: &UpdateStudent,
    ) -> Result<Option<Student>, sqlx::Error> {
        let query = format!(
            "UPDATE students SET
                user_id = COALESCE($3, user_id),
                admission_no = COALESCE($4, admission_no),
                first_name = COALESCE($5, first_name),
                last_name = COALESCE($6, last_name),
                class_name = COALESCE($7, class_name),
                section = COALESCE($8, section),
                roll_no = COALESCE($9, roll_no),
                guardian_name = COALESCE($10, guardian_name),
                phone = COALESCE($11, phone),
                is_active = COALESCE($12, is_active)
             WHERE id = $1 AND campus_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Student>(&query)
            .bind(id)
            .bind(campus_id)
            .bind(input.user_id)
            .bind(&input.admission_no)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.class_name)
            .bind(&input.section)
            .bind(&input.roll_no)
            .bind(&input.guardian_name)
            .bind(&input.phone)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Delete a student on a campus. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, campus_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM students WHERE id = $1 AND campus_id = $2")
            .bind(id)
            .bind(campus_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
