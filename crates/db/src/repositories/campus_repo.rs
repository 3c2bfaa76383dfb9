//! Repository for the `campuses` table.

use campus_core::types::DbId;
use sqlx::PgPool;

use crate::models::campus::{Campus, CreateCampus, UpdateCampus};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, code, address, is_active, created_at, updated_at";

/// Provides CRUD operations for campuses.
pub struct CampusRepo;

impl CampusRepo {
    /// Insert a new campus, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateCampus) -> Result<Campus, sqlx::Error> {
        let query = format!(
            "INSERT INTO campuses (name, code, address)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Campus>(&query)
            .bind(&input.name)
            .bind(&input.code)
            .bind(&input.address)
            .fetch_one(pool)
            .await
    }

    /// Find a campus by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Campus>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM campuses WHERE id = $1");
        sqlx::query_as::<_, Campus>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List campuses by name. Inactive campuses are included only on request.
    pub async fn list(pool: &PgPool, include_inactive: bool) -> Result<Vec<Campus>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM campuses
             WHERE is_active = true OR $1
             ORDER BY name ASC"
        );
        sqlx::query_as::<_, Campus>(&query)
            .bind(include_inactive)
            .fetch_all(pool)
            .await
    }

    /// Update a campus. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCampus,
    ) -> Result<Option<Campus>, sqlx::Error> {
        let query = format!(
            "UPDATE campuses SET
                name = COALESCE($2, name),
                code = COALESCE($3, code),
                address = COALESCE($4, address),
                is_active = COALESCE($5, is_active)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Campus>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.code)
            .bind(&input.address)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Soft-deactivate a campus. Returns `true` if the row was updated.
    pub async fn deactivate(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE campuses SET is_active = false WHERE id = $1 AND is_active = true")
                .bind(id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
