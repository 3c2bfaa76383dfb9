//! Repository for the four inventory master tables.
//!
//! Table names come from [`MasterKind::table`], a closed set, so formatting
//! them into SQL is safe.

use campus_core::types::DbId;
use sqlx::PgPool;

use crate::models::inventory_master::{
    CreateInventoryMaster, InventoryMaster, MasterKind, UpdateInventoryMaster,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, campus_id, name, description, created_at, updated_at";

/// Campus-scoped CRUD for categories, stores, suppliers, and units.
pub struct InventoryMasterRepo;

impl InventoryMasterRepo {
    /// Insert a new master row on `campus_id`.
    pub async fn create(
        pool: &PgPool,
        kind: MasterKind,
        campus_id: DbId,
        input: &CreateInventoryMaster,
    ) -> Result<InventoryMaster, sqlx::Error> {
        let query = format!(
            "INSERT INTO {} (campus_id, name, description)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}",
            kind.table()
        );
        sqlx::query_as::<_, InventoryMaster>(&query)
            .bind(campus_id)
            .bind(&input.name)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    /// Find a master row by ID within a campus.
    pub async fn find_by_id(
        pool: &PgPool,
        kind: MasterKind,
        campus_id: DbId,
        id: DbId,
    ) -> Result<Option<InventoryMaster>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM {} WHERE id = $1 AND campus_id = $2",
            kind.table()
        );
        sqlx::query_as::<_, InventoryMaster>(&query)
            .bind(id)
            .bind(campus_id)
            .fetch_optional(pool)
            .await
    }

    /// List every master row of `kind` on a campus, by name.
    pub async fn list_by_campus(
        pool: &PgPool,
        kind: MasterKind,
        campus_id: DbId,
    ) -> Result<Vec<InventoryMaster>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM {} WHERE campus_id = $1 ORDER BY name ASC",
            kind.table()
        );
        sqlx::query_as::<_, InventoryMaster>(&query)
            .bind(campus_id)
            .fetch_all(pool)
            .await
    }

    /// Update a master row. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        kind: MasterKind,
        campus_id: DbId,
        id: DbId,
        input: &UpdateInventoryMaster,
    ) -> Result<Option<InventoryMaster>, sqlx::Error> {
        let query = format!(
            "UPDATE {} SET
                name = COALESCE($3, name),
                description = COALESCE($4, description)
             WHERE id = $1 AND campus_id = $2
             RETURNING {COLUMNS}",
            kind.table()
        );
        sqlx::query_as::<_, InventoryMaster>(&query)
            .bind(id)
            .bind(campus_id)
            .bind(&input.name)
            .bind(&input.description)
            .fetch_optional(pool)
            .await
    }

    /// Delete a master row. Products referencing it keep a NULL reference.
    pub async fn delete(
        pool: &PgPool,
        kind: MasterKind,
        campus_id: DbId,
        id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let query = format!(
            "DELETE FROM {} WHERE id = $1 AND campus_id = $2",
            kind.table()
        );
        let result = sqlx::query(&query)
            .bind(id)
            .bind(campus_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
