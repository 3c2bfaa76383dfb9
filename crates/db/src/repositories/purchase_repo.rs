//! Repository for the `purchases` table.
//!
//! Writes go through [`crate::ledger`]; call [`crate::ledger::create_entry`]
//! and friends with `PurchaseRepo` rather than the trait methods directly.

use async_trait::async_trait;
use campus_core::inventory::StockEntryKind;
use campus_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::ledger::LedgerEntryRepo;
use crate::models::purchase::{CreatePurchase, Purchase, UpdatePurchase};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, campus_id, product_id, supplier_id, quantity, unit_price, \
    total_amount, status, purchase_date, notes, created_at, updated_at";

/// Campus-scoped reads and ledger-driven writes for purchases.
pub struct PurchaseRepo;

impl PurchaseRepo {
    /// Find a purchase by ID within a campus.
    pub async fn find_by_id(
        pool: &PgPool,
        campus_id: DbId,
        id: DbId,
    ) -> Result<Option<Purchase>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM purchases WHERE id = $1 AND campus_id = $2");
        sqlx::query_as::<_, Purchase>(&query)
            .bind(id)
            .bind(campus_id)
            .fetch_optional(pool)
            .await
    }

    /// List purchases on a campus, newest first.
    pub async fn list_by_campus(
        pool: &PgPool,
        campus_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Purchase>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM purchases
             WHERE campus_id = $1
             ORDER BY purchase_date DESC, id DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Purchase>(&query)
            .bind(campus_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }
}

#[async_trait]
impl LedgerEntryRepo for PurchaseRepo {
    const KIND: StockEntryKind = StockEntryKind::Purchase;

    type Row = Purchase;
    type Create = CreatePurchase;
    type Update = UpdatePurchase;

    async fn insert(
        conn: &mut PgConnection,
        campus_id: DbId,
        input: &CreatePurchase,
    ) -> Result<Purchase, sqlx::Error> {
        let query = format!(
            "INSERT INTO purchases
                (campus_id, product_id, supplier_id, quantity, unit_price, total_amount,
                 status, purchase_date, notes)
             VALUES ($1, $2, $3, $4, COALESCE($5, 0), $4 * COALESCE($5, 0),
                     $6, COALESCE($7, CURRENT_DATE), $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Purchase>(&query)
            .bind(campus_id)
            .bind(input.product_id)
            .bind(input.supplier_id)
            .bind(input.quantity)
            .bind(input.unit_price)
            .bind(
                input
                    .status
                    .as_deref()
                    .unwrap_or(Self::KIND.default_status()),
            )
            .bind(input.purchase_date)
            .bind(&input.notes)
            .fetch_one(conn)
            .await
    }

    async fn lock_by_id(
        conn: &mut PgConnection,
        campus_id: DbId,
        id: DbId,
    ) -> Result<Option<Purchase>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM purchases WHERE id = $1 AND campus_id = $2 FOR UPDATE"
        );
        sqlx::query_as::<_, Purchase>(&query)
            .bind(id)
            .bind(campus_id)
            .fetch_optional(conn)
            .await
    }

    async fn update(
        conn: &mut PgConnection,
        campus_id: DbId,
        id: DbId,
        input: &UpdatePurchase,
    ) -> Result<Option<Purchase>, sqlx::Error> {
        let query = format!(
            "UPDATE purchases SET
                product_id = COALESCE($3, product_id),
                supplier_id = COALESCE($4, supplier_id),
                quantity = COALESCE($5, quantity),
                unit_price = COALESCE($6, unit_price),
                total_amount = COALESCE($5, quantity) * COALESCE($6, unit_price),
                status = COALESCE($7, status),
                purchase_date = COALESCE($8, purchase_date),
                notes = COALESCE($9, notes)
             WHERE id = $1 AND campus_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Purchase>(&query)
            .bind(id)
            .bind(campus_id)
            .bind(input.product_id)
            .bind(input.supplier_id)
            .bind(input.quantity)
            .bind(input.unit_price)
            .bind(&input.status)
            .bind(input.purchase_date)
            .bind(&input.notes)
            .fetch_optional(conn)
            .await
    }

    async fn delete(
        conn: &mut PgConnection,
        campus_id: DbId,
        id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM purchases WHERE id = $1 AND campus_id = $2")
            .bind(id)
            .bind(campus_id)
            .execute(conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
