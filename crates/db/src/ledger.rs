//! Transactional stock ledger.
//!
//! Purchases, sales, and issues are the only writers of `products.quantity`.
//! Every create, edit, or delete of a ledger row runs in one transaction that
//! also moves the product's stock by the row's signed effect, so at each
//! commit point
//!
//! ```text
//! products.quantity == Σ completed purchases − Σ paid sales − Σ issued items
//! ```
//!
//! Concurrency: the product row is read with `SELECT ... FOR NO KEY UPDATE`,
//! which serializes concurrent ledger writes on the same product under
//! PostgreSQL's default READ COMMITTED isolation without conflicting with the
//! key-share locks that ledger-row foreign keys take. The ledger row being
//! edited or deleted is locked with `FOR UPDATE`, so two edits of one row
//! cannot both reverse its old effect. An edit that touches two products
//! locks them in ascending id order.

use async_trait::async_trait;
use campus_core::inventory::{next_quantity, stock_effect, StockEntryKind, StockError};
use campus_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::issue::Issue;
use crate::models::purchase::Purchase;
use crate::models::sale::Sale;

/* --------------------------------------------------------------------------
Errors
-------------------------------------------------------------------------- */

/// Failures of a ledger operation. Any of these rolls back the transaction.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error(transparent)]
    Stock(#[from] StockError),

    #[error("{entity} with id {id} not found")]
    EntryNotFound { entity: &'static str, id: DbId },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/* --------------------------------------------------------------------------
Ledger row abstraction
-------------------------------------------------------------------------- */

/// Fields every ledger row exposes to the stock bookkeeping.
pub trait LedgerRow {
    fn campus_id(&self) -> DbId;
    fn product_id(&self) -> DbId;
    fn quantity(&self) -> i64;
    fn status(&self) -> &str;
}

/// Connection-level persistence for one kind of ledger row.
///
/// Every method runs on the caller's connection so the ledger can group them
/// with the stock update in one transaction.
#[async_trait]
pub trait LedgerEntryRepo: Send + Sync {
    const KIND: StockEntryKind;

    type Row: LedgerRow + Send + Sync;
    type Create: Sync;
    type Update: Sync;

    /// Insert a new row on `campus_id`.
    async fn insert(
        conn: &mut PgConnection,
        campus_id: DbId,
        input: &Self::Create,
    ) -> Result<Self::Row, sqlx::Error>;

    /// Load a row of this campus and lock it until the transaction ends.
    async fn lock_by_id(
        conn: &mut PgConnection,
        campus_id: DbId,
        id: DbId,
    ) -> Result<Option<Self::Row>, sqlx::Error>;

    /// Apply the edited fields, returning the new row.
    async fn update(
        conn: &mut PgConnection,
        campus_id: DbId,
        id: DbId,
        input: &Self::Update,
    ) -> Result<Option<Self::Row>, sqlx::Error>;

    /// Remove the row. Returns `true` if it existed.
    async fn delete(conn: &mut PgConnection, campus_id: DbId, id: DbId)
        -> Result<bool, sqlx::Error>;
}

/// Signed stock effect of a persisted ledger row.
pub fn row_effect<R: LedgerEntryRepo>(row: &R::Row) -> i64 {
    stock_effect(R::KIND, row.status(), row.quantity())
}

/* --------------------------------------------------------------------------
Stock mutation
-------------------------------------------------------------------------- */

/// Move a product's stock by `delta` inside the caller's transaction.
///
/// Locks the product row, then fails with `ProductNotFound`, `CampusMismatch`,
/// or `InsufficientStock` before writing anything. A zero delta still runs
/// the existence and campus checks. Returns the resulting quantity.
pub async fn apply_stock_delta(
    conn: &mut PgConnection,
    product_id: DbId,
    delta: i64,
    campus_id: DbId,
) -> Result<i64, LedgerError> {
    let row: Option<(DbId, i64)> =
        sqlx::query_as("SELECT campus_id, quantity FROM products WHERE id = $1 FOR NO KEY UPDATE")
            .bind(product_id)
            .fetch_optional(&mut *conn)
            .await?;

    let (product_campus, current) = row.ok_or(StockError::ProductNotFound { product_id })?;
    if product_campus != campus_id {
        return Err(StockError::CampusMismatch { product_id }.into());
    }

    let next = next_quantity(product_id, current, delta)?;
    if delta != 0 {
        sqlx::query("UPDATE products SET quantity = $2 WHERE id = $1")
            .bind(product_id)
            .bind(next)
            .execute(&mut *conn)
            .await?;
        tracing::debug!(product_id, campus_id, delta, quantity = next, "Stock moved");
    }
    Ok(next)
}

/// Lock several product rows in ascending id order.
async fn lock_products(conn: &mut PgConnection, product_ids: &[DbId]) -> Result<(), sqlx::Error> {
    let mut ids = product_ids.to_vec();
    ids.sort_unstable();
    ids.dedup();
    sqlx::query("SELECT id FROM products WHERE id = ANY($1) ORDER BY id FOR NO KEY UPDATE")
        .bind(&ids)
        .fetch_all(&mut *conn)
        .await?;
    Ok(())
}

/* --------------------------------------------------------------------------
Create / update / delete flows
-------------------------------------------------------------------------- */

/// Record a new ledger row and apply its effect atomically.
pub async fn create_entry<R: LedgerEntryRepo>(
    pool: &PgPool,
    campus_id: DbId,
    input: &R::Create,
) -> Result<R::Row, LedgerError> {
    let mut tx = pool.begin().await?;

    let row = R::insert(&mut *tx, campus_id, input).await?;
    let effect = row_effect::<R>(&row);
    apply_stock_delta(&mut *tx, row.product_id(), effect, campus_id).await?;

    tx.commit().await?;
    tracing::info!(
        kind = R::KIND.entity_name(),
        product_id = row.product_id(),
        campus_id,
        effect,
        "Ledger entry created"
    );
    Ok(row)
}

/// Edit a ledger row: persist the edit, reverse the old effect, then apply
/// the new effect, all in one transaction.
///
/// Works when the edit changes status, quantity, or even the product.
pub async fn update_entry<R: LedgerEntryRepo>(
    pool: &PgPool,
    campus_id: DbId,
    id: DbId,
    input: &R::Update,
) -> Result<R::Row, LedgerError> {
    let mut tx = pool.begin().await?;

    let old = R::lock_by_id(&mut *tx, campus_id, id)
        .await?
        .ok_or(LedgerError::EntryNotFound {
            entity: R::KIND.entity_name(),
            id,
        })?;
    let new = R::update(&mut *tx, campus_id, id, input)
        .await?
        .ok_or(LedgerError::EntryNotFound {
            entity: R::KIND.entity_name(),
            id,
        })?;

    lock_products(&mut *tx, &[old.product_id(), new.product_id()]).await?;

    let old_effect = row_effect::<R>(&old);
    apply_stock_delta(&mut *tx, old.product_id(), -old_effect, campus_id).await?;
    let new_effect = row_effect::<R>(&new);
    apply_stock_delta(&mut *tx, new.product_id(), new_effect, campus_id).await?;

    tx.commit().await?;
    tracing::info!(
        kind = R::KIND.entity_name(),
        id,
        campus_id,
        old_effect,
        new_effect,
        "Ledger entry updated"
    );
    Ok(new)
}

/// Reverse a ledger row's effect and delete it in one transaction.
pub async fn delete_entry<R: LedgerEntryRepo>(
    pool: &PgPool,
    campus_id: DbId,
    id: DbId,
) -> Result<(), LedgerError> {
    let mut tx = pool.begin().await?;

    let row = R::lock_by_id(&mut *tx, campus_id, id)
        .await?
        .ok_or(LedgerError::EntryNotFound {
            entity: R::KIND.entity_name(),
            id,
        })?;
    let effect = row_effect::<R>(&row);
    apply_stock_delta(&mut *tx, row.product_id(), -effect, campus_id).await?;
    R::delete(&mut *tx, campus_id, id).await?;

    tx.commit().await?;
    tracing::info!(
        kind = R::KIND.entity_name(),
        id,
        campus_id,
        effect,
        "Ledger entry deleted"
    );
    Ok(())
}

/* --------------------------------------------------------------------------
LedgerRow impls
-------------------------------------------------------------------------- */

macro_rules! impl_ledger_row {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl LedgerRow for $ty {
                fn campus_id(&self) -> DbId {
                    self.campus_id
                }
                fn product_id(&self) -> DbId {
                    self.product_id
                }
                fn quantity(&self) -> i64 {
                    self.quantity
                }
                fn status(&self) -> &str {
                    &self.status
                }
            }
        )+
    };
}

impl_ledger_row!(Purchase, Sale, Issue);
