//! Inventory stock rules.
//!
//! A product's on-hand quantity is never written directly. It moves only
//! through ledger rows (purchases, sales, issues), each contributing a signed
//! *stock effect* that depends on the row's status.

use serde::Serialize;

use crate::error::CoreError;
use crate::types::DbId;

/* --------------------------------------------------------------------------
Status vocabularies
-------------------------------------------------------------------------- */

pub const PURCHASE_PENDING: &str = "Pending";
pub const PURCHASE_COMPLETED: &str = "Completed";
pub const PURCHASE_CANCELLED: &str = "Cancelled";

pub const SALE_PENDING: &str = "Pending";
pub const SALE_PAID: &str = "Paid";
pub const SALE_CANCELLED: &str = "Cancelled";

pub const ISSUE_ISSUED: &str = "Issued";
pub const ISSUE_RETURNED: &str = "Returned";

pub const VALID_PURCHASE_STATUSES: &[&str] =
    &[PURCHASE_PENDING, PURCHASE_COMPLETED, PURCHASE_CANCELLED];
pub const VALID_SALE_STATUSES: &[&str] = &[SALE_PENDING, SALE_PAID, SALE_CANCELLED];
pub const VALID_ISSUE_STATUSES: &[&str] = &[ISSUE_ISSUED, ISSUE_RETURNED];

/// Largest quantity a single ledger row may carry.
pub const MAX_ENTRY_QUANTITY: i64 = 1_000_000_000;

/* --------------------------------------------------------------------------
Entry kinds and stock effect
-------------------------------------------------------------------------- */

/// The three kinds of ledger rows that move product stock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StockEntryKind {
    Purchase,
    Sale,
    Issue,
}

impl StockEntryKind {
    /// Human-readable entity name used in errors and logs.
    pub fn entity_name(self) -> &'static str {
        match self {
            StockEntryKind::Purchase => "Purchase",
            StockEntryKind::Sale => "Sale",
            StockEntryKind::Issue => "Issue",
        }
    }

    /// Status values accepted for this kind.
    pub fn valid_statuses(self) -> &'static [&'static str] {
        match self {
            StockEntryKind::Purchase => VALID_PURCHASE_STATUSES,
            StockEntryKind::Sale => VALID_SALE_STATUSES,
            StockEntryKind::Issue => VALID_ISSUE_STATUSES,
        }
    }

    /// Status that makes this kind count against stock.
    pub fn effective_status(self) -> &'static str {
        match self {
            StockEntryKind::Purchase => PURCHASE_COMPLETED,
            StockEntryKind::Sale => SALE_PAID,
            StockEntryKind::Issue => ISSUE_ISSUED,
        }
    }

    /// Status assigned when a create request omits one.
    pub fn default_status(self) -> &'static str {
        match self {
            StockEntryKind::Purchase => PURCHASE_PENDING,
            StockEntryKind::Sale => SALE_PENDING,
            StockEntryKind::Issue => ISSUE_ISSUED,
        }
    }
}

/// Signed quantity a ledger row contributes to its product's stock.
///
/// Completed purchases add, paid sales and issued items subtract; every
/// other status contributes nothing.
pub fn stock_effect(kind: StockEntryKind, status: &str, quantity: i64) -> i64 {
    if status != kind.effective_status() {
        return 0;
    }
    match kind {
        StockEntryKind::Purchase => quantity,
        StockEntryKind::Sale | StockEntryKind::Issue => -quantity,
    }
}

/// Quantity a product ends up with after applying `delta`, or the stock error
/// that prevents it.
pub fn next_quantity(product_id: DbId, current: i64, delta: i64) -> Result<i64, StockError> {
    let next = current
        .checked_add(delta)
        .ok_or(StockError::QuantityOverflow { product_id })?;
    if next < 0 {
        return Err(StockError::InsufficientStock {
            product_id,
            available: current,
            requested: delta.saturating_neg(),
        });
    }
    Ok(next)
}

/* --------------------------------------------------------------------------
Errors
-------------------------------------------------------------------------- */

/// Failures raised while moving product stock.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StockError {
    #[error("Product {product_id} not found")]
    ProductNotFound { product_id: DbId },

    #[error("Product {product_id} belongs to a different campus")]
    CampusMismatch { product_id: DbId },

    #[error("Insufficient stock for product {product_id}: available {available}, requested {requested}")]
    InsufficientStock {
        product_id: DbId,
        available: i64,
        requested: i64,
    },

    #[error("Stock for product {product_id} would exceed the maximum quantity")]
    QuantityOverflow { product_id: DbId },
}

/* --------------------------------------------------------------------------
Validation
-------------------------------------------------------------------------- */

/// Validate that `status` belongs to the vocabulary of `kind`.
pub fn validate_entry_status(kind: StockEntryKind, status: &str) -> Result<(), CoreError> {
    let valid = kind.valid_statuses();
    if valid.contains(&status) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid {} status '{status}'. Must be one of: {}",
            kind.entity_name().to_lowercase(),
            valid.join(", ")
        )))
    }
}

/// Validate a ledger row quantity (1..=[`MAX_ENTRY_QUANTITY`]).
pub fn validate_entry_quantity(quantity: i64) -> Result<(), CoreError> {
    if !(1..=MAX_ENTRY_QUANTITY).contains(&quantity) {
        return Err(CoreError::Validation(format!(
            "Quantity must be between 1 and {MAX_ENTRY_QUANTITY}, got {quantity}"
        )));
    }
    Ok(())
}

/// Validate a unit price (must be finite and non-negative).
pub fn validate_unit_price(price: f64) -> Result<(), CoreError> {
    if !price.is_finite() || price < 0.0 {
        return Err(CoreError::Validation(format!(
            "Unit price must be a non-negative number, got {price}"
        )));
    }
    Ok(())
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */
