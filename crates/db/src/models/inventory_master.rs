//! Inventory master data: categories, stores, suppliers, units.
//!
//! The four kinds share one row shape and live in four identically shaped
//! tables, so a single model plus a [`MasterKind`] discriminator covers them.

use campus_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Which master table a request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MasterKind {
    Category,
    Store,
    Supplier,
    Unit,
}

impl MasterKind {
    /// Backing table name. Only ever interpolated from this fixed set.
    pub fn table(self) -> &'static str {
        match self {
            MasterKind::Category => "inventory_categories",
            MasterKind::Store => "inventory_stores",
            MasterKind::Supplier => "inventory_suppliers",
            MasterKind::Unit => "inventory_units",
        }
    }

    /// Entity name used in not-found errors.
    pub fn entity_name(self) -> &'static str {
        match self {
            MasterKind::Category => "Category",
            MasterKind::Store => "Store",
            MasterKind::Supplier => "Supplier",
            MasterKind::Unit => "Unit",
        }
    }

    /// Parse the plural URL segment (`categories`, `stores`, ...).
    pub fn from_segment(segment: &str) -> Option<Self> {
        match segment {
            "categories" => Some(MasterKind::Category),
            "stores" => Some(MasterKind::Store),
            "suppliers" => Some(MasterKind::Supplier),
            "units" => Some(MasterKind::Unit),
            _ => None,
        }
    }
}

/// A row from any of the inventory master tables.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct InventoryMaster {
    pub id: DbId,
    pub campus_id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a master row.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateInventoryMaster {
    pub campus_id: Option<DbId>,
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub description: Option<String>,
}

/// DTO for updating a master row. All fields are optional.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateInventoryMaster {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    pub description: Option<String>,
}
