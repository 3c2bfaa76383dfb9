//! Handlers for inventory master data (`/inventory/{categories|stores|suppliers|units}`)
//! and products (`/inventory/products`).
//!
//! Product stock is read-only here; it changes only through the stock entry
//! handlers in [`super::stock_entries`].

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use campus_core::error::CoreError;
use campus_core::types::DbId;
use campus_db::models::inventory_master::{
    CreateInventoryMaster, InventoryMaster, MasterKind, UpdateInventoryMaster,
};
use campus_db::models::product::{CreateProduct, Product, StockReconciliation, UpdateProduct};
use campus_db::repositories::{InventoryMasterRepo, ProductRepo};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::campus::CampusScope;
use crate::middleware::rbac::ensure_inventory_manager;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

fn parse_kind(segment: &str) -> AppResult<MasterKind> {
    MasterKind::from_segment(segment).ok_or_else(|| {
        AppError::BadRequest(format!("Unknown inventory resource '{segment}'"))
    })
}

/// Reject a referenced master row that is missing from the campus.
pub(crate) async fn ensure_master_on_campus(
    state: &AppState,
    kind: MasterKind,
    campus_id: DbId,
    id: Option<DbId>,
) -> AppResult<()> {
    let Some(id) = id else {
        return Ok(());
    };
    if InventoryMasterRepo::find_by_id(&state.pool, kind, campus_id, id)
        .await?
        .is_none()
    {
        return Err(AppError::Core(CoreError::Validation(format!(
            "{} {id} does not exist on campus {campus_id}",
            kind.entity_name()
        ))));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Master data
// ---------------------------------------------------------------------------

/// GET /api/v1/inventory/{kind}
pub async fn list_masters(
    State(state): State<AppState>,
    scope: CampusScope,
    Path(segment): Path<String>,
) -> AppResult<Json<DataResponse<Vec<InventoryMaster>>>> {
    let kind = parse_kind(&segment)?;
    let Some(campus_id) = scope.campus_id() else {
        return Ok(Json(DataResponse { data: Vec::new() }));
    };
    let rows = InventoryMasterRepo::list_by_campus(&state.pool, kind, campus_id).await?;
    Ok(Json(DataResponse { data: rows }))
}

/// POST /api/v1/inventory/{kind}
pub async fn create_master(
    State(state): State<AppState>,
    scope: CampusScope,
    Path(segment): Path<String>,
    Json(input): Json<CreateInventoryMaster>,
) -> AppResult<(StatusCode, Json<DataResponse<InventoryMaster>>)> {
    let kind = parse_kind(&segment)?;
    ensure_inventory_manager(&scope.user)?;
    input.validate()?;
    let campus_id = scope.with_body(input.campus_id).require()?;

    let row = InventoryMasterRepo::create(&state.pool, kind, campus_id, &input).await?;
    tracing::info!(kind = kind.entity_name(), id = row.id, campus_id, "Inventory master created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: row })))
}

/// GET /api/v1/inventory/{kind}/{id}
pub async fn get_master(
    State(state): State<AppState>,
    scope: CampusScope,
    Path((segment, id)): Path<(String, DbId)>,
) -> AppResult<Json<DataResponse<InventoryMaster>>> {
    let kind = parse_kind(&segment)?;
    let campus_id = scope.require()?;
    let row = InventoryMasterRepo::find_by_id(&state.pool, kind, campus_id, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: kind.entity_name(),
            id,
        }))?;
    Ok(Json(DataResponse { data: row }))
}

/// PUT /api/v1/inventory/{kind}/{id}
pub async fn update_master(
    State(state): State<AppState>,
    scope: CampusScope,
    Path((segment, id)): Path<(String, DbId)>,
    Json(input): Json<UpdateInventoryMaster>,
) -> AppResult<Json<DataResponse<InventoryMaster>>> {
    let kind = parse_kind(&segment)?;
    ensure_inventory_manager(&scope.user)?;
    input.validate()?;
    let campus_id = scope.require()?;
    let row = InventoryMasterRepo::update(&state.pool, kind, campus_id, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: kind.entity_name(),
            id,
        }))?;
    Ok(Json(DataResponse { data: row }))
}

/// DELETE /api/v1/inventory/{kind}/{id}
pub async fn delete_master(
    State(state): State<AppState>,
    scope: CampusScope,
    Path((segment, id)): Path<(String, DbId)>,
) -> AppResult<StatusCode> {
    let kind = parse_kind(&segment)?;
    ensure_inventory_manager(&scope.user)?;
    let campus_id = scope.require()?;
    if !InventoryMasterRepo::delete(&state.pool, kind, campus_id, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: kind.entity_name(),
            id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Products
// ---------------------------------------------------------------------------

fn product_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Product",
        id,
    })
}

/// GET /api/v1/inventory/products
pub async fn list_products(
    State(state): State<AppState>,
    scope: CampusScope,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<Product>>>> {
    let Some(campus_id) = scope.campus_id() else {
        return Ok(Json(DataResponse { data: Vec::new() }));
    };
    let (limit, offset) = params.resolve();
    let products = ProductRepo::list_by_campus(&state.pool, campus_id, limit, offset).await?;
    Ok(Json(DataResponse { data: products }))
}

/// POST /api/v1/inventory/products
///
/// New products always start with zero stock.
pub async fn create_product(
    State(state): State<AppState>,
    scope: CampusScope,
    Json(input): Json<CreateProduct>,
) -> AppResult<(StatusCode, Json<DataResponse<Product>>)> {
    ensure_inventory_manager(&scope.user)?;
    input.validate()?;
    let campus_id = scope.with_body(input.campus_id).require()?;
    ensure_master_on_campus(&state, MasterKind::Category, campus_id, input.category_id).await?;
    ensure_master_on_campus(&state, MasterKind::Store, campus_id, input.store_id).await?;
    ensure_master_on_campus(&state, MasterKind::Unit, campus_id, input.unit_id).await?;

    let product = ProductRepo::create(&state.pool, campus_id, &input).await?;
    tracing::info!(product_id = product.id, campus_id, "Product created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: product })))
}

/// GET /api/v1/inventory/products/{id}
pub async fn get_product(
    State(state): State<AppState>,
    scope: CampusScope,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Product>>> {
    let campus_id = scope.require()?;
    let product = ProductRepo::find_by_id(&state.pool, campus_id, id)
        .await?
        .ok_or_else(|| product_not_found(id))?;
    Ok(Json(DataResponse { data: product }))
}

/// PUT /api/v1/inventory/products/{id}
///
/// Descriptive fields only; `quantity` is not accepted.
pub async fn update_product(
    State(state): State<AppState>,
    scope: CampusScope,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProduct>,
) -> AppResult<Json<DataResponse<Product>>> {
    ensure_inventory_manager(&scope.user)?;
    input.validate()?;
    let campus_id = scope.require()?;
    ensure_master_on_campus(&state, MasterKind::Category, campus_id, input.category_id).await?;
    ensure_master_on_campus(&state, MasterKind::Store, campus_id, input.store_id).await?;
    ensure_master_on_campus(&state, MasterKind::Unit, campus_id, input.unit_id).await?;

    let product = ProductRepo::update(&state.pool, campus_id, id, &input)
        .await?
        .ok_or_else(|| product_not_found(id))?;
    Ok(Json(DataResponse { data: product }))
}

/// DELETE /api/v1/inventory/products/{id}
///
/// Answers 409 while purchases, sales, or issues still reference the product.
pub async fn delete_product(
    State(state): State<AppState>,
    scope: CampusScope,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    ensure_inventory_manager(&scope.user)?;
    let campus_id = scope.require()?;
    if !ProductRepo::delete(&state.pool, campus_id, id).await? {
        return Err(product_not_found(id));
    }
    tracing::info!(product_id = id, campus_id, "Product deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/inventory/products/{id}/reconcile
///
/// Compare stored stock against the sum of committed ledger effects.
pub async fn reconcile_product(
    State(state): State<AppState>,
    scope: CampusScope,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<StockReconciliation>>> {
    let campus_id = scope.require()?;
    let product = ProductRepo::find_by_id(&state.pool, campus_id, id)
        .await?
        .ok_or_else(|| product_not_found(id))?;
    let ledger_total = ProductRepo::ledger_total(&state.pool, id).await?;

    let consistent = ledger_total == product.quantity;
    if !consistent {
        tracing::warn!(
            product_id = id,
            campus_id,
            quantity = product.quantity,
            ledger_total,
            "Stock drifted from ledger"
        );
    }
    Ok(Json(DataResponse {
        data: StockReconciliation {
            product_id: id,
            quantity: product.quantity,
            ledger_total,
            consistent,
        },
    }))
}
