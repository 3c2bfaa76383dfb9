//! Handlers for stock-moving ledger rows: `/inventory/purchases`,
//! `/inventory/sales`, and `/inventory/issues`.
//!
//! Every write goes through [`campus_db::ledger`], so the row and the
//! product's stock change together or not at all.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use campus_core::error::CoreError;
use campus_core::inventory::validate_entry_status;
use campus_core::types::DbId;
use campus_db::ledger::{self, LedgerEntryRepo};
use campus_db::models::inventory_master::MasterKind;
use campus_db::models::issue::{CreateIssue, Issue, UpdateIssue};
use campus_db::models::purchase::{CreatePurchase, Purchase, UpdatePurchase};
use campus_db::models::sale::{CreateSale, Sale, UpdateSale};
use campus_db::repositories::{IssueRepo, PurchaseRepo, SaleRepo};
use validator::Validate;

use super::inventory::ensure_master_on_campus;
use crate::error::{AppError, AppResult};
use crate::middleware::campus::CampusScope;
use crate::middleware::rbac::ensure_inventory_manager;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Shared flow
// ---------------------------------------------------------------------------

fn check_status<R: LedgerEntryRepo>(status: Option<&str>) -> AppResult<()> {
    if let Some(status) = status {
        validate_entry_status(R::KIND, status)?;
    }
    Ok(())
}

fn entry_not_found<R: LedgerEntryRepo>(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: R::KIND.entity_name(),
        id,
    })
}

async fn create<R: LedgerEntryRepo>(
    state: &AppState,
    campus_id: DbId,
    input: &R::Create,
) -> AppResult<(StatusCode, Json<DataResponse<R::Row>>)>
where
    R::Row: serde::Serialize,
{
    let row = ledger::create_entry::<R>(&state.pool, campus_id, input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: row })))
}

async fn update<R: LedgerEntryRepo>(
    state: &AppState,
    campus_id: DbId,
    id: DbId,
    input: &R::Update,
) -> AppResult<Json<DataResponse<R::Row>>>
where
    R::Row: serde::Serialize,
{
    let row = ledger::update_entry::<R>(&state.pool, campus_id, id, input).await?;
    Ok(Json(DataResponse { data: row }))
}

async fn delete<R: LedgerEntryRepo>(
    state: &AppState,
    scope: &CampusScope,
    id: DbId,
) -> AppResult<StatusCode> {
    ensure_inventory_manager(&scope.user)?;
    let campus_id = scope.require()?;
    ledger::delete_entry::<R>(&state.pool, campus_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Purchases
// ---------------------------------------------------------------------------

/// GET /api/v1/inventory/purchases
pub async fn list_purchases(
    State(state): State<AppState>,
    scope: CampusScope,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<Purchase>>>> {
    let Some(campus_id) = scope.campus_id() else {
        return Ok(Json(DataResponse { data: Vec::new() }));
    };
    let (limit, offset) = params.resolve();
    let rows = PurchaseRepo::list_by_campus(&state.pool, campus_id, limit, offset).await?;
    Ok(Json(DataResponse { data: rows }))
}

/// GET /api/v1/inventory/purchases/{id}
pub async fn get_purchase(
    State(state): State<AppState>,
    scope: CampusScope,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Purchase>>> {
    let campus_id = scope.require()?;
    let row = PurchaseRepo::find_by_id(&state.pool, campus_id, id)
        .await?
        .ok_or_else(|| entry_not_found::<PurchaseRepo>(id))?;
    Ok(Json(DataResponse { data: row }))
}

/// POST /api/v1/inventory/purchases
///
/// A `Completed` purchase adds its quantity to the product immediately.
pub async fn create_purchase(
    State(state): State<AppState>,
    scope: CampusScope,
    Json(input): Json<CreatePurchase>,
) -> AppResult<(StatusCode, Json<DataResponse<Purchase>>)> {
    ensure_inventory_manager(&scope.user)?;
    input.validate()?;
    check_status::<PurchaseRepo>(input.status.as_deref())?;
    let campus_id = scope.with_body(input.campus_id).require()?;
    ensure_master_on_campus(&state, MasterKind::Supplier, campus_id, input.supplier_id).await?;
    create::<PurchaseRepo>(&state, campus_id, &input).await
}

/// PUT /api/v1/inventory/purchases/{id}
pub async fn update_purchase(
    State(state): State<AppState>,
    scope: CampusScope,
    Path(id): Path<DbId>,
    Json(input): Json<UpdatePurchase>,
) -> AppResult<Json<DataResponse<Purchase>>> {
    ensure_inventory_manager(&scope.user)?;
    input.validate()?;
    check_status::<PurchaseRepo>(input.status.as_deref())?;
    let campus_id = scope.require()?;
    ensure_master_on_campus(&state, MasterKind::Supplier, campus_id, input.supplier_id).await?;
    update::<PurchaseRepo>(&state, campus_id, id, &input).await
}

/// DELETE /api/v1/inventory/purchases/{id}
pub async fn delete_purchase(
    State(state): State<AppState>,
    scope: CampusScope,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    delete::<PurchaseRepo>(&state, &scope, id).await
}

// ---------------------------------------------------------------------------
// Sales
// ---------------------------------------------------------------------------

/// GET /api/v1/inventory/sales
pub async fn list_sales(
    State(state): State<AppState>,
    scope: CampusScope,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<Sale>>>> {
    let Some(campus_id) = scope.campus_id() else {
        return Ok(Json(DataResponse { data: Vec::new() }));
    };
    let (limit, offset) = params.resolve();
    let rows = SaleRepo::list_by_campus(&state.pool, campus_id, limit, offset).await?;
    Ok(Json(DataResponse { data: rows }))
}

/// GET /api/v1/inventory/sales/{id}
pub async fn get_sale(
    State(state): State<AppState>,
    scope: CampusScope,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Sale>>> {
    let campus_id = scope.require()?;
    let row = SaleRepo::find_by_id(&state.pool, campus_id, id)
        .await?
        .ok_or_else(|| entry_not_found::<SaleRepo>(id))?;
    Ok(Json(DataResponse { data: row }))
}

/// POST /api/v1/inventory/sales
///
/// A `Paid` sale fails with 400 when stock cannot cover it.
pub async fn create_sale(
    State(state): State<AppState>,
    scope: CampusScope,
    Json(input): Json<CreateSale>,
) -> AppResult<(StatusCode, Json<DataResponse<Sale>>)> {
    ensure_inventory_manager(&scope.user)?;
    input.validate()?;
    check_status::<SaleRepo>(input.status.as_deref())?;
    let campus_id = scope.with_body(input.campus_id).require()?;
    create::<SaleRepo>(&state, campus_id, &input).await
}

/// PUT /api/v1/inventory/sales/{id}
pub async fn update_sale(
    State(state): State<AppState>,
    scope: CampusScope,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateSale>,
) -> AppResult<Json<DataResponse<Sale>>> {
    ensure_inventory_manager(&scope.user)?;
    input.validate()?;
    check_status::<SaleRepo>(input.status.as_deref())?;
    let campus_id = scope.require()?;
    update::<SaleRepo>(&state, campus_id, id, &input).await
}

/// DELETE /api/v1/inventory/sales/{id}
pub async fn delete_sale(
    State(state): State<AppState>,
    scope: CampusScope,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    delete::<SaleRepo>(&state, &scope, id).await
}

// ---------------------------------------------------------------------------
// Issues
// ---------------------------------------------------------------------------

/// GET /api/v1/inventory/issues
pub async fn list_issues(
    State(state): State<AppState>,
    scope: CampusScope,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<Issue>>>> {
    let Some(campus_id) = scope.campus_id() else {
        return Ok(Json(DataResponse { data: Vec::new() }));
    };
    let (limit, offset) = params.resolve();
    let rows = IssueRepo::list_by_campus(&state.pool, campus_id, limit, offset).await?;
    Ok(Json(DataResponse { data: rows }))
}

/// GET /api/v1/inventory/issues/{id}
pub async fn get_issue(
    State(state): State<AppState>,
    scope: CampusScope,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Issue>>> {
    let campus_id = scope.require()?;
    let row = IssueRepo::find_by_id(&state.pool, campus_id, id)
        .await?
        .ok_or_else(|| entry_not_found::<IssueRepo>(id))?;
    Ok(Json(DataResponse { data: row }))
}

/// POST /api/v1/inventory/issues
pub async fn create_issue(
    State(state): State<AppState>,
    scope: CampusScope,
    Json(input): Json<CreateIssue>,
) -> AppResult<(StatusCode, Json<DataResponse<Issue>>)> {
    ensure_inventory_manager(&scope.user)?;
    input.validate()?;
    check_status::<IssueRepo>(input.status.as_deref())?;
    let campus_id = scope.with_body(input.campus_id).require()?;
    create::<IssueRepo>(&state, campus_id, &input).await
}

/// PUT /api/v1/inventory/issues/{id}
///
/// Setting `status` to `Returned` puts the quantity back on the shelf.
pub async fn update_issue(
    State(state): State<AppState>,
    scope: CampusScope,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateIssue>,
) -> AppResult<Json<DataResponse<Issue>>> {
    ensure_inventory_manager(&scope.user)?;
    input.validate()?;
    check_status::<IssueRepo>(input.status.as_deref())?;
    let campus_id = scope.require()?;
    update::<IssueRepo>(&state, campus_id, id, &input).await
}

/// DELETE /api/v1/inventory/issues/{id}
pub async fn delete_issue(
    State(state): State<AppState>,
    scope: CampusScope,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    delete::<IssueRepo>(&state, &scope, id).await
}
