//! Route definitions for the `/inventory` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::{inventory, stock_entries};
use crate::state::AppState;

/// Routes mounted at `/inventory`.
///
/// Static segments (`products`, `purchases`, `sales`, `issues`) take
/// precedence over the `{kind}` master-data routes.
///
/// ```text
/// GET|POST        /products                 -> list_products, create_product
/// GET|PUT|DELETE  /products/{id}            -> get/update/delete_product
/// GET             /products/{id}/reconcile  -> reconcile_product
/// GET|POST        /purchases                -> list_purchases, create_purchase
/// GET|PUT|DELETE  /purchases/{id}           -> get/update/delete_purchase
/// GET|POST        /sales                    -> list_sales, create_sale
/// GET|PUT|DELETE  /sales/{id}               -> get/update/delete_sale
/// GET|POST        /issues                   -> list_issues, create_issue
/// GET|PUT|DELETE  /issues/{id}              -> get/update/delete_issue
/// GET|POST        /{kind}                   -> list_masters, create_master
/// GET|PUT|DELETE  /{kind}/{id}              -> get/update/delete_master
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        // Products
        .route(
            "/products",
            get(inventory::list_products).post(inventory::create_product),
        )
        .route(
            "/products/{id}",
            get(inventory::get_product)
                .put(inventory::update_product)
                .delete(inventory::delete_product),
        )
        .route("/products/{id}/reconcile", get(inventory::reconcile_product))
        // Stock entries
        .route(
            "/purchases",
            get(stock_entries::list_purchases).post(stock_entries::create_purchase),
        )
        .route(
            "/purchases/{id}",
            get(stock_entries::get_purchase)
                .put(stock_entries::update_purchase)
                .delete(stock_entries::delete_purchase),
        )
        .route(
            "/sales",
            get(stock_entries::list_sales).post(stock_entries::create_sale),
        )
        .route(
            "/sales/{id}",
            get(stock_entries::get_sale)
                .put(stock_entries::update_sale)
                .delete(stock_entries::delete_sale),
        )
        .route(
            "/issues",
            get(stock_entries::list_issues).post(stock_entries::create_issue),
        )
        .route(
            "/issues/{id}",
            get(stock_entries::get_issue)
                .put(stock_entries::update_issue)
                .delete(stock_entries::delete_issue),
        )
        // Master data
        .route(
            "/{kind}",
            get(inventory::list_masters).post(inventory::create_master),
        )
        .route(
            "/{kind}/{id}",
            get(inventory::get_master)
                .put(inventory::update_master)
                .delete(inventory::delete_master),
        )
}
