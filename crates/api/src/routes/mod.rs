pub mod admin;
pub mod auth;
pub mod campuses;
pub mod health;
pub mod inventory;
pub mod qr_attendance;
pub mod students;
pub mod teachers;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                                      login (public)
/// /auth/refresh                                    refresh (public)
/// /auth/logout                                     logout (requires auth)
/// /auth/me                                         caller profile
///
/// /campuses                                        list, create (admin)
/// /campuses/{id}                                   get, update, deactivate
///
/// /admin/users                                     list, create (admin, campus-scoped)
/// /admin/users/{id}                                get, update, deactivate
///
/// /students, /teachers                             list, create
/// /students/{id}, /teachers/{id}                   get, update, delete
///
/// /inventory/{categories|stores|suppliers|units}   list, create
/// /inventory/{kind}/{id}                           get, update, delete
/// /inventory/products                              list, create
/// /inventory/products/{id}                         get, update, delete
/// /inventory/products/{id}/reconcile               stock vs ledger
/// /inventory/{purchases|sales|issues}              list, create (moves stock)
/// /inventory/{purchases|sales|issues}/{id}         get, update, delete (moves stock)
///
/// /qr-attendance/sessions                          list active, issue (staff)
/// /qr-attendance/redeem                            redeem token (student/teacher)
/// /qr-attendance/records                           day's records (staff)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/campuses", campuses::router())
        .nest("/admin", admin::router())
        .nest("/students", students::router())
        .nest("/teachers", teachers::router())
        .nest("/inventory", inventory::router())
        .nest("/qr-attendance", qr_attendance::router())
}
