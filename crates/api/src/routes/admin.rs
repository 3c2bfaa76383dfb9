//! Route definitions for the `/admin` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// All routes require a privileged role (enforced by handlers).
///
/// ```text
/// GET    /users        -> list_users
/// POST   /users        -> create_user
/// GET    /users/{id}   -> get_user
/// PUT    /users/{id}   -> update_user
/// DELETE /users/{id}   -> deactivate_user
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(admin::list_users).post(admin::create_user))
        .route(
            "/users/{id}",
            get(admin::get_user)
                .put(admin::update_user)
                .delete(admin::deactivate_user),
        )
}
