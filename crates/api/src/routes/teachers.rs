//! Route definitions for the `/teachers` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::teachers;
use crate::state::AppState;

/// Routes mounted at `/teachers`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(teachers::list_teachers).post(teachers::create_teacher),
        )
        .route(
            "/{id}",
            get(teachers::get_teacher)
                .put(teachers::update_teacher)
                .delete(teachers::delete_teacher),
        )
}
