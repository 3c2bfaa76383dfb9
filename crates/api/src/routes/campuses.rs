//! Route definitions for the `/campuses` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::campuses;
use crate::state::AppState;

/// Routes mounted at `/campuses`.
///
/// ```text
/// GET    /       -> list_campuses
/// POST   /       -> create_campus (admin)
/// GET    /{id}   -> get_campus
/// PUT    /{id}   -> update_campus (admin)
/// DELETE /{id}   -> deactivate_campus (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(campuses::list_campuses).post(campuses::create_campus),
        )
        .route(
            "/{id}",
            get(campuses::get_campus)
                .put(campuses::update_campus)
                .delete(campuses::deactivate_campus),
        )
}
