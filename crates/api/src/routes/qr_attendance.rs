//! Route definitions for the `/qr-attendance` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::qr_attendance;
use crate::state::AppState;

/// Routes mounted at `/qr-attendance`.
///
/// ```text
/// GET  /sessions  -> list_sessions (staff)
/// POST /sessions  -> create_session (staff)
/// POST /redeem    -> redeem (student or teacher)
/// GET  /records   -> list_records (staff)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/sessions",
            get(qr_attendance::list_sessions).post(qr_attendance::create_session),
        )
        .route("/redeem", post(qr_attendance::redeem))
        .route("/records", get(qr_attendance::list_records))
}
