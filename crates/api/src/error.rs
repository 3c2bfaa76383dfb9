use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use campus_core::error::CoreError;
use campus_core::inventory::StockError;
use campus_core::qr_attendance::QrAttendanceError;
use campus_db::ledger::LedgerError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `campus_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A stock ledger failure (rolled back before this is returned).
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// A rejected QR attendance redemption.
    #[error(transparent)]
    QrAttendance(#[from] QrAttendanceError),

    /// Request body failed `validator` rules.
    #[error("Validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
                CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_string(),
                    )
                }
            },

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(err),

            // --- Ledger errors ---
            AppError::Ledger(err) => match err {
                LedgerError::Stock(stock) => classify_stock_error(stock),
                LedgerError::EntryNotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                LedgerError::Database(db) => classify_sqlx_error(db),
            },

            // --- QR attendance errors ---
            AppError::QrAttendance(err) => match err {
                QrAttendanceError::InvalidSession => {
                    (StatusCode::BAD_REQUEST, "INVALID_SESSION", err.to_string())
                }
                QrAttendanceError::Forbidden(msg) => {
                    (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone())
                }
                QrAttendanceError::Expired { .. } => {
                    (StatusCode::GONE, "SESSION_EXPIRED", err.to_string())
                }
            },

            // --- HTTP-specific errors ---
            AppError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                errors.to_string(),
            ),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Map a stock error to an HTTP status, error code, and message.
fn classify_stock_error(err: &StockError) -> (StatusCode, &'static str, String) {
    match err {
        StockError::ProductNotFound { .. } => {
            (StatusCode::NOT_FOUND, "NOT_FOUND", err.to_string())
        }
        StockError::CampusMismatch { .. } => {
            (StatusCode::FORBIDDEN, "FORBIDDEN", err.to_string())
        }
        StockError::InsufficientStock { .. } => {
            (StatusCode::BAD_REQUEST, "INSUFFICIENT_STOCK", err.to_string())
        }
        StockError::QuantityOverflow { .. } => {
            (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", err.to_string())
        }
    }
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Unique constraint violations (constraint name starting with `uq_`) map to 409.
/// - Foreign key violations map to 409 (a referenced row is missing or still in use).
/// - Check constraint violations map to 400.
/// - Deadlocks and serialization failures map to 409 (safe to retry).
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) => {
            let constraint = db_err.constraint().unwrap_or("unknown");
            match db_err.code().as_deref() {
                // PostgreSQL unique constraint violation
                Some("23505") if constraint.starts_with("uq_") => {
                    return (
                        StatusCode::CONFLICT,
                        "CONFLICT",
                        format!("Duplicate value violates unique constraint: {constraint}"),
                    );
                }
                Some("23503") => {
                    return (
                        StatusCode::CONFLICT,
                        "CONFLICT",
                        format!("Referenced record missing or still in use: {constraint}"),
                    );
                }
                Some("23514") => {
                    return (
                        StatusCode::BAD_REQUEST,
                        "VALIDATION_ERROR",
                        format!("Value violates check constraint: {constraint}"),
                    );
                }
                Some("40P01") | Some("40001") => {
                    tracing::warn!(error = %db_err, "Transaction aborted by lock conflict");
                    return (
                        StatusCode::CONFLICT,
                        "CONFLICT",
                        "Concurrent update conflict, please retry".to_string(),
                    );
                }
                _ => {}
            }
            tracing::error!(error = %db_err, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
        other => {
            tracing::error!(error = %other, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn stock_errors_map_to_expected_statuses() {
        let insufficient = LedgerError::Stock(StockError::InsufficientStock {
            product_id: 1,
            available: 2,
            requested: 3,
        });
        assert_eq!(status_of(insufficient.into()), StatusCode::BAD_REQUEST);

        let mismatch = LedgerError::Stock(StockError::CampusMismatch { product_id: 1 });
        assert_eq!(status_of(mismatch.into()), StatusCode::FORBIDDEN);

        let missing = LedgerError::Stock(StockError::ProductNotFound { product_id: 1 });
        assert_eq!(status_of(missing.into()), StatusCode::NOT_FOUND);

        let overflow = LedgerError::Stock(StockError::QuantityOverflow { product_id: 1 });
        assert_eq!(status_of(overflow.into()), StatusCode::BAD_REQUEST);

        let entry = LedgerError::EntryNotFound {
            entity: "Sale",
            id: 9,
        };
        assert_eq!(status_of(entry.into()), StatusCode::NOT_FOUND);
    }

    #[test]
    fn qr_errors_map_to_expected_statuses() {
        assert_eq!(
            status_of(QrAttendanceError::InvalidSession.into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(QrAttendanceError::Forbidden("nope".into()).into()),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            status_of(
                QrAttendanceError::Expired {
                    expires_at: Utc::now()
                }
                .into()
            ),
            StatusCode::GONE
        );
    }

    #[test]
    fn row_not_found_is_404() {
        assert_eq!(
            status_of(AppError::Database(sqlx::Error::RowNotFound)),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn internal_errors_are_sanitized() {
        assert_eq!(
            status_of(AppError::InternalError("secret detail".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
