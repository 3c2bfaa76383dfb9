//! Limit/offset clamping for list endpoints.

/// Page size used when a request omits `limit`.
pub const DEFAULT_LIMIT: i64 = 50;

/// Largest page size a request may ask for.
pub const MAX_LIMIT: i64 = 200;

/// Clamp a user-provided limit to valid bounds.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

/// Clamp a user-provided offset to non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}
