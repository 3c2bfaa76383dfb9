//! Campus scope extractor.
//!
//! The one place request-supplied campus ids (headers, query string, body)
//! are combined with the caller's role and bound campus. Handlers take a
//! [`CampusScope`] and ask it for the campus instead of reading headers.

use std::collections::HashMap;

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use campus_core::campus::{
    first_campus_id, parse_campus_id, resolve_campus_id, CAMPUS_HEADER_NAMES, CAMPUS_QUERY_KEYS,
};
use campus_core::types::DbId;

use super::auth::AuthUser;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Authenticated caller plus the campus the request asked for.
#[derive(Debug, Clone)]
pub struct CampusScope {
    pub user: AuthUser,
    requested: Option<DbId>,
}

impl CampusScope {
    pub fn new(user: AuthUser, requested: Option<DbId>) -> Self {
        Self { user, requested }
    }

    /// Fold in a `campus_id` from the request body. Header and query values
    /// take precedence over it.
    pub fn with_body(mut self, body_campus: Option<DbId>) -> Self {
        if self.requested.is_none() {
            self.requested = body_campus.filter(|id| *id > 0);
        }
        self
    }

    /// The resolved campus, or `None` if nothing could be determined.
    pub fn campus_id(&self) -> Option<DbId> {
        resolve_campus_id(&self.user.role, self.user.campus_id, self.requested)
    }

    /// The resolved campus for a mutation; 400 when none can be determined.
    pub fn require(&self) -> AppResult<DbId> {
        self.campus_id()
            .ok_or_else(|| AppError::BadRequest("campus_id is required".into()))
    }
}

/// Campus id named by a request header or query parameter, if any.
fn requested_campus(parts: &Parts) -> Option<DbId> {
    let from_header = first_campus_id(
        CAMPUS_HEADER_NAMES
            .iter()
            .filter_map(|name| parts.headers.get(*name))
            .filter_map(|value| value.to_str().ok()),
    );
    if from_header.is_some() {
        return from_header;
    }

    let Query(params) = Query::<HashMap<String, String>>::try_from_uri(&parts.uri).ok()?;
    CAMPUS_QUERY_KEYS
        .iter()
        .filter_map(|key| params.get(*key))
        .find_map(|raw| parse_campus_id(raw))
}

impl FromRequestParts<AppState> for CampusScope {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        let requested = requested_campus(parts);
        Ok(CampusScope::new(user, requested))
    }
}
