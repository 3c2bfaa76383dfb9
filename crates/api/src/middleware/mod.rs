//! Request extractors for authentication, authorization, and campus scoping.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated user from a JWT Bearer token.
//! - [`rbac::RequireAdmin`] -- Requires a privileged role (admin, owner, superadmin).
//! - [`rbac::RequireStaff`] -- Requires a privileged role or `teacher`.
//! - [`rbac::RequireAuth`] -- Requires any authenticated user.
//! - [`campus::CampusScope`] -- Resolves the campus a request operates on.

pub mod auth;
pub mod campus;
pub mod rbac;
