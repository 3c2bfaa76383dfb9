//! Well-known role name constants.
//!
//! Roles are stored as plain text on `users.role`; the CHECK constraint in
//! `20260301000002_create_users.sql` must list the same values.

use crate::error::CoreError;

pub const ROLE_SUPERADMIN: &str = "superadmin";
pub const ROLE_OWNER: &str = "owner";
pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_TEACHER: &str = "teacher";
pub const ROLE_STUDENT: &str = "student";
pub const ROLE_STAFF: &str = "staff";

/// Roles allowed to act on any campus and to override the campus via request.
pub const PRIVILEGED_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_OWNER, ROLE_SUPERADMIN];

/// Every role a user row may carry.
pub const VALID_ROLES: &[&str] = &[
    ROLE_SUPERADMIN,
    ROLE_OWNER,
    ROLE_ADMIN,
    ROLE_TEACHER,
    ROLE_STUDENT,
    ROLE_STAFF,
];

/// Whether `role` may override the campus it is bound to.
pub fn is_privileged(role: &str) -> bool {
    PRIVILEGED_ROLES.contains(&role)
}

/// Whether `role` may run staff-only flows such as issuing QR sessions.
pub fn is_staff(role: &str) -> bool {
    is_privileged(role) || role == ROLE_TEACHER
}

/// Whether `role` may write inventory masters, products, and stock entries.
pub fn is_inventory_manager(role: &str) -> bool {
    is_privileged(role) || role == ROLE_STAFF
}

/// Validate that a role name is one of the accepted values.
pub fn validate_role(role: &str) -> Result<(), CoreError> {
    if VALID_ROLES.contains(&role) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid role '{role}'. Must be one of: {}",
            VALID_ROLES.join(", ")
        )))
    }
}
