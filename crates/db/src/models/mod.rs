//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches
//!
//! Create DTOs for campus-owned rows carry an optional `campus_id`. It is only
//! a request hint; repositories take the resolved campus as a separate argument.

pub mod campus;
pub mod inventory_master;
pub mod issue;
pub mod product;
pub mod purchase;
pub mod qr_attendance;
pub mod sale;
pub mod session;
pub mod student;
pub mod teacher;
pub mod user;
