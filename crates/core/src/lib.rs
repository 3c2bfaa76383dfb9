//! Domain logic shared by the database and HTTP layers.
//!
//! Nothing in this crate performs I/O. Every rule that decides *what* a
//! request may do (which campus it is scoped to, how a ledger row moves stock,
//! whether a QR token can still be redeemed) lives here so it can be unit
//! tested without a database.

pub mod campus;
pub mod error;
pub mod inventory;
pub mod pagination;
pub mod qr_attendance;
pub mod roles;
pub mod types;
