pub mod admin;
pub mod auth;
pub mod campuses;
pub mod inventory;
pub mod qr_attendance;
pub mod stock_entries;
pub mod students;
pub mod teachers;
