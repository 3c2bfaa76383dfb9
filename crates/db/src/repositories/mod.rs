//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Campus-owned tables take the
//! resolved campus id on every call and never touch rows of another campus.
//! Ledger repositories additionally expose connection-level methods so the
//! stock ledger can run them inside one transaction.

pub mod campus_repo;
pub mod inventory_master_repo;
pub mod issue_repo;
pub mod product_repo;
pub mod purchase_repo;
pub mod qr_attendance_repo;
pub mod sale_repo;
pub mod session_repo;
pub mod student_repo;
pub mod teacher_repo;
pub mod user_repo;

pub use campus_repo::CampusRepo;
pub use inventory_master_repo::InventoryMasterRepo;
pub use issue_repo::IssueRepo;
pub use product_repo::ProductRepo;
pub use purchase_repo::PurchaseRepo;
pub use qr_attendance_repo::QrAttendanceRepo;
pub use sale_repo::SaleRepo;
pub use session_repo::SessionRepo;
pub use student_repo::StudentRepo;
pub use teacher_repo::TeacherRepo;
pub use user_repo::UserRepo;
