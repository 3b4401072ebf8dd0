//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod credit_repo;
pub mod history_repo;
pub mod marketplace_repo;
pub mod session_repo;
pub mod user_repo;

pub use credit_repo::CreditRepo;
pub use history_repo::HistoryRepo;
pub use marketplace_repo::MarketplaceRepo;
pub use session_repo::SessionRepo;
pub use user_repo::UserRepo;
