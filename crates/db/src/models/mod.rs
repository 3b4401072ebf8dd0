//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts

pub mod credits;
pub mod history;
pub mod marketplace;
pub mod session;
pub mod user;
