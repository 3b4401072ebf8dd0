//! Domain logic for the Lumen editing studio.
//!
//! Everything in this crate is pure: no database, no network. The API crate
//! wires these functions to Postgres and the generation gateway.

pub mod classifier;
pub mod credits;
pub mod error;
pub mod generation;
pub mod marketplace;
pub mod types;
