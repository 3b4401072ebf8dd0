pub mod auth;
pub mod credits;
pub mod generation;
pub mod history;
pub mod marketplace;
