//! Shared infrastructure used by every feature

pub mod models;
pub mod utils;
