//! Grammar-specific node kinds

pub mod python;
