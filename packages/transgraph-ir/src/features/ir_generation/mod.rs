//! IR Generation Feature
//!
//! Per-definition records for the downstream generator.

pub mod assembler;
pub mod record;

pub use assembler::{dependency_context, write_ir_json, IrAssembler};
pub use record::{IrDetail, IrRecord};
