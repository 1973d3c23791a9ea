//! Signature Annotation Feature
//!
//! Port for external type annotators plus a `.pyi` stub implementation.

pub mod port;
pub mod stub;

pub use port::{Signature, SignatureAnnotator};
pub use stub::StubAnnotator;
