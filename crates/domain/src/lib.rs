//! Domain layer - Pure business logic with no external dependencies
//!
//! This crate contains:
//! - Entities (Tag)
//! - Data-source contracts (traits implemented in the infrastructure layer)
//! - The data-layer error taxonomy
//!
//! Principles:
//! - No dependencies on infrastructure
//! - Business rules enforced at domain level
//! - Testable in isolation

pub mod connectivity;
pub mod error;
pub mod tag;

// Re-export commonly used types
pub use connectivity::ConnectivityProbe;
pub use error::DataError;
pub use tag::{FALLBACK_COLOR, Tag, TagStore};
