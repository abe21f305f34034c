//! Error handling and lookup statistics.
//!
//! This module provides:
//! - The lookup error taxonomy and the `LookupResult` alias
//! - Categorization of provider HTTP failures into that taxonomy
//! - Internal cache, database, and initialization error types
//! - Lookup statistics tracking (errors and events)

mod categorization;
mod stats;
mod types;

// Re-export public API
pub use categorization::{classify_status, classify_transport};
pub use stats::{LookupEvent, LookupStats};
pub use types::{
    CacheError, DatabaseError, ErrorKind, GeocodeError, InitializationError, LookupResult,
};
