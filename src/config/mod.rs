//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (cache expiry, timeouts, provider endpoints)
//! - CLI option types and parsing

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{Config, Language, LogFormat, LogLevel, ProvidersConfig};
