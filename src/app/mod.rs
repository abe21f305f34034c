//! Process lifecycle helpers used by the server runner.

pub mod shutdown;

// Re-export public API
pub use shutdown::shutdown_on_signal;
