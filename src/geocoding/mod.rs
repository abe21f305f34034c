//! Provider registries and the lookup orchestrators built on them.

mod orchestrator;
mod registry;

pub use orchestrator::{GeocodeManager, Orchestrator, ReverseGeocodeManager};
pub use registry::{build_geocoders, build_reversers, ProviderRegistry};
