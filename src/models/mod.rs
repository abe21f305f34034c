//! Domain records shared by providers, orchestrators, and the endpoint layer.

mod address;
mod coordinates;
mod response;

pub use address::Address;
pub use coordinates::{Coordinates, CoordinatesError};
pub use response::{OperationResponse, ProviderInfo, ProvidersResponse};
