//! Provider adapters.
//!
//! Each adapter wraps one external geocoding backend and exposes exactly one
//! capability: [`Geocoder`] (address to coordinates) or [`ReverseGeocoder`]
//! (coordinates to addresses). Adapters share a [`ProviderContext`] holding the
//! HTTP client and the raw-response cache.

mod context;
mod geoapify;
mod here;
mod nominatim;

use async_trait::async_trait;

use crate::error_handling::LookupResult;
use crate::models::{Address, Coordinates};

pub use context::ProviderContext;
pub use geoapify::{parse_geoapify_addresses, GeoapifyReverseGeocoder};
pub use here::{parse_here_addresses, HereReverseGeocoder};
pub use nominatim::{
    parse_nominatim_address, parse_nominatim_coordinates, NominatimGeocoder,
    NominatimReverseGeocoder,
};

/// Identity shared by every adapter.
pub trait Provider: Send + Sync {
    /// Registry name, e.g. `NOMINATIM` or `NOMINATIM_REPLICA_1`.
    fn name(&self) -> &str;

    /// Endpoint the adapter calls.
    fn url(&self) -> &str;
}

/// Forward geocoding capability.
#[async_trait]
pub trait Geocoder: Provider {
    /// Resolves a free-form address into candidate coordinates.
    ///
    /// Returns `NoResults` rather than an empty list when nothing matched.
    async fn get_coordinates(&self, address: &str) -> LookupResult<Vec<Coordinates>>;
}

/// Reverse geocoding capability.
#[async_trait]
pub trait ReverseGeocoder: Provider {
    /// Resolves coordinates into candidate addresses.
    ///
    /// Returns `NoResults` rather than an empty list when nothing matched.
    async fn get_addresses(&self, coordinates: &Coordinates) -> LookupResult<Vec<Address>>;
}
