//! Ordered, case-insensitive provider registry and its construction from config.

use std::sync::Arc;

use log::{info, warn};
use url::Url;

use crate::config::{
    ProvidersConfig, GEOAPIFY_PROVIDER, GEOAPIFY_REVERSE_URL, HERE_PROVIDER, HERE_REVERSE_URL,
    NOMINATIM_PROVIDER, NOMINATIM_REPLICA_PREFIX,
};
use crate::providers::{
    GeoapifyReverseGeocoder, Geocoder, HereReverseGeocoder, NominatimGeocoder,
    NominatimReverseGeocoder, ProviderContext, ReverseGeocoder,
};

/// Named adapters in failover priority order.
///
/// Names are stored upper-case and looked up case-insensitively. An adapter is
/// either present and fully configured, or absent.
pub struct ProviderRegistry<P: ?Sized> {
    entries: Vec<(String, Arc<P>)>,
}

impl<P: ?Sized> ProviderRegistry<P> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Appends an adapter. Re-inserting an existing name replaces it in place,
    /// keeping its original priority.
    pub fn insert(&mut self, name: &str, provider: Arc<P>) {
        let name = name.trim().to_uppercase();
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some(entry) => entry.1 = provider,
            None => self.entries.push((name, provider)),
        }
    }

    /// Case-insensitive lookup.
    pub fn get(&self, name: &str) -> Option<Arc<P>> {
        let name = name.trim().to_uppercase();
        self.entries
            .iter()
            .find(|(existing, _)| *existing == name)
            .map(|(_, provider)| Arc::clone(provider))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<P>)> {
        self.entries
            .iter()
            .map(|(name, provider)| (name.as_str(), provider))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<P: ?Sized> Default for ProviderRegistry<P> {
    fn default() -> Self {
        Self::new()
    }
}

fn valid_url(name: &str, raw: &str) -> Option<String> {
    let raw = raw.trim();
    match Url::parse(raw) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Some(raw.to_string()),
        Ok(url) => {
            warn!("Skipping {}: unsupported URL scheme '{}'", name, url.scheme());
            None
        }
        Err(e) => {
            warn!("Skipping {}: invalid URL '{}': {}", name, raw, e);
            None
        }
    }
}

fn api_key(name: &str, key: Option<&String>) -> Option<String> {
    match key.map(|k| k.trim()) {
        Some(k) if !k.is_empty() => Some(k.to_string()),
        Some(_) => {
            warn!("Skipping {}: API key is blank", name);
            None
        }
        None => {
            info!("{} not configured (no API key)", name);
            None
        }
    }
}

/// The primary Nominatim URL followed by `NOMINATIM_REPLICA_<n>` entries.
fn nominatim_instances(primary: &str, replicas: &[String]) -> Vec<(String, String)> {
    let replicas = replicas
        .iter()
        .map(|r| r.trim())
        .filter(|r| !r.is_empty())
        .enumerate()
        .map(|(i, url)| (format!("{}{}", NOMINATIM_REPLICA_PREFIX, i + 1), url));

    std::iter::once((NOMINATIM_PROVIDER.to_string(), primary))
        .chain(replicas)
        .filter_map(|(name, url)| valid_url(&name, url).map(|url| (name, url)))
        .collect()
}

/// Builds the forward registry: Nominatim, then its replicas.
pub fn build_geocoders(
    config: &ProvidersConfig,
    context: &ProviderContext,
) -> ProviderRegistry<dyn Geocoder> {
    let mut registry: ProviderRegistry<dyn Geocoder> = ProviderRegistry::new();

    for (name, url) in nominatim_instances(
        &config.nominatim_geocoder_url,
        &config.nominatim_geocoder_replicas,
    ) {
        let adapter = NominatimGeocoder::new(
            name.as_str(),
            url,
            config.nominatim_user_agent.as_str(),
            context.clone(),
        );
        registry.insert(&name, Arc::new(adapter));
    }

    info!("Configured {} geocoder(s)", registry.len());
    registry
}

/// Builds the reverse registry: Geoapify and HERE (when keyed), then
/// Nominatim and its replicas.
pub fn build_reversers(
    config: &ProvidersConfig,
    context: &ProviderContext,
) -> ProviderRegistry<dyn ReverseGeocoder> {
    let mut registry: ProviderRegistry<dyn ReverseGeocoder> = ProviderRegistry::new();

    if let Some(key) = api_key(GEOAPIFY_PROVIDER, config.geoapify_api_key.as_ref()) {
        let adapter = GeoapifyReverseGeocoder::new(
            GEOAPIFY_PROVIDER,
            GEOAPIFY_REVERSE_URL,
            key,
            config.language,
            context.clone(),
        );
        registry.insert(GEOAPIFY_PROVIDER, Arc::new(adapter));
    }

    if let Some(key) = api_key(HERE_PROVIDER, config.here_api_key.as_ref()) {
        let adapter = HereReverseGeocoder::new(
            HERE_PROVIDER,
            HERE_REVERSE_URL,
            key,
            config.language,
            context.clone(),
        );
        registry.insert(HERE_PROVIDER, Arc::new(adapter));
    }

    for (name, url) in nominatim_instances(
        &config.nominatim_reverser_url,
        &config.nominatim_reverser_replicas,
    ) {
        let adapter = NominatimReverseGeocoder::new(
            name.as_str(),
            url,
            config.nominatim_user_agent.as_str(),
            config.language,
            context.clone(),
        );
        registry.insert(&name, Arc::new(adapter));
    }

    info!("Configured {} reverse geocoder(s)", registry.len());
    registry
}
