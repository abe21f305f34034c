//! Final-cache check, platform selection and failover across a registry.

use std::future::Future;
use std::sync::Arc;

use log::{debug, info, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::registry::ProviderRegistry;
use crate::cache::{geocode_final_key, reverse_final_key, CacheStore, Namespace};
use crate::error_handling::{GeocodeError, LookupEvent, LookupResult, LookupStats};
use crate::models::{Address, Coordinates, OperationResponse, ProviderInfo};
use crate::providers::{Geocoder, Provider, ReverseGeocoder};

/// Resolves queries against an ordered set of adapters.
///
/// A final-cache hit answers without touching any adapter. Otherwise an explicit
/// platform is called alone (its error is returned as is), and without one the
/// adapters are tried sequentially until the first success.
pub struct Orchestrator<P: ?Sized + Provider> {
    registry: ProviderRegistry<P>,
    cache: Arc<CacheStore>,
    stats: Arc<LookupStats>,
}

/// Address to coordinates.
pub type GeocodeManager = Orchestrator<dyn Geocoder>;

/// Coordinates to addresses.
pub type ReverseGeocodeManager = Orchestrator<dyn ReverseGeocoder>;

impl<P: ?Sized + Provider> Orchestrator<P> {
    pub fn new(registry: ProviderRegistry<P>, cache: Arc<CacheStore>, stats: Arc<LookupStats>) -> Self {
        Self {
            registry,
            cache,
            stats,
        }
    }

    /// Configured adapters in priority order.
    pub fn list_providers(&self) -> Vec<ProviderInfo> {
        self.registry
            .iter()
            .map(|(name, provider)| ProviderInfo {
                name: name.to_string(),
                url: provider.url().to_string(),
            })
            .collect()
    }

    fn record_failure(&self, error: &GeocodeError) {
        self.stats.increment_error(error.kind());
    }

    async fn attempt<T, F, Fut>(&self, name: &str, provider: Arc<P>, call: &F) -> LookupResult<Vec<T>>
    where
        F: Fn(Arc<P>) -> Fut,
        Fut: Future<Output = LookupResult<Vec<T>>>,
    {
        self.stats.increment_event(LookupEvent::ProviderAttempt);
        let result = match call(provider).await {
            Ok(records) if records.is_empty() => Err(GeocodeError::NoResults(format!(
                "{} returned no results.",
                name
            ))),
            other => other,
        };
        if let Err(e) = &result {
            self.record_failure(e);
        }
        result
    }

    async fn resolve<T, F, Fut>(&self, key: &str, platform: Option<&str>, call: F) -> LookupResult<Vec<T>>
    where
        T: Serialize + DeserializeOwned,
        F: Fn(Arc<P>) -> Fut,
        Fut: Future<Output = LookupResult<Vec<T>>>,
    {
        self.stats.increment_event(LookupEvent::Search);

        // Unknown platforms fail before the cache is consulted.
        let selected = match platform.map(str::trim).filter(|p| !p.is_empty()) {
            Some(platform) => match self.registry.get(platform) {
                Some(provider) => Some((platform, provider)),
                None => {
                    let error = GeocodeError::UnknownPlatform(platform.to_string());
                    self.record_failure(&error);
                    return Err(error);
                }
            },
            None => None,
        };

        if let Some(cached) = self.cache.get_json::<Vec<T>>(Namespace::Final, key).await {
            debug!("Final cache hit: {}", key);
            self.stats.increment_event(LookupEvent::FinalCacheHit);
            return Ok(cached);
        }

        let records = match selected {
            Some((platform, provider)) => self.attempt(platform, provider, &call).await?,
            None => self.failover(&call).await?,
        };

        self.cache.set_json(Namespace::Final, key, &records).await;
        self.stats.increment_event(LookupEvent::Resolved);
        Ok(records)
    }

    async fn failover<T, F, Fut>(&self, call: &F) -> LookupResult<Vec<T>>
    where
        F: Fn(Arc<P>) -> Fut,
        Fut: Future<Output = LookupResult<Vec<T>>>,
    {
        if self.registry.is_empty() {
            let error = GeocodeError::NoProvidersConfigured;
            self.record_failure(&error);
            return Err(error);
        }

        for (name, provider) in self.registry.iter() {
            match self.attempt(name, Arc::clone(provider), call).await {
                Ok(records) => {
                    info!("{} resolved the lookup ({} result(s))", name, records.len());
                    return Ok(records);
                }
                Err(e) => warn!("{} failed: {}", name, e),
            }
        }

        let error = GeocodeError::AllProvidersFailed;
        self.record_failure(&error);
        Err(error)
    }
}

impl Orchestrator<dyn Geocoder> {
    /// Resolves `address` into coordinates.
    pub async fn search(&self, address: &str, platform: Option<&str>) -> OperationResponse<Coordinates> {
        self.lookup(address, platform).await.into()
    }

    /// Like [`search`](Self::search), keeping the typed error.
    pub async fn lookup(&self, address: &str, platform: Option<&str>) -> LookupResult<Vec<Coordinates>> {
        let key = geocode_final_key(address, platform);
        self.resolve(&key, platform, |provider: Arc<dyn Geocoder>| async move {
            provider.get_coordinates(address).await
        })
        .await
    }
}

impl Orchestrator<dyn ReverseGeocoder> {
    /// Resolves `coordinates` into addresses.
    pub async fn search(&self, coordinates: &Coordinates, platform: Option<&str>) -> OperationResponse<Address> {
        self.lookup(coordinates, platform).await.into()
    }

    /// Like [`search`](Self::search), keeping the typed error.
    pub async fn lookup(&self, coordinates: &Coordinates, platform: Option<&str>) -> LookupResult<Vec<Address>> {
        let key = reverse_final_key(coordinates, platform);
        self.resolve(&key, platform, |provider: Arc<dyn ReverseGeocoder>| async move {
            provider.get_addresses(coordinates).await
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;

    use super::*;
    use crate::cache::MemoryTier;
    use crate::error_handling::ErrorKind;

    struct StubGeocoder {
        name: String,
        outcome: LookupResult<Vec<Coordinates>>,
        calls: AtomicUsize,
    }

    impl StubGeocoder {
        fn new(name: &str, outcome: LookupResult<Vec<Coordinates>>) -> Arc<Self> {
            Arc::new(Self {
                name: name.to_string(),
                outcome,
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl Provider for StubGeocoder {
        fn name(&self) -> &str {
            &self.name
        }

        fn url(&self) -> &str {
            "http://stub.invalid"
        }
    }

    #[async_trait]
    impl Geocoder for StubGeocoder {
        async fn get_coordinates(&self, _address: &str) -> LookupResult<Vec<Coordinates>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.outcome.clone()
        }
    }

    fn point(lat: f64, lon: f64) -> Coordinates {
        Coordinates::new(lat, lon).unwrap()
    }

    fn manager(stubs: &[Arc<StubGeocoder>]) -> (GeocodeManager, Arc<LookupStats>, Arc<CacheStore>) {
        let mut registry: ProviderRegistry<dyn Geocoder> = ProviderRegistry::new();
        for stub in stubs {
            registry.insert(&stub.name, stub.clone());
        }
        let cache = Arc::new(CacheStore::new(
            Arc::new(MemoryTier::new(100, Duration::from_secs(60))),
            Arc::new(MemoryTier::new(100, Duration::from_secs(60))),
        ));
        let stats = Arc::new(LookupStats::new());
        (
            GeocodeManager::new(registry, Arc::clone(&cache), stats.clone()),
            stats,
            cache,
        )
    }

    #[tokio::test]
    async fn test_first_success_wins() {
        let a = StubGeocoder::new("A", Err(GeocodeError::Timeout));
        let b = StubGeocoder::new("B", Ok(vec![point(1.0, 2.0)]));
        let c = StubGeocoder::new("C", Ok(vec![point(3.0, 4.0)]));
        let (manager, stats, _) = manager(&[a.clone(), b.clone(), c.clone()]);

        let result = manager.lookup("main st", None).await.unwrap();

        assert_eq!(result, vec![point(1.0, 2.0)]);
        assert_eq!((a.calls(), b.calls(), c.calls()), (1, 1, 0));
        assert_eq!(stats.get_event_count(LookupEvent::ProviderAttempt), 2);
        assert_eq!(stats.get_error_count(ErrorKind::Timeout), 1);
    }

    #[tokio::test]
    async fn test_cache_hit_makes_no_calls() {
        let a = StubGeocoder::new("A", Ok(vec![point(1.0, 2.0)]));
        let (manager, stats, _) = manager(&[a.clone()]);

        manager.lookup("Main St", None).await.unwrap();
        let second = manager.lookup("  main st ", None).await.unwrap();

        assert_eq!(second, vec![point(1.0, 2.0)]);
        assert_eq!(a.calls(), 1);
        assert_eq!(stats.get_event_count(LookupEvent::FinalCacheHit), 1);
    }

    #[tokio::test]
    async fn test_all_fail() {
        let a = StubGeocoder::new("A", Err(GeocodeError::RateLimited));
        let b = StubGeocoder::new("B", Err(GeocodeError::NoResults("none".into())));
        let (manager, _, _) = manager(&[a.clone(), b.clone()]);

        let response = manager.search("nowhere", None).await;

        assert!(!response.success);
        assert!(response.data.is_none());
        assert_eq!(response.error.as_deref(), Some("All geocoding services failed."));
        assert_eq!((a.calls(), b.calls()), (1, 1));
    }

    #[tokio::test]
    async fn test_failure_is_not_cached() {
        let a = StubGeocoder::new("A", Err(GeocodeError::Timeout));
        let (manager, _, _) = manager(&[a.clone()]);

        assert!(manager.lookup("x", None).await.is_err());
        assert!(manager.lookup("x", None).await.is_err());
        assert_eq!(a.calls(), 2);
    }

    #[tokio::test]
    async fn test_explicit_platform_has_no_failover() {
        let a = StubGeocoder::new("A", Ok(vec![point(1.0, 1.0)]));
        let b = StubGeocoder::new("B", Err(GeocodeError::Timeout));
        let (manager, _, _) = manager(&[a.clone(), b.clone()]);

        let result = manager.lookup("x", Some("b")).await;

        assert_eq!(result, Err(GeocodeError::Timeout));
        assert_eq!((a.calls(), b.calls()), (0, 1));
    }

    #[tokio::test]
    async fn test_explicit_platform_is_cached_separately() {
        let a = StubGeocoder::new("A", Ok(vec![point(1.0, 1.0)]));
        let b = StubGeocoder::new("B", Ok(vec![point(2.0, 2.0)]));
        let (manager, _, _) = manager(&[a.clone(), b.clone()]);

        assert_eq!(manager.lookup("x", None).await.unwrap(), vec![point(1.0, 1.0)]);
        assert_eq!(manager.lookup("x", Some("B")).await.unwrap(), vec![point(2.0, 2.0)]);
        assert_eq!(manager.lookup("x", Some("b")).await.unwrap(), vec![point(2.0, 2.0)]);
        assert_eq!((a.calls(), b.calls()), (1, 1));
    }

    #[tokio::test]
    async fn test_unknown_platform() {
        let a = StubGeocoder::new("A", Ok(vec![point(1.0, 1.0)]));
        let (manager, stats, cache) = manager(&[a.clone()]);

        let result = manager.lookup("x", Some("bing")).await;

        assert_eq!(result, Err(GeocodeError::UnknownPlatform("bing".into())));
        assert_eq!(a.calls(), 0);
        assert_eq!(stats.get_error_count(ErrorKind::UnknownPlatform), 1);
        assert!(cache
            .get(Namespace::Final, &geocode_final_key("x", Some("bing")))
            .await
            .is_none());
    }

    #[tokio::test]
    async fn test_unknown_platform_ignores_cached_answers() {
        let a = StubGeocoder::new("A", Ok(vec![point(1.0, 2.0)]));
        let (manager, _, _) = manager(&[a.clone()]);

        manager.lookup("a|b", None).await.unwrap();
        manager.lookup("a", None).await.unwrap();

        assert_eq!(
            manager.lookup("a", Some("b|any")).await,
            Err(GeocodeError::UnknownPlatform("b|any".into()))
        );
        assert_eq!(
            manager.lookup("a|b", Some("any")).await,
            Err(GeocodeError::UnknownPlatform("any".into()))
        );
        assert_eq!(a.calls(), 2);
    }

    #[tokio::test]
    async fn test_empty_registry() {
        let (manager, _, _) = manager(&[]);
        assert_eq!(
            manager.lookup("x", None).await,
            Err(GeocodeError::NoProvidersConfigured)
        );
    }

    #[tokio::test]
    async fn test_empty_success_counts_as_failure() {
        let a = StubGeocoder::new("A", Ok(vec![]));
        let b = StubGeocoder::new("B", Ok(vec![point(5.0, 5.0)]));
        let (manager, stats, _) = manager(&[a.clone(), b.clone()]);

        assert_eq!(manager.lookup("x", None).await.unwrap(), vec![point(5.0, 5.0)]);
        assert_eq!(stats.get_error_count(ErrorKind::NoResults), 1);
    }

    #[test]
    fn test_list_providers_in_order() {
        let a = StubGeocoder::new("zeta", Ok(vec![]));
        let b = StubGeocoder::new("alpha", Ok(vec![]));
        let (manager, _, _) = manager(&[a, b]);

        let names: Vec<String> = manager.list_providers().into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["ZETA", "ALPHA"]);
    }
}
