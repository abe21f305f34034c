//! Shared plumbing for adapter HTTP calls.

use std::sync::Arc;

use log::debug;
use reqwest::header::USER_AGENT;
use serde_json::Value;

use crate::cache::{raw_response_key, CacheStore, Namespace};
use crate::error_handling::{
    classify_status, classify_transport, GeocodeError, LookupEvent, LookupResult, LookupStats,
};

/// Resources every adapter needs: the HTTP client, the cache, and counters.
#[derive(Clone)]
pub struct ProviderContext {
    client: Arc<reqwest::Client>,
    cache: Arc<CacheStore>,
    stats: Arc<LookupStats>,
}

impl ProviderContext {
    pub fn new(client: Arc<reqwest::Client>, cache: Arc<CacheStore>, stats: Arc<LookupStats>) -> Self {
        Self {
            client,
            cache,
            stats,
        }
    }

    /// Fetches a JSON payload, consulting the raw-response cache first.
    ///
    /// The cache key is derived from `provider` and `params`, so a repeated
    /// request never reaches the network. Successful payloads are cached before
    /// normalization, even if the adapter later finds no usable records in them.
    pub async fn fetch_json(
        &self,
        provider: &str,
        url: &str,
        params: &[(&'static str, String)],
        user_agent: Option<&str>,
    ) -> LookupResult<Value> {
        let key = raw_response_key(provider, params.iter().map(|(k, v)| (*k, v.as_str())));

        if let Some(payload) = self.cache.get_json::<Value>(Namespace::Raw, &key).await {
            debug!("Raw cache hit for {}", provider);
            self.stats.increment_event(LookupEvent::RawCacheHit);
            return Ok(payload);
        }

        let mut request = self.client.get(url).query(params);
        if let Some(agent) = user_agent {
            request = request.header(USER_AGENT, agent);
        }

        let response = request.send().await.map_err(|e| classify_transport(&e))?;
        let status = response.status();
        let body = response.text().await.map_err(|e| classify_transport(&e))?;

        if !status.is_success() {
            return Err(classify_status(status.as_u16(), &body));
        }

        let payload: Value = serde_json::from_str(&body)
            .map_err(|e| GeocodeError::MalformedResponse(e.to_string()))?;

        self.cache.set_json(Namespace::Raw, &key, &payload).await;
        Ok(payload)
    }
}

/// First non-empty value among `keys` in a JSON object, as a string.
///
/// Numbers are rendered as text; empty strings fall through to the next key.
pub(super) fn first_field(object: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match object.get(key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}
