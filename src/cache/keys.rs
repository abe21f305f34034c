//! Cache key derivation.
//!
//! Keys are pure functions of their inputs: the same provider and parameter set,
//! or the same normalized query and platform, always produce the same key in
//! any process.

use std::collections::BTreeMap;

use sha2::{Digest, Sha256};

use crate::config::ANY_PLATFORM;
use crate::models::Coordinates;

fn sha256_hex(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    hex::encode(hasher.finalize())
}

fn normalize_platform(platform: Option<&str>) -> String {
    match platform.map(str::trim).filter(|p| !p.is_empty()) {
        Some(p) => p.to_lowercase(),
        None => ANY_PLATFORM.to_string(),
    }
}

/// Key for a single provider call: `raw:<provider>:<sha256 of sorted params>`.
///
/// Parameters are serialized as a sorted JSON object, so insertion order never
/// affects the key.
pub fn raw_response_key<'a, I>(provider: &str, params: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let canonical: BTreeMap<&str, &str> = params.into_iter().collect();
    // A map of strings always serializes.
    let serialized = serde_json::to_string(&canonical).unwrap_or_default();
    format!("raw:{}:{}", provider, sha256_hex(&serialized))
}

/// Query and platform as a JSON array, so no pair of inputs shares an encoding.
fn encode_query(query: &str, platform: Option<&str>) -> String {
    // An array of strings always serializes.
    serde_json::to_string(&[query, normalize_platform(platform).as_str()]).unwrap_or_default()
}

/// Key for a resolved forward lookup.
pub fn geocode_final_key(address: &str, platform: Option<&str>) -> String {
    let address = address.trim().to_lowercase();
    format!(
        "final:geocode:{}",
        sha256_hex(&encode_query(&address, platform))
    )
}

/// Key for a resolved reverse lookup. Coordinates are fixed to six decimals.
pub fn reverse_final_key(coordinates: &Coordinates, platform: Option<&str>) -> String {
    let point = format!("{:.6},{:.6}", coordinates.latitude(), coordinates.longitude());
    format!(
        "final:revgeo:{}",
        sha256_hex(&encode_query(&point, platform))
    )
}
