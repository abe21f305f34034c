//! Nominatim (OpenStreetMap) adapters.
//!
//! Both directions send the configured User-Agent, which the public Nominatim
//! usage policy requires. Replicas reuse these types under their own registry
//! name, so their raw-cache keys never collide with the primary instance.

use async_trait::async_trait;
use serde_json::Value;

use super::context::{first_field, ProviderContext};
use super::{Geocoder, Provider, ReverseGeocoder};
use crate::config::{Language, NOMINATIM_RESULT_LIMIT};
use crate::error_handling::{GeocodeError, LookupResult};
use crate::models::{Address, Coordinates};

const NO_COORDINATES: &str = "No coordinates found for the given address.";
const NO_ADDRESS: &str = "No address found for the given coordinates.";

/// Forward geocoding through `/search`.
pub struct NominatimGeocoder {
    name: String,
    url: String,
    user_agent: String,
    context: ProviderContext,
}

impl NominatimGeocoder {
    pub fn new(
        name: impl Into<String>,
        url: impl Into<String>,
        user_agent: impl Into<String>,
        context: ProviderContext,
    ) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            user_agent: user_agent.into(),
            context,
        }
    }
}

impl Provider for NominatimGeocoder {
    fn name(&self) -> &str {
        &self.name
    }

    fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn get_coordinates(&self, address: &str) -> LookupResult<Vec<Coordinates>> {
        let params = [
            ("q", address.to_string()),
            ("format", "json".to_string()),
            ("addressdetails", "1".to_string()),
            ("limit", NOMINATIM_RESULT_LIMIT.to_string()),
        ];
        let payload = self
            .context
            .fetch_json(&self.name, &self.url, &params, Some(&self.user_agent))
            .await?;
        parse_nominatim_coordinates(&payload)
    }
}

/// Reverse geocoding through `/reverse`.
pub struct NominatimReverseGeocoder {
    name: String,
    url: String,
    user_agent: String,
    language: Language,
    context: ProviderContext,
}

impl NominatimReverseGeocoder {
    pub fn new(
        name: impl Into<String>,
        url: impl Into<String>,
        user_agent: impl Into<String>,
        language: Language,
        context: ProviderContext,
    ) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            user_agent: user_agent.into(),
            language,
            context,
        }
    }
}

impl Provider for NominatimReverseGeocoder {
    fn name(&self) -> &str {
        &self.name
    }

    fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ReverseGeocoder for NominatimReverseGeocoder {
    async fn get_addresses(&self, coordinates: &Coordinates) -> LookupResult<Vec<Address>> {
        let params = [
            ("format", "json".to_string()),
            ("lat", coordinates.latitude().to_string()),
            ("lon", coordinates.longitude().to_string()),
            ("accept-language", self.language.code().to_string()),
            ("addressdetails", "1".to_string()),
        ];
        let payload = self
            .context
            .fetch_json(&self.name, &self.url, &params, Some(&self.user_agent))
            .await?;
        parse_nominatim_address(&payload)
    }
}

fn parse_degrees(item: &Value, key: &str) -> LookupResult<f64> {
    match item.get(key) {
        Some(Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .map_err(|e| GeocodeError::MalformedResponse(format!("{key}: {e}"))),
        Some(Value::Number(n)) => n
            .as_f64()
            .ok_or_else(|| GeocodeError::MalformedResponse(format!("{key}: {n}"))),
        _ => Err(GeocodeError::MalformedResponse(format!("missing {key}"))),
    }
}

/// Converts a `/search` payload (a JSON array of places) into coordinates.
pub fn parse_nominatim_coordinates(payload: &Value) -> LookupResult<Vec<Coordinates>> {
    let items = payload
        .as_array()
        .ok_or_else(|| GeocodeError::MalformedResponse("expected a JSON array".to_string()))?;

    let coordinates = items
        .iter()
        .map(|item| {
            let latitude = parse_degrees(item, "lat")?;
            let longitude = parse_degrees(item, "lon")?;
            Coordinates::new(latitude, longitude)
                .map_err(|e| GeocodeError::MalformedResponse(e.to_string()))
        })
        .collect::<LookupResult<Vec<_>>>()?;

    if coordinates.is_empty() {
        return Err(GeocodeError::NoResults(NO_COORDINATES.to_string()));
    }
    Ok(coordinates)
}

/// Converts a `/reverse` payload into a single address.
pub fn parse_nominatim_address(payload: &Value) -> LookupResult<Vec<Address>> {
    let details = match payload.get("address") {
        Some(details) if details.as_object().is_some_and(|o| !o.is_empty()) => details,
        _ => return Err(GeocodeError::NoResults(NO_ADDRESS.to_string())),
    };

    Ok(vec![Address {
        formatted_address: first_field(payload, &["display_name"]).unwrap_or_default(),
        postcode: first_field(details, &["postcode"]),
        country: first_field(details, &["country"]),
        state: first_field(details, &["state", "plot"]),
        district: first_field(details, &["state_district"]),
        settlement: first_field(details, &["city", "village"]),
        suburb: first_field(details, &["suburb", "city_district"]),
        street: first_field(details, &["road"]),
        house: first_field(details, &["house_number"]),
    }])
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_parse_coordinates() {
        let payload = json!([
            {"lat": "52.5170365", "lon": "13.3888599", "display_name": "Berlin"},
            {"lat": "-33.8688", "lon": "151.2093"}
        ]);

        let coords = parse_nominatim_coordinates(&payload).unwrap();
        assert_eq!(coords.len(), 2);
        assert!((coords[0].latitude() - 52.5170365).abs() < 1e-9);
        assert!((coords[1].longitude() - 151.2093).abs() < 1e-9);
    }

    #[test]
    fn test_parse_coordinates_empty_is_no_results() {
        assert_eq!(
            parse_nominatim_coordinates(&json!([])),
            Err(GeocodeError::NoResults(NO_COORDINATES.to_string()))
        );
    }

    #[test]
    fn test_parse_coordinates_malformed() {
        assert!(matches!(
            parse_nominatim_coordinates(&json!({"error": "x"})),
            Err(GeocodeError::MalformedResponse(_))
        ));
        assert!(matches!(
            parse_nominatim_coordinates(&json!([{"lat": "north", "lon": "1"}])),
            Err(GeocodeError::MalformedResponse(_))
        ));
        assert!(matches!(
            parse_nominatim_coordinates(&json!([{"lat": "95", "lon": "1"}])),
            Err(GeocodeError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_parse_address_field_fallbacks() {
        let payload = json!({
            "display_name": "12, High Street, Oakham, Rutland, England, LE15 6AA, United Kingdom",
            "address": {
                "house_number": "12",
                "road": "High Street",
                "village": "Oakham",
                "city_district": "Centre",
                "state_district": "Rutland",
                "plot": "England",
                "postcode": "LE15 6AA",
                "country": "United Kingdom"
            }
        });

        let addresses = parse_nominatim_address(&payload).unwrap();
        assert_eq!(addresses.len(), 1);
        let address = &addresses[0];
        assert!(address.formatted_address.starts_with("12, High Street"));
        assert_eq!(address.settlement.as_deref(), Some("Oakham"));
        assert_eq!(address.suburb.as_deref(), Some("Centre"));
        assert_eq!(address.state.as_deref(), Some("England"));
        assert_eq!(address.district.as_deref(), Some("Rutland"));
        assert_eq!(address.house.as_deref(), Some("12"));
        assert_eq!(address.street.as_deref(), Some("High Street"));
    }

    #[test]
    fn test_parse_address_missing_is_no_results() {
        assert_eq!(
            parse_nominatim_address(&json!({"error": "Unable to geocode"})),
            Err(GeocodeError::NoResults(NO_ADDRESS.to_string()))
        );
    }
}
