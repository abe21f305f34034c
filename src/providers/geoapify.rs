//! Geoapify reverse geocoding adapter.

use async_trait::async_trait;
use serde_json::Value;

use super::context::{first_field, ProviderContext};
use super::{Provider, ReverseGeocoder};
use crate::config::Language;
use crate::error_handling::{GeocodeError, LookupResult};
use crate::models::{Address, Coordinates};

const NO_ADDRESS: &str = "No address found for the given coordinates.";

pub struct GeoapifyReverseGeocoder {
    name: String,
    url: String,
    api_key: String,
    language: Language,
    context: ProviderContext,
}

impl GeoapifyReverseGeocoder {
    pub fn new(
        name: impl Into<String>,
        url: impl Into<String>,
        api_key: impl Into<String>,
        language: Language,
        context: ProviderContext,
    ) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            api_key: api_key.into(),
            language,
            context,
        }
    }
}

impl Provider for GeoapifyReverseGeocoder {
    fn name(&self) -> &str {
        &self.name
    }

    fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ReverseGeocoder for GeoapifyReverseGeocoder {
    async fn get_addresses(&self, coordinates: &Coordinates) -> LookupResult<Vec<Address>> {
        let params = [
            ("lat", coordinates.latitude().to_string()),
            ("lon", coordinates.longitude().to_string()),
            ("apiKey", self.api_key.clone()),
            // building-level results carry house numbers
            ("type", "building".to_string()),
            ("lang", self.language.code().to_string()),
        ];
        let payload = self
            .context
            .fetch_json(&self.name, &self.url, &params, None)
            .await?;
        parse_geoapify_addresses(&payload)
    }
}

/// Converts a GeoJSON `FeatureCollection` into addresses.
pub fn parse_geoapify_addresses(payload: &Value) -> LookupResult<Vec<Address>> {
    let features = match payload.get("features") {
        None | Some(Value::Null) => &[][..],
        Some(Value::Array(features)) => features.as_slice(),
        Some(_) => {
            return Err(GeocodeError::MalformedResponse(
                "features is not an array".to_string(),
            ))
        }
    };
    if features.is_empty() {
        return Err(GeocodeError::NoResults(NO_ADDRESS.to_string()));
    }

    let empty = Value::Object(Default::default());
    Ok(features
        .iter()
        .map(|feature| {
            let props = feature.get("properties").unwrap_or(&empty);
            Address {
                formatted_address: first_field(props, &["formatted"]).unwrap_or_default(),
                postcode: first_field(props, &["postcode"]),
                country: first_field(props, &["country"]),
                state: first_field(props, &["state"]),
                district: first_field(props, &["district"]),
                settlement: first_field(props, &["city", "town"]),
                suburb: first_field(props, &["suburb"]),
                street: first_field(props, &["street"]),
                house: first_field(props, &["name", "housenumber"]),
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_parse_features() {
        let payload = json!({
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "properties": {
                    "formatted": "Calle Mayor 5, 28013 Madrid, Spain",
                    "postcode": "28013",
                    "country": "Spain",
                    "state": "Community of Madrid",
                    "town": "Madrid",
                    "street": "Calle Mayor",
                    "housenumber": "5"
                }
            }]
        });

        let addresses = parse_geoapify_addresses(&payload).unwrap();
        assert_eq!(addresses.len(), 1);
        assert_eq!(addresses[0].settlement.as_deref(), Some("Madrid"));
        assert_eq!(addresses[0].house.as_deref(), Some("5"));
        assert_eq!(addresses[0].district, None);
    }

    #[test]
    fn test_name_takes_precedence_over_housenumber() {
        let payload = json!({"features": [{"properties": {"name": "Casa Batlló", "housenumber": "43"}}]});
        let addresses = parse_geoapify_addresses(&payload).unwrap();
        assert_eq!(addresses[0].house.as_deref(), Some("Casa Batlló"));
        assert_eq!(addresses[0].formatted_address, "");
    }

    #[test]
    fn test_empty_features_is_no_results() {
        assert!(matches!(
            parse_geoapify_addresses(&json!({"features": []})),
            Err(GeocodeError::NoResults(_))
        ));
        assert!(matches!(
            parse_geoapify_addresses(&json!({})),
            Err(GeocodeError::NoResults(_))
        ));
    }

    #[test]
    fn test_non_array_features_is_malformed() {
        assert!(matches!(
            parse_geoapify_addresses(&json!({"features": "oops"})),
            Err(GeocodeError::MalformedResponse(_))
        ));
    }
}
