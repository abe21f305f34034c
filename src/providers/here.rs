//! HERE reverse geocoding adapter.

use async_trait::async_trait;
use serde_json::Value;

use super::context::{first_field, ProviderContext};
use super::{Provider, ReverseGeocoder};
use crate::config::Language;
use crate::error_handling::{GeocodeError, LookupResult};
use crate::models::{Address, Coordinates};

const NO_ADDRESS: &str = "No address found for the given coordinates.";

pub struct HereReverseGeocoder {
    name: String,
    url: String,
    api_key: String,
    language: Language,
    context: ProviderContext,
}

impl HereReverseGeocoder {
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

impl Provider for HereReverseGeocoder {
    fn name(&self) -> &str {
        &self.name
    }

    fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ReverseGeocoder for HereReverseGeocoder {
    async fn get_addresses(&self, coordinates: &Coordinates) -> LookupResult<Vec<Address>> {
        let params = [
            (
                "at",
                format!("{},{}", coordinates.latitude(), coordinates.longitude()),
            ),
            ("apiKey", self.api_key.clone()),
            ("lang", self.language.locale().to_string()),
        ];
        let payload = self
            .context
            .fetch_json(&self.name, &self.url, &params, None)
            .await?;
        parse_here_addresses(&payload)
    }
}

/// Converts a `/revgeocode` payload into addresses.
pub fn parse_here_addresses(payload: &Value) -> LookupResult<Vec<Address>> {
    let items = match payload.get("items") {
        None | Some(Value::Null) => &[][..],
        Some(Value::Array(items)) => items.as_slice(),
        Some(_) => {
            return Err(GeocodeError::MalformedResponse(
                "items is not an array".to_string(),
            ))
        }
    };
    if items.is_empty() {
        return Err(GeocodeError::NoResults(NO_ADDRESS.to_string()));
    }

    let empty = Value::Object(Default::default());
    Ok(items
        .iter()
        .map(|item| {
            let details = item.get("address").unwrap_or(&empty);
            Address {
                formatted_address: first_field(details, &["label"]).unwrap_or_default(),
                postcode: first_field(details, &["postalCode"]),
                country: first_field(details, &["countryCode"]),
                state: first_field(details, &["state"]),
                district: first_field(details, &["district"]),
                settlement: first_field(details, &["city"]),
                suburb: first_field(details, &["subdistrict"]),
                street: first_field(details, &["street"]),
                house: first_field(details, &["houseNumber"]),
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_parse_items() {
        let payload = json!({
            "items": [{
                "title": "Invalidenstraße 116, 10115 Berlin, Deutschland",
                "address": {
                    "label": "Invalidenstraße 116, 10115 Berlin, Deutschland",
                    "countryCode": "DEU",
                    "state": "Berlin",
                    "city": "Berlin",
                    "district": "Mitte",
                    "street": "Invalidenstraße",
                    "postalCode": "10115",
                    "houseNumber": "116"
                }
            }]
        });

        let addresses = parse_here_addresses(&payload).unwrap();
        assert_eq!(addresses.len(), 1);
        let address = &addresses[0];
        assert_eq!(address.country.as_deref(), Some("DEU"));
        assert_eq!(address.postcode.as_deref(), Some("10115"));
        assert_eq!(address.house.as_deref(), Some("116"));
        assert_eq!(address.suburb, None);
        assert_eq!(
            address.format_address("%h %r, %p %t"),
            "116 Invalidenstraße, 10115 Berlin"
        );
    }

    #[test]
    fn test_empty_items_is_no_results() {
        assert_eq!(
            parse_here_addresses(&json!({"items": []})),
            Err(GeocodeError::NoResults(NO_ADDRESS.to_string()))
        );
    }
}
