//! Response envelopes exposed to the endpoint layer.

use serde::{Deserialize, Serialize};

use crate::error_handling::LookupResult;

/// Outcome of an orchestrated search.
///
/// Exactly one of `data` (on success) or `error` (on failure) is populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationResponse<T> {
    pub success: bool,
    #[serde(default)]
    pub data: Option<Vec<T>>,
    #[serde(default)]
    pub error: Option<String>,
}

impl<T> OperationResponse<T> {
    pub fn ok(data: Vec<T>) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
        }
    }
}

impl<T> From<LookupResult<Vec<T>>> for OperationResponse<T> {
    fn from(result: LookupResult<Vec<T>>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(e) => Self::failed(e.to_string()),
        }
    }
}

/// A configured provider, as listed by `/geocoders` and `/reversers`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderInfo {
    pub name: String,
    pub url: String,
}

/// Listing of configured providers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvidersResponse {
    pub geocoders: Vec<ProviderInfo>,
}
