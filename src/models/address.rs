//! Normalized postal address and template formatting.

use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_ADDRESS_TEMPLATE;

/// A provider-independent address.
///
/// `formatted_address` is whatever label the provider returned (possibly empty);
/// every component is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    #[serde(default)]
    pub formatted_address: String,
    pub postcode: Option<String>,
    pub country: Option<String>,
    pub state: Option<String>,
    pub district: Option<String>,
    pub settlement: Option<String>,
    pub suburb: Option<String>,
    pub street: Option<String>,
    pub house: Option<String>,
}

impl Address {
    /// Formats the address with `template`, substituting placeholders:
    ///
    /// | placeholder | component |
    /// |---|---|
    /// | `%p` | postcode |
    /// | `%c` | country |
    /// | `%s` | state |
    /// | `%d` | district |
    /// | `%t` | settlement |
    /// | `%u` | suburb |
    /// | `%r` | street |
    /// | `%h` | house |
    ///
    /// Absent components become empty strings; the result is then split on
    /// commas, each segment trimmed, and empty segments dropped, so missing
    /// components never leave dangling separators. Unknown placeholders are
    /// kept verbatim.
    pub fn format_address(&self, template: &str) -> String {
        let mut substituted = String::with_capacity(template.len() + 32);
        let mut chars = template.chars().peekable();

        while let Some(c) = chars.next() {
            if c != '%' {
                substituted.push(c);
                continue;
            }
            let component = chars.peek().and_then(|&next| self.component(next));
            match component {
                Some(value) => {
                    chars.next();
                    substituted.push_str(value.unwrap_or(""));
                }
                None => substituted.push(c),
            }
        }

        substituted
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Like [`format_address`](Self::format_address), but returns an empty
    /// string when every component is absent, even if `formatted_address` was
    /// populated. An empty result means "no usable address".
    pub fn format_address_robust(&self, template: &str) -> String {
        if !self.has_components() {
            return String::new();
        }
        self.format_address(template)
    }

    /// Whether at least one optional component is present.
    pub fn has_components(&self) -> bool {
        [
            &self.postcode,
            &self.country,
            &self.state,
            &self.district,
            &self.settlement,
            &self.suburb,
            &self.street,
            &self.house,
        ]
        .iter()
        .any(|field| field.is_some())
    }

    /// Resolves a placeholder letter. `None` means "not a placeholder";
    /// `Some(None)` means a known placeholder whose component is absent.
    fn component(&self, placeholder: char) -> Option<Option<&str>> {
        let field = match placeholder {
            'p' => &self.postcode,
            'c' => &self.country,
            's' => &self.state,
            'd' => &self.district,
            't' => &self.settlement,
            'u' => &self.suburb,
            'r' => &self.street,
            'h' => &self.house,
            _ => return None,
        };
        Some(field.as_deref())
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.format_address_robust(DEFAULT_ADDRESS_TEMPLATE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn springfield() -> Address {
        Address {
            street: Some("Main St".into()),
            house: Some("5".into()),
            settlement: Some("Springfield".into()),
            state: Some("IL".into()),
            country: Some("US".into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_default_template() {
        assert_eq!(
            springfield().format_address(DEFAULT_ADDRESS_TEMPLATE),
            "5 Main St, Springfield, IL, US"
        );
    }

    #[test]
    fn test_missing_components_collapse() {
        let address = Address {
            street: Some("Main St".into()),
            country: Some("US".into()),
            ..Default::default()
        };
        assert_eq!(address.format_address(DEFAULT_ADDRESS_TEMPLATE), "Main St, US");
    }

    #[test]
    fn test_custom_template() {
        let mut address = springfield();
        address.postcode = Some("62701".into());
        assert_eq!(address.format_address("%t %p, %c"), "Springfield 62701, US");
    }

    #[test]
    fn test_unknown_placeholder_kept() {
        assert_eq!(springfield().format_address("%x %c, 100%"), "%x US, 100%");
    }

    #[test]
    fn test_values_are_not_reexpanded() {
        let address = Address {
            street: Some("%c Road".into()),
            country: Some("US".into()),
            ..Default::default()
        };
        assert_eq!(address.format_address("%r, %c"), "%c Road, US");
    }

    #[test]
    fn test_robust_all_absent_is_empty() {
        let address = Address {
            formatted_address: "Somewhere".into(),
            ..Default::default()
        };
        assert_eq!(address.format_address_robust(DEFAULT_ADDRESS_TEMPLATE), "");
        assert_eq!(address.to_string(), "");
    }

    #[test]
    fn test_robust_with_components() {
        assert_eq!(
            springfield().format_address_robust(DEFAULT_ADDRESS_TEMPLATE),
            "5 Main St, Springfield, IL, US"
        );
        assert_eq!(springfield().to_string(), "5 Main St, Springfield, IL, US");
    }

    #[test]
    fn test_deserialize_without_formatted_address() {
        let address: Address = serde_json::from_str(r#"{"country": "ES"}"#).unwrap();
        assert_eq!(address.formatted_address, "");
        assert_eq!(address.country.as_deref(), Some("ES"));
        assert!(address.has_components());
    }
}
