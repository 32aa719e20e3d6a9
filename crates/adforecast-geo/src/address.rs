//! Structured address components as returned by place-details geocoding.

use serde::{Deserialize, Serialize};

/// One `address_components[]` entry from a geocoding response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressComponent {
    pub long_name: String,
    pub short_name: String,
    #[serde(default)]
    pub types: Vec<String>,
}

impl AddressComponent {
    #[must_use]
    pub fn has_type(&self, kind: &str) -> bool {
        self.types.iter().any(|t| t == kind)
    }
}

/// Returns the first component tagged `country`, if any.
#[must_use]
pub fn country_component(components: &[AddressComponent]) -> Option<&AddressComponent> {
    components.iter().find(|c| c.has_type("country"))
}

/// Returns the upper-cased short name when it is a well-formed two-letter code.
#[must_use]
pub(crate) fn well_formed_short_code(component: &AddressComponent) -> Option<String> {
    let short = component.short_name.trim();
    (short.len() == 2 && short.bytes().all(|b| b.is_ascii_alphabetic()))
        .then(|| short.to_ascii_uppercase())
}
