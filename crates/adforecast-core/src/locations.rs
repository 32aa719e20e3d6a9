use serde::{Deserialize, Serialize};

/// Country code used when no confident country match exists.
pub const UNKNOWN_COUNTRY: &str = "XX";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationType {
    Country,
    City,
    Region,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// A location the advertiser has chosen to target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectedLocation {
    /// Place id from the autocomplete provider.
    pub id: String,
    pub name: String,
    pub secondary_text: Option<String>,
    /// ISO 3166-1 alpha-2 code, or [`UNKNOWN_COUNTRY`].
    pub country_code: String,
    /// Targeting radius. Always `None` for country-type locations.
    pub radius_km: Option<f64>,
    pub location_type: LocationType,
    pub coordinates: Option<Coordinates>,
}

impl SelectedLocation {
    /// Builds a country-level location; the radius is left unset.
    #[must_use]
    pub fn country(id: &str, name: &str, country_code: &str) -> Self {
        Self {
            id: id.to_owned(),
            name: name.to_owned(),
            secondary_text: None,
            country_code: country_code.to_ascii_uppercase(),
            radius_km: None,
            location_type: LocationType::Country,
            coordinates: None,
        }
    }

    #[must_use]
    pub fn has_known_country(&self) -> bool {
        self.country_code != UNKNOWN_COUNTRY
    }
}

/// The ordered list of targeted locations for one wizard session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocationSelection {
    locations: Vec<SelectedLocation>,
}

impl LocationSelection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a location. Returns `false` if a location with the same id is
    /// already selected.
    ///
    /// A radius supplied on a country-type location is discarded.
    pub fn add(&mut self, mut location: SelectedLocation) -> bool {
        if self.locations.iter().any(|l| l.id == location.id) {
            return false;
        }
        if location.location_type == LocationType::Country {
            location.radius_km = None;
        }
        self.locations.push(location);
        true
    }

    /// Updates the targeting radius of a city or region.
    ///
    /// Returns `false` when the id is unknown, the location is a country, or
    /// the radius is not a positive finite number.
    pub fn update_radius(&mut self, id: &str, radius_km: f64) -> bool {
        if !radius_km.is_finite() || radius_km <= 0.0 {
            return false;
        }
        match self.locations.iter_mut().find(|l| l.id == id) {
            Some(loc) if loc.location_type != LocationType::Country => {
                loc.radius_km = Some(radius_km);
                true
            }
            _ => false,
        }
    }

    /// Removes a location by id, returning it if present.
    pub fn remove(&mut self, id: &str) -> Option<SelectedLocation> {
        let idx = self.locations.iter().position(|l| l.id == id)?;
        Some(self.locations.remove(idx))
    }

    pub fn clear(&mut self) {
        self.locations.clear();
    }

    #[must_use]
    pub fn as_slice(&self) -> &[SelectedLocation] {
        &self.locations
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// Distinct country codes in selection order.
    #[must_use]
    pub fn country_codes(&self) -> Vec<String> {
        let mut codes: Vec<String> = Vec::new();
        for loc in &self.locations {
            if !codes.contains(&loc.country_code) {
                codes.push(loc.country_code.clone());
            }
        }
        codes
    }
}

impl From<Vec<SelectedLocation>> for LocationSelection {
    fn from(locations: Vec<SelectedLocation>) -> Self {
        let mut selection = Self::new();
        for loc in locations {
            selection.add(loc);
        }
        selection
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn city(id: &str, code: &str) -> SelectedLocation {
        SelectedLocation {
            id: id.to_owned(),
            name: format!("City {id}"),
            secondary_text: None,
            country_code: code.to_owned(),
            radius_km: Some(10.0),
            location_type: LocationType::City,
            coordinates: Some(Coordinates {
                lat: 24.7136,
                lng: 46.6753,
            }),
        }
    }

    #[test]
    fn add_ignores_duplicate_ids() {
        let mut sel = LocationSelection::new();
        assert!(sel.add(city("riyadh", "SA")));
        assert!(!sel.add(city("riyadh", "SA")));
        assert_eq!(sel.len(), 1);
    }

    #[test]
    fn country_locations_never_carry_a_radius() {
        let mut sel = LocationSelection::new();
        let mut loc = SelectedLocation::country("sa", "Saudi Arabia", "sa");
        loc.radius_km = Some(25.0);
        sel.add(loc);
        assert_eq!(sel.as_slice()[0].radius_km, None);
        assert_eq!(sel.as_slice()[0].country_code, "SA");
        assert!(!sel.update_radius("sa", 40.0));
    }

    #[test]
    fn update_radius_applies_to_cities() {
        let mut sel = LocationSelection::new();
        sel.add(city("jeddah", "SA"));
        assert!(sel.update_radius("jeddah", 30.0));
        assert_eq!(sel.as_slice()[0].radius_km, Some(30.0));
        assert!(!sel.update_radius("jeddah", 0.0));
        assert!(!sel.update_radius("missing", 5.0));
    }

    #[test]
    fn remove_and_clear() {
        let mut sel = LocationSelection::from(vec![city("a", "SA"), city("b", "AE")]);
        assert_eq!(sel.remove("a").map(|l| l.id), Some("a".to_owned()));
        assert!(sel.remove("a").is_none());
        sel.clear();
        assert!(sel.is_empty());
    }

    #[test]
    fn country_codes_are_distinct_in_selection_order() {
        let sel =
            LocationSelection::from(vec![city("a", "AE"), city("b", "SA"), city("c", "AE")]);
        assert_eq!(sel.country_codes(), vec!["AE".to_owned(), "SA".to_owned()]);
    }

    #[test]
    fn serializes_as_plain_array() {
        let sel = LocationSelection::from(vec![SelectedLocation::country("eg", "Egypt", "EG")]);
        let json = serde_json::to_value(&sel).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["location_type"], "country");
    }
}
