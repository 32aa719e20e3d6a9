//! Free-text location to ISO country resolution.
//!
//! [`CountryResolver`] runs an ordered cascade of strategies over normalized
//! text and always returns a [`ResolvedLocation`]; `"XX"` marks "no confident
//! match".

pub mod address;
pub mod dictionary;
pub mod iso;
pub mod normalize;
pub mod resolver;

pub use address::{country_component, AddressComponent};
pub use dictionary::CountryDictionary;
pub use iso::{CelesLookup, IsoLookup};
pub use normalize::{normalize, normalize_country, normalize_site_url};
pub use resolver::{
    resolve_country, CountryResolver, LocationQuery, MatchStrategy, ResolvedLocation,
};
