//! Per-country base CPC rates in USD.

/// Rate used for any country code not in [`COUNTRY_BASE_CPC`], including `"XX"`.
pub const DEFAULT_BASE_CPC: f64 = 1.5;

/// Base search CPC by ISO 3166-1 alpha-2 code.
pub(crate) const COUNTRY_BASE_CPC: &[(&str, f64)] = &[
    // GCC
    ("SA", 2.8),
    ("AE", 3.2),
    ("KW", 2.6),
    ("QA", 2.7),
    ("BH", 2.2),
    ("OM", 2.0),
    // Wider MENA
    ("JO", 1.0),
    ("EG", 0.6),
    ("LB", 0.9),
    ("IQ", 0.8),
    ("MA", 0.7),
    ("DZ", 0.5),
    ("TN", 0.6),
    ("LY", 0.7),
    ("TR", 0.8),
    // North America
    ("US", 2.69),
    ("CA", 2.1),
    // Europe
    ("GB", 2.0),
    ("DE", 1.9),
    ("FR", 1.7),
    ("NL", 1.8),
    ("CH", 2.4),
    ("SE", 1.6),
    ("IT", 1.3),
    ("ES", 1.2),
    // Asia-Pacific
    ("AU", 2.2),
    ("JP", 1.4),
    ("KR", 1.1),
    ("IN", 0.5),
    ("PK", 0.4),
    ("ID", 0.45),
    ("MY", 0.7),
    // Other
    ("BR", 0.8),
    ("MX", 0.9),
    ("ZA", 1.0),
    ("NG", 0.4),
];

/// Base CPC for a country code, case-insensitive.
#[must_use]
pub fn base_cpc_for(country_code: &str) -> f64 {
    COUNTRY_BASE_CPC
        .iter()
        .find(|(code, _)| code.eq_ignore_ascii_case(country_code))
        .map_or(DEFAULT_BASE_CPC, |&(_, rate)| rate)
}
