use serde::{Deserialize, Serialize};

/// Google Ads campaign type as chosen in the wizard.
///
/// Serialized in upper case (`"SEARCH"`, `"DISPLAY"`, ...) to match the
/// campaign backend's request bodies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CampaignType {
    #[default]
    Search,
    Display,
    Video,
    Shopping,
}

impl CampaignType {
    /// Parse a campaign type label, case-insensitively.
    ///
    /// Unknown labels map to [`CampaignType::Search`].
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_uppercase().as_str() {
            "DISPLAY" => Self::Display,
            "VIDEO" => Self::Video,
            "SHOPPING" => Self::Shopping,
            _ => Self::Search,
        }
    }

    /// CPC multiplier applied on top of the location and industry base.
    #[must_use]
    pub fn cpc_multiplier(self) -> f64 {
        match self {
            Self::Search => 1.0,
            Self::Display => 0.65,
            Self::Video => 0.55,
            Self::Shopping => 1.25,
        }
    }

    /// Expected click-through rate as a fraction.
    #[must_use]
    pub fn ctr(self) -> f64 {
        match self {
            Self::Search => 0.04,
            Self::Display => 0.006,
            Self::Video => 0.015,
            Self::Shopping => 0.06,
        }
    }

    /// Expected click-to-conversion rate as a fraction.
    #[must_use]
    pub fn conversion_rate(self) -> f64 {
        match self {
            Self::Search => 0.03,
            Self::Display => 0.015,
            Self::Video => 0.02,
            Self::Shopping => 0.04,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Search => "SEARCH",
            Self::Display => "DISPLAY",
            Self::Video => "VIDEO",
            Self::Shopping => "SHOPPING",
        }
    }
}

impl std::fmt::Display for CampaignType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
