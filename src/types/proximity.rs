use std::fmt;

use serde::{Deserialize, Serialize};

/// Categorical ocean-proximity label attached to every region.
///
/// The dataset carries exactly these five spellings; anything else is an
/// ingestion error, not a variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OceanProximity {
    #[serde(rename = "<1H OCEAN")]
    WithinHourOfOcean,
    #[serde(rename = "INLAND")]
    Inland,
    #[serde(rename = "ISLAND")]
    Island,
    #[serde(rename = "NEAR BAY")]
    NearBay,
    #[serde(rename = "NEAR OCEAN")]
    NearOcean,
}

impl OceanProximity {
    pub fn as_str(&self) -> &'static str {
        match self {
            OceanProximity::WithinHourOfOcean => "<1H OCEAN",
            OceanProximity::Inland => "INLAND",
            OceanProximity::Island => "ISLAND",
            OceanProximity::NearBay => "NEAR BAY",
            OceanProximity::NearOcean => "NEAR OCEAN",
        }
    }

    /// Parse a dataset label, `None` for anything unrecognized.
    pub fn parse(label: &str) -> Option<Self> {
        match label {
            "<1H OCEAN" => Some(OceanProximity::WithinHourOfOcean),
            "INLAND" => Some(OceanProximity::Inland),
            "ISLAND" => Some(OceanProximity::Island),
            "NEAR BAY" => Some(OceanProximity::NearBay),
            "NEAR OCEAN" => Some(OceanProximity::NearOcean),
            _ => None,
        }
    }

    pub fn all() -> [OceanProximity; 5] {
        [
            OceanProximity::WithinHourOfOcean,
            OceanProximity::Inland,
            OceanProximity::Island,
            OceanProximity::NearBay,
            OceanProximity::NearOcean,
        ]
    }
}

impl fmt::Display for OceanProximity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::OceanProximity;

    #[test]
    fn labels_round_trip() {
        for proximity in OceanProximity::all() {
            assert_eq!(OceanProximity::parse(proximity.as_str()), Some(proximity));
        }
    }

    #[test]
    fn unknown_label_rejected() {
        assert_eq!(OceanProximity::parse("OFFSHORE"), None);
        assert_eq!(OceanProximity::parse("inland"), None);
    }
}
