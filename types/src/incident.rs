//! Incident classification, location, and confidence banding.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of environmental incident being reported.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncidentType {
    Flood,
    Drought,
    WindDamage,
    Pollution,
    Deforestation,
    Other,
}

impl fmt::Display for IncidentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Flood => "flood",
            Self::Drought => "drought",
            Self::WindDamage => "wind_damage",
            Self::Pollution => "pollution",
            Self::Deforestation => "deforestation",
            Self::Other => "other",
        };
        write!(f, "{s}")
    }
}

/// Geographic coordinates attached to a report.
///
/// Stored verbatim; the engine performs no geospatial computation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
}

/// Display band for an oracle confidence score.
///
/// Advisory only — never part of the quorum arithmetic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfidenceBand {
    High,
    Medium,
    Low,
}

impl ConfidenceBand {
    /// Band thresholds: > 0.7 high, > 0.6 medium, otherwise low.
    pub fn from_score(score: f64) -> Self {
        if score > 0.7 {
            Self::High
        } else if score > 0.6 {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_bands() {
        assert_eq!(ConfidenceBand::from_score(0.95), ConfidenceBand::High);
        assert_eq!(ConfidenceBand::from_score(0.65), ConfidenceBand::Medium);
        assert_eq!(ConfidenceBand::from_score(0.6), ConfidenceBand::Low);
        assert_eq!(ConfidenceBand::from_score(0.1), ConfidenceBand::Low);
    }

    #[test]
    fn test_incident_type_serde_snake_case() {
        let json = serde_json::to_string(&IncidentType::WindDamage).unwrap();
        assert_eq!(json, "\"wind_damage\"");
    }
}
