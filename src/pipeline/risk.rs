//! Risk tier classification for emission quantities.

use serde::{Deserialize, Serialize};

/// Discrete severity classification of an emission quantity.
///
/// `Unknown` is the fallback for quantity kinds missing from a domain's
/// threshold table, so a newly introduced emission kind never crashes
/// aggregation.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum RiskTier {
    #[serde(rename = "Low Risk")]
    Low,
    #[serde(rename = "Moderate Risk")]
    Moderate,
    #[serde(rename = "High Risk")]
    High,
    #[serde(rename = "Severe Risk")]
    Severe,
    #[serde(rename = "Unknown")]
    Unknown,
}

impl RiskTier {
    pub fn as_str(self) -> &'static str {
        match self {
            RiskTier::Low => "Low Risk",
            RiskTier::Moderate => "Moderate Risk",
            RiskTier::High => "High Risk",
            RiskTier::Severe => "Severe Risk",
            RiskTier::Unknown => "Unknown",
        }
    }
}

/// Classifies an emission value against its kind's `[t1, t2, t3]` ladder.
///
/// A boundary value promotes to the higher tier:
///
/// | Range           | Tier     |
/// |-----------------|----------|
/// | value < t1      | Low      |
/// | t1 <= value < t2 | Moderate |
/// | t2 <= value < t3 | High     |
/// | value >= t3     | Severe   |
pub fn classify(value: f64, kind: &str, thresholds: &[(&str, [f64; 3])]) -> RiskTier {
    let Some((_, [t1, t2, t3])) = thresholds.iter().find(|(k, _)| *k == kind) else {
        return RiskTier::Unknown;
    };
    match value {
        v if v >= *t3 => RiskTier::Severe,
        v if v >= *t2 => RiskTier::High,
        v if v >= *t1 => RiskTier::Moderate,
        _ => RiskTier::Low,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::Domain;

    #[test]
    fn test_classify_boundaries_every_domain_kind() {
        for domain in Domain::ALL {
            let spec = domain.spec();
            for &(kind, [t1, t2, t3]) in spec.thresholds {
                let at = |v: f64| classify(v, kind, spec.thresholds);
                assert_eq!(at(t1 - 0.001), RiskTier::Low, "{domain}/{kind}");
                assert_eq!(at(t1), RiskTier::Moderate, "{domain}/{kind}");
                assert_eq!(at(t2 - 0.001), RiskTier::Moderate, "{domain}/{kind}");
                assert_eq!(at(t2), RiskTier::High, "{domain}/{kind}");
                assert_eq!(at(t3 - 0.001), RiskTier::High, "{domain}/{kind}");
                assert_eq!(at(t3), RiskTier::Severe, "{domain}/{kind}");
            }
        }
    }

    #[test]
    fn test_classify_unknown_kind_is_unknown_not_an_error() {
        let spec = Domain::Fuel.spec();
        assert_eq!(
            classify(123.0, "Black Carbon (kg)", spec.thresholds),
            RiskTier::Unknown
        );
    }

    #[test]
    fn test_transport_scenario_truck_is_low() {
        let spec = Domain::Transport.spec();
        assert_eq!(classify(450.0, "CO2 (kg)", spec.thresholds), RiskTier::Low);
    }

    #[test]
    fn test_explosives_scenario_co_1050_is_severe() {
        let spec = Domain::Explosives.spec();
        assert_eq!(classify(1050.0, "CO", spec.thresholds), RiskTier::Severe);
    }

    #[test]
    fn test_tier_labels() {
        assert_eq!(RiskTier::Low.as_str(), "Low Risk");
        assert_eq!(RiskTier::Severe.as_str(), "Severe Risk");
        assert_eq!(RiskTier::Unknown.as_str(), "Unknown");
    }
}
