//! Score-to-presentation mapping

use serde::{Deserialize, Serialize};
use std::fmt;

/// Presentation tier for a 0-100 match score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreTier {
    Excellent,
    Strong,
    Moderate,
    Weak,
    Poor,
}

impl ScoreTier {
    /// Highest threshold first.
    pub const ALL: [ScoreTier; 5] = [
        ScoreTier::Excellent,
        ScoreTier::Strong,
        ScoreTier::Moderate,
        ScoreTier::Weak,
        ScoreTier::Poor,
    ];

    /// Boundary scores belong to the higher tier (`>=` comparison).
    pub fn from_score(score: u8) -> Self {
        let score = score.min(100);
        if score >= 90 {
            ScoreTier::Excellent
        } else if score >= 75 {
            ScoreTier::Strong
        } else if score >= 60 {
            ScoreTier::Moderate
        } else if score >= 40 {
            ScoreTier::Weak
        } else {
            ScoreTier::Poor
        }
    }

    /// Lowest score that still lands in this tier.
    pub fn threshold(&self) -> u8 {
        match self {
            ScoreTier::Excellent => 90,
            ScoreTier::Strong => 75,
            ScoreTier::Moderate => 60,
            ScoreTier::Weak => 40,
            ScoreTier::Poor => 0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScoreTier::Excellent => "excellent",
            ScoreTier::Strong => "strong",
            ScoreTier::Moderate => "moderate",
            ScoreTier::Weak => "weak",
            ScoreTier::Poor => "poor",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            ScoreTier::Excellent => "green",
            ScoreTier::Strong => "cyan",
            ScoreTier::Moderate => "violet",
            ScoreTier::Weak => "amber",
            ScoreTier::Poor => "red",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            ScoreTier::Excellent => "🌟",
            ScoreTier::Strong => "✅",
            ScoreTier::Moderate => "👍",
            ScoreTier::Weak => "⚠️",
            ScoreTier::Poor => "❌",
        }
    }
}

impl fmt::Display for ScoreTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub fn tier(score: u8) -> ScoreTier {
    ScoreTier::from_score(score)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundaries() {
        assert_eq!(tier(0).label(), "poor");
        assert_eq!(tier(39).label(), "poor");
        assert_eq!(tier(40).label(), "weak");
        assert_eq!(tier(59).label(), "weak");
        assert_eq!(tier(60).label(), "moderate");
        assert_eq!(tier(74).label(), "moderate");
        assert_eq!(tier(75).label(), "strong");
        assert_eq!(tier(89).label(), "strong");
        assert_eq!(tier(90).label(), "excellent");
        assert_eq!(tier(100).label(), "excellent");
    }

    #[test]
    fn test_tiers_partition_range() {
        for score in 0..=100u8 {
            let matching: Vec<_> = ScoreTier::ALL
                .iter()
                .filter(|t| {
                    let upper = ScoreTier::ALL
                        .iter()
                        .filter(|other| other.threshold() > t.threshold())
                        .map(|other| other.threshold())
                        .min()
                        .unwrap_or(101);
                    score >= t.threshold() && score < upper
                })
                .collect();
            assert_eq!(matching.len(), 1, "score {score}");
            assert_eq!(*matching[0], tier(score), "score {score}");
        }
    }

    #[test]
    fn test_out_of_range_treated_as_max() {
        assert_eq!(tier(250), ScoreTier::Excellent);
    }

    #[test]
    fn test_serializes_lowercase() {
        let json = serde_json::to_string(&ScoreTier::Moderate).unwrap();
        assert_eq!(json, "\"moderate\"");
    }
}
