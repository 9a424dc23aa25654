use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordinal skill tier derived from a 0-9 correct-answer count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Low,
    Mid,
    High,
}

impl Tier {
    /// Classify a correct-answer count using the fixed product thresholds:
    /// 7-9 is `High`, 4-6 is `Mid`, everything else is `Low`.
    ///
    /// Total over all integers; counts outside the 0-9 scale fall through to
    /// `Low` rather than being rejected.
    #[must_use]
    pub fn from_correct_count(correct: i32) -> Self {
        match correct {
            7..=9 => Tier::High,
            4..=6 => Tier::Mid,
            _ => Tier::Low,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Low => "low",
            Tier::Mid => "mid",
            Tier::High => "high",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_match_product_rule() {
        assert_eq!(Tier::from_correct_count(9), Tier::High);
        assert_eq!(Tier::from_correct_count(7), Tier::High);
        assert_eq!(Tier::from_correct_count(6), Tier::Mid);
        assert_eq!(Tier::from_correct_count(4), Tier::Mid);
        assert_eq!(Tier::from_correct_count(3), Tier::Low);
        assert_eq!(Tier::from_correct_count(0), Tier::Low);
    }

    #[test]
    fn out_of_scale_counts_fall_to_low() {
        assert_eq!(Tier::from_correct_count(-1), Tier::Low);
        assert_eq!(Tier::from_correct_count(10), Tier::Low);
        assert_eq!(Tier::from_correct_count(15), Tier::Low);
        assert_eq!(Tier::from_correct_count(i32::MIN), Tier::Low);
    }

    #[test]
    fn tiers_are_ordered() {
        assert!(Tier::Low < Tier::Mid);
        assert!(Tier::Mid < Tier::High);
    }
}
