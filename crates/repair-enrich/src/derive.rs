//! Derived columns computed from completed rows.

use repair_detect::rules;

/// Yes/No loyalty-tier flag from a points balance.
pub fn loyalty_flag(points: f64, threshold: f64) -> &'static str {
    if points >= threshold { "Yes" } else { "No" }
}

/// Deterministic persona label from age band and loyalty tier.
///
/// A small fixed rule set, so reruns always derive the same label.
pub fn persona(age: Option<i64>, loyal: Option<bool>) -> &'static str {
    let band = age.map(AgeBand::of);
    match (band, loyal) {
        (Some(AgeBand::Young), Some(true)) => "Loyal early adopter",
        (Some(AgeBand::Young), _) => "Price-conscious newcomer",
        (Some(AgeBand::Middle), Some(true)) => "Established repeat buyer",
        (Some(AgeBand::Middle), _) => "Occasional shopper",
        (Some(AgeBand::Senior), Some(true)) => "Long-standing loyalist",
        (Some(AgeBand::Senior), _) => "Traditional infrequent buyer",
        (None, Some(true)) => "Repeat buyer",
        (None, _) => "Occasional shopper",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AgeBand {
    Young,
    Middle,
    Senior,
}

impl AgeBand {
    fn of(age: i64) -> Self {
        match age {
            ..=29 => Self::Young,
            30..=54 => Self::Middle,
            _ => Self::Senior,
        }
    }
}

/// Age usable for derivation: within the plausible range only.
pub fn plausible_age(age: i64) -> Option<i64> {
    (rules::AGE_MIN..=rules::AGE_MAX)
        .contains(&age)
        .then_some(age)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loyalty_flag_uses_threshold_inclusively() {
        assert_eq!(loyalty_flag(500.0, 500.0), "Yes");
        assert_eq!(loyalty_flag(499.9, 500.0), "No");
    }

    #[test]
    fn persona_is_deterministic_over_bands() {
        assert_eq!(persona(Some(22), Some(true)), "Loyal early adopter");
        assert_eq!(persona(Some(40), Some(false)), "Occasional shopper");
        assert_eq!(persona(Some(70), Some(true)), "Long-standing loyalist");
        assert_eq!(persona(None, Some(true)), "Repeat buyer");
        assert_eq!(persona(None, None), "Occasional shopper");
    }
}
