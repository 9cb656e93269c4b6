use crate::core::types::RiskLevel;

pub const SUSPICIOUS_FLOOR: u32 = 21;
pub const DANGEROUS_FLOOR: u32 = 51;

/// Map a final score onto its tier. The only state transition in a scan.
pub fn classify(score: u32) -> RiskLevel {
    if score >= DANGEROUS_FLOOR {
        RiskLevel::Dangerous
    } else if score >= SUSPICIOUS_FLOOR {
        RiskLevel::Suspicious
    } else {
        RiskLevel::Safe
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries_are_exact() {
        assert_eq!(classify(0), RiskLevel::Safe);
        assert_eq!(classify(20), RiskLevel::Safe);
        assert_eq!(classify(21), RiskLevel::Suspicious);
        assert_eq!(classify(50), RiskLevel::Suspicious);
        assert_eq!(classify(51), RiskLevel::Dangerous);
        assert_eq!(classify(240), RiskLevel::Dangerous);
    }
}
