use serde::Serialize;

use crate::core::types::{RiskLevel, ScanResult};

/// Running totals kept by whoever drives the engine. The engine itself never
/// touches this.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ScanStats {
    pub total_scans: u64,
    pub phishing_detected: u64,
    pub suspicious_detected: u64,
    #[serde(rename = "safeURLs")]
    pub safe_urls: u64,
}

impl ScanStats {
    pub fn record(&mut self, result: &ScanResult) {
        self.total_scans += 1;
        match result.risk_level() {
            RiskLevel::Dangerous => self.phishing_detected += 1,
            RiskLevel::Suspicious => self.suspicious_detected += 1,
            RiskLevel::Safe => self.safe_urls += 1,
        }
    }
}
