use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::pipeline::scorer::classify;

/// Canonical form of a scanned URL. Built once by the normalizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedUrl {
    pub scheme: String,
    pub hostname: String,
    /// Path, query and fragment exactly as they appear in `href`.
    pub path: String,
    /// Explicit non-default port, if any.
    pub port: Option<u16>,
    pub href: String,
    pub is_ip: bool,
}

impl ScannedUrl {
    pub fn is_https(&self) -> bool {
        self.scheme == "https"
    }

    /// Hostname with a single leading `www.` removed.
    pub fn bare_host(&self) -> &str {
        self.hostname
            .strip_prefix("www.")
            .unwrap_or(&self.hostname)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RiskSignal {
    pub points: u32,
    pub reason: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Default)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    #[default]
    Safe,
    Suspicious,
    Dangerous,
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskLevel::Safe => write!(f, "safe"),
            RiskLevel::Suspicious => write!(f, "suspicious"),
            RiskLevel::Dangerous => write!(f, "dangerous"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct BrandSpoofing {
    pub detected: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Typosquatting {
    pub detected: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub similar_to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub similarity: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct TlsDetail {
    pub checked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct DnsDetail {
    pub a_records: Vec<String>,
    pub mx_records: Vec<String>,
}

/// Per-check findings. A `None` field means that check did not run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Details {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub https: Option<bool>,
    #[serde(default, rename = "usesIP", skip_serializing_if = "Option::is_none")]
    pub uses_ip: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub punycode: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand_spoofing: Option<BrandSpoofing>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_shortener: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suspicious_keywords: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excessive_special_chars: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub typosquatting: Option<Typosquatting>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excessive_length: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excessive_subdomains: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subdomain_count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub non_standard_port: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirects: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect_count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tls: Option<TlsDetail>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dns: Option<DnsDetail>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain_age_days: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain_created: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub enrichment_errors: Vec<String>,
}

/// Verdict for one scan.
///
/// The score, breakdown and flags only change together through [`ScanResult::add_risk`],
/// and the level is only assigned by [`ScanResult::classify`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScanResult {
    url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    normalized_url: Option<String>,
    is_phishing: bool,
    risk_score: u32,
    risk_level: RiskLevel,
    flags: Vec<String>,
    risk_breakdown: Vec<RiskSignal>,
    pub details: Details,
    timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

pub const INVALID_URL_FLAG: &str = "Invalid or malformed URL";

impl ScanResult {
    pub fn new(url: impl Into<String>, normalized_url: Option<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            url: url.into(),
            normalized_url,
            is_phishing: false,
            risk_score: 0,
            risk_level: RiskLevel::Safe,
            flags: Vec::new(),
            risk_breakdown: Vec::new(),
            details: Details::default(),
            timestamp,
            error: None,
        }
    }

    /// Degraded result for input that could not be parsed. No checks run.
    pub fn invalid(url: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        let mut result = Self::new(url, None, timestamp);
        result.add_risk(0, INVALID_URL_FLAG);
        result.error = Some("Invalid URL format".to_string());
        result.classify();
        result
    }

    pub fn add_risk(&mut self, points: u32, reason: impl Into<String>) {
        let reason = reason.into();
        tracing::debug!(points, reason = %reason, "risk signal");
        self.risk_score += points;
        self.flags.push(reason.clone());
        self.risk_breakdown.push(RiskSignal { points, reason });
    }

    pub fn add_enrichment_error(&mut self, message: impl Into<String>) {
        self.details.enrichment_errors.push(message.into());
    }

    pub fn classify(&mut self) {
        self.risk_level = classify(self.risk_score);
        self.is_phishing = self.risk_level == RiskLevel::Dangerous;
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn normalized_url(&self) -> Option<&str> {
        self.normalized_url.as_deref()
    }

    pub fn is_phishing(&self) -> bool {
        self.is_phishing
    }

    pub fn risk_score(&self) -> u32 {
        self.risk_score
    }

    pub fn risk_level(&self) -> RiskLevel {
        self.risk_level
    }

    pub fn flags(&self) -> &[String] {
        &self.flags
    }

    pub fn risk_breakdown(&self) -> &[RiskSignal] {
        &self.risk_breakdown
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Jsonl,
    Markdown,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_tracks_breakdown() {
        let mut result = ScanResult::new("x", None, Utc::now());
        result.add_risk(20, "a");
        result.add_risk(8, "b");
        result.add_risk(0, "c");
        result.classify();

        let sum: u32 = result.risk_breakdown().iter().map(|s| s.points).sum();
        assert_eq!(result.risk_score(), sum);
        assert_eq!(result.flags(), ["a", "b", "c"]);
        assert_eq!(result.risk_level(), RiskLevel::Suspicious);
        assert!(!result.is_phishing());
    }

    #[test]
    fn invalid_result_keeps_invariants() {
        let result = ScanResult::invalid("::nope::", Utc::now());
        assert_eq!(result.risk_score(), 0);
        assert_eq!(result.flags(), [INVALID_URL_FLAG]);
        assert_eq!(result.flags().len(), result.risk_breakdown().len());
        assert_eq!(result.risk_level(), RiskLevel::Safe);
        assert_eq!(result.error(), Some("Invalid URL format"));
    }

    #[test]
    fn serializes_camel_case_and_omits_unrun_checks() {
        let mut result = ScanResult::new("http://a.com", Some("http://a.com/".into()), Utc::now());
        result.details.https = Some(false);
        result.details.uses_ip = Some(false);
        result.add_risk(20, "No HTTPS encryption - data can be intercepted");
        result.classify();

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["riskScore"], 20);
        assert_eq!(json["riskLevel"], "safe");
        assert_eq!(json["normalizedUrl"], "http://a.com/");
        assert_eq!(json["details"]["usesIP"], false);
        assert!(json["details"].get("tls").is_none());
        assert!(json["details"].get("enrichmentErrors").is_none());
        assert!(json.get("error").is_none());
    }
}
