use std::{fs, path::Path};

use serde::Deserialize;

use crate::core::error::SentinelError;

pub const DEFAULT_CONFIG_PATH: &str = "config/url-sentinel.toml";

/// Static lookup tables consulted by the lexical checks and the domain resolver.
#[derive(Debug, Clone, Deserialize)]
pub struct Lexicon {
    #[serde(default = "default_legitimate_domains")]
    pub legitimate_domains: Vec<String>,
    #[serde(default = "default_shorteners")]
    pub shorteners: Vec<String>,
    #[serde(default = "default_suspicious_keywords")]
    pub suspicious_keywords: Vec<String>,
    #[serde(default = "default_multi_label_suffixes")]
    pub multi_label_suffixes: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,
    #[serde(default = "default_max_concurrent_scans")]
    pub max_concurrent_scans: usize,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_doh_endpoint")]
    pub doh_endpoint: String,
    #[serde(default = "default_rdap_endpoint")]
    pub rdap_endpoint: String,
    #[serde(default)]
    pub lexicon: Lexicon,
}

pub fn load_config(path: Option<&str>) -> Result<AppConfig, SentinelError> {
    let default_path = Path::new(DEFAULT_CONFIG_PATH);
    let path = path.map(Path::new).unwrap_or(default_path);

    if !path.exists() {
        return Ok(AppConfig::default());
    }

    let content = fs::read_to_string(path).map_err(|e| SentinelError::Config(e.to_string()))?;
    let cfg: AppConfig = toml::from_str(&content)?;
    cfg.validate()?;
    Ok(cfg)
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), SentinelError> {
        if self.timeout_ms == 0 {
            return Err(SentinelError::Config("timeout_ms must be positive".into()));
        }
        if self.max_concurrent_scans == 0 {
            return Err(SentinelError::Config(
                "max_concurrent_scans must be positive".into(),
            ));
        }
        if self.doh_endpoint.trim().is_empty() || self.rdap_endpoint.trim().is_empty() {
            return Err(SentinelError::Config("resolver endpoints must be set".into()));
        }
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            max_redirects: default_max_redirects(),
            max_concurrent_scans: default_max_concurrent_scans(),
            user_agent: default_user_agent(),
            doh_endpoint: default_doh_endpoint(),
            rdap_endpoint: default_rdap_endpoint(),
            lexicon: Lexicon::default(),
        }
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self {
            legitimate_domains: default_legitimate_domains(),
            shorteners: default_shorteners(),
            suspicious_keywords: default_suspicious_keywords(),
            multi_label_suffixes: default_multi_label_suffixes(),
        }
    }
}

fn default_timeout_ms() -> u64 {
    4_000
}

fn default_max_redirects() -> usize {
    5
}

fn default_max_concurrent_scans() -> usize {
    5
}

fn default_user_agent() -> String {
    format!("url-sentinel/{}", env!("CARGO_PKG_VERSION"))
}

fn default_doh_endpoint() -> String {
    "https://dns.google/resolve".to_string()
}

fn default_rdap_endpoint() -> String {
    "https://rdap.org".to_string()
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn default_legitimate_domains() -> Vec<String> {
    to_strings(&[
        "google.com",
        "facebook.com",
        "amazon.com",
        "paypal.com",
        "microsoft.com",
        "apple.com",
        "netflix.com",
        "instagram.com",
        "twitter.com",
        "linkedin.com",
        "github.com",
        "stackoverflow.com",
        "reddit.com",
        "wikipedia.org",
        "youtube.com",
        "gmail.com",
    ])
}

fn default_shorteners() -> Vec<String> {
    to_strings(&[
        "bit.ly",
        "tinyurl.com",
        "goo.gl",
        "t.co",
        "ow.ly",
        "is.gd",
        "buff.ly",
        "adf.ly",
        "bit.do",
        "short.io",
        "rb.gy",
        "cutt.ly",
        "shorturl.at",
        "tiny.cc",
    ])
}

fn default_suspicious_keywords() -> Vec<String> {
    to_strings(&[
        "login",
        "verify",
        "account",
        "update",
        "secure",
        "banking",
        "password",
        "confirm",
        "suspended",
        "locked",
        "urgent",
        "click",
        "free",
        "winner",
        "prize",
        "claim",
        "gift",
        "paypal",
        "amazon",
        "microsoft",
        "apple",
        "google",
        "wallet",
        "crypto",
        "bitcoin",
        "blockchain",
        "nft",
    ])
}

fn default_multi_label_suffixes() -> Vec<String> {
    to_strings(&[
        "co.uk", "org.uk", "ac.uk", "gov.uk", "com.au", "net.au", "org.au", "co.in", "com.br",
        "com.mx", "co.jp", "co.kr", "com.sg",
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_keeps_defaults() {
        let cfg: AppConfig = toml::from_str(
            r#"
            timeout_ms = 1500
            doh_endpoint = "http://127.0.0.1:9/resolve"

            [lexicon]
            shorteners = ["sho.rt"]
            "#,
        )
        .unwrap();

        assert_eq!(cfg.timeout_ms, 1500);
        assert_eq!(cfg.max_redirects, 5);
        assert_eq!(cfg.rdap_endpoint, "https://rdap.org");
        assert_eq!(cfg.lexicon.shorteners, vec!["sho.rt"]);
        assert!(cfg.lexicon.legitimate_domains.contains(&"paypal.com".to_string()));
    }

    #[test]
    fn missing_file_yields_defaults() {
        let cfg = load_config(Some("does/not/exist.toml")).unwrap();
        assert_eq!(cfg.timeout_ms, 4_000);
        assert_eq!(cfg.lexicon.multi_label_suffixes.len(), 13);
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let cfg = AppConfig {
            timeout_ms: 0,
            ..AppConfig::default()
        };
        assert!(cfg.validate().is_err());
    }
}
