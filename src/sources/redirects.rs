use std::time::Duration;

use reqwest::{header::LOCATION, Client};
use url::Url;

use crate::core::domain::registrable_domain;
use crate::core::error::SentinelError;
use crate::core::types::{ScanResult, ScannedUrl};

/// Hops observed while walking `Location` headers by hand.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RedirectChain {
    pub start: String,
    pub hops: Vec<String>,
    pub error: Option<String>,
}

impl RedirectChain {
    pub fn final_url(&self) -> &str {
        self.hops.last().unwrap_or(&self.start)
    }

    /// True when some hop moves from `https://` to `http://`.
    pub fn downgrades(&self) -> bool {
        std::iter::once(&self.start)
            .chain(self.hops.iter())
            .zip(self.hops.iter())
            .any(|(from, to)| from.starts_with("https://") && to.starts_with("http://"))
    }
}

/// Follow redirects with HEAD requests, at most `max_hops` of them.
///
/// The client must not follow redirects itself. Each request gets its own `timeout`.
pub async fn follow_redirects(
    client: &Client,
    start: &str,
    max_hops: usize,
    timeout: Duration,
) -> RedirectChain {
    let mut chain = RedirectChain {
        start: start.to_string(),
        ..RedirectChain::default()
    };
    let mut current = start.to_string();

    for _ in 0..max_hops {
        let resp = match client.head(&current).timeout(timeout).send().await {
            Ok(resp) => resp,
            Err(err) => {
                chain.error = Some(SentinelError::from(err).to_string());
                break;
            }
        };

        let status = resp.status().as_u16();
        let location = resp
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let Some(location) = location else { break };
        if !(300..400).contains(&status) {
            break;
        }

        let next = match Url::parse(&current).and_then(|base| base.join(&location)) {
            Ok(next) => next.to_string(),
            Err(err) => {
                chain.error = Some(format!("bad Location header {:?}: {}", location, err));
                break;
            }
        };
        tracing::debug!(from = %current, to = %next, status, "redirect hop");
        chain.hops.push(next.clone());
        current = next;
    }

    chain
}

pub fn record(chain: &RedirectChain, url: &ScannedUrl, suffixes: &[String], result: &mut ScanResult) {
    let final_url = chain.final_url().to_string();
    result.details.redirects = Some(chain.hops.clone());
    result.details.redirect_count = Some(chain.hops.len());
    result.details.final_url = Some(final_url.clone());

    if let Some(err) = &chain.error {
        result.add_enrichment_error(format!("Redirect check failed: {}", err));
    }

    if chain.downgrades() {
        result.add_risk(15, "Redirect chain downgrades HTTPS to HTTP");
    }

    if chain.hops.len() >= 3 {
        result.add_risk(10, "Multiple redirects detected - potential cloaking");
    }

    let final_host = Url::parse(&final_url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string));
    if let Some(final_host) = final_host {
        let original = registrable_domain(&url.hostname, suffixes);
        let destination = registrable_domain(&final_host, suffixes);
        if !original.is_empty() && !destination.is_empty() && original != destination {
            result.add_risk(8, "Final destination domain differs from original URL");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Lexicon;
    use crate::pipeline::normalizer::normalize;
    use chrono::Utc;

    fn record_chain(start: &str, hops: &[&str]) -> ScanResult {
        let url = normalize(start).unwrap();
        let chain = RedirectChain {
            start: url.href.clone(),
            hops: hops.iter().map(|h| h.to_string()).collect(),
            error: None,
        };
        let mut result = ScanResult::new(start, Some(url.href.clone()), Utc::now());
        record(&chain, &url, &Lexicon::default().multi_label_suffixes, &mut result);
        result
    }

    #[test]
    fn https_to_http_hop_adds_downgrade_once() {
        let result = record_chain(
            "https://example.com/",
            &["https://www.example.com/", "http://www.example.com/landing"],
        );
        assert_eq!(result.flags(), ["Redirect chain downgrades HTTPS to HTTP"]);
        assert_eq!(result.risk_score(), 15);
        assert_eq!(result.details.redirects.as_ref().map(Vec::len), Some(2));
        assert_eq!(
            result.details.final_url.as_deref(),
            Some("http://www.example.com/landing")
        );
    }

    #[test]
    fn long_chain_to_other_domain() {
        let result = record_chain(
            "https://example.com/",
            &[
                "https://a.example.com/",
                "https://b.example.com/",
                "https://tracker.other.net/",
            ],
        );
        assert_eq!(
            result.flags(),
            [
                "Multiple redirects detected - potential cloaking",
                "Final destination domain differs from original URL",
            ]
        );
        assert_eq!(result.risk_score(), 18);
    }

    #[test]
    fn same_registrable_domain_is_not_a_mismatch() {
        let result = record_chain("http://shop.example.co.uk/", &["http://www.example.co.uk/"]);
        assert_eq!(result.risk_score(), 0);
        assert_eq!(result.details.redirect_count, Some(1));
    }

    #[test]
    fn no_hops_keeps_original_as_final() {
        let result = record_chain("https://example.com/", &[]);
        assert_eq!(result.details.final_url.as_deref(), Some("https://example.com/"));
        assert_eq!(result.details.redirects, Some(vec![]));
        assert!(result.flags().is_empty());
    }

    #[test]
    fn failure_is_recorded_not_scored() {
        let url = normalize("https://example.com").unwrap();
        let chain = RedirectChain {
            start: url.href.clone(),
            hops: vec![],
            error: Some("timeout".into()),
        };
        let mut result = ScanResult::new("https://example.com", None, Utc::now());
        record(&chain, &url, &[], &mut result);
        assert_eq!(result.risk_score(), 0);
        assert_eq!(result.details.enrichment_errors, ["Redirect check failed: timeout"]);
    }
}
