use std::time::{Duration, Instant};

use crate::{
    config::AppConfig,
    core::{
        domain::registrable_domain,
        error::SentinelError,
        time::now_utc,
        types::{ScanResult, ScannedUrl},
    },
    detectors::run_lexical,
    pipeline::normalizer::normalize,
    sources::{dns, rdap, redirects, tls, Enrichment},
};

/// Stateless scoring engine. One instance can serve any number of concurrent scans.
pub struct Engine {
    client: reqwest::Client,
    pub config: AppConfig,
}

impl Engine {
    pub fn new(config: AppConfig) -> Result<Self, SentinelError> {
        config.validate()?;
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(SentinelError::from)?;

        Ok(Self { client, config })
    }

    fn timeout(&self) -> Duration {
        Duration::from_millis(self.config.timeout_ms)
    }

    /// Score one raw URL. Never fails: malformed input yields a degraded result and
    /// probe failures are folded into the result.
    pub async fn scan(&self, raw: &str) -> ScanResult {
        let started = Instant::now();
        let now = now_utc();

        let url = match normalize(raw) {
            Ok(url) => url,
            Err(err) => {
                tracing::warn!(url = %raw, error = %err, "rejecting malformed url");
                return ScanResult::invalid(raw, now);
            }
        };

        let mut result = ScanResult::new(raw, Some(url.href.clone()), now);
        run_lexical(&url, &self.config.lexicon, &mut result);
        tracing::info!(
            url = %url.href,
            score = result.risk_score(),
            flags = result.flags().len(),
            "lexical checks complete"
        );

        let enrichment = self.enrich(&url).await;
        enrichment.apply(&url, &self.config.lexicon, now, &mut result);
        result.classify();

        tracing::info!(
            url = %url.href,
            score = result.risk_score(),
            level = %result.risk_level(),
            flags = result.flags().len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "scan complete"
        );
        result
    }

    /// Run the four probes concurrently and wait for every one of them.
    pub async fn enrich(&self, url: &ScannedUrl) -> Enrichment {
        let timeout = self.timeout();
        let registrable =
            registrable_domain(&url.hostname, &self.config.lexicon.multi_label_suffixes);

        let (redirects, tls, dns, domain_age) = tokio::join!(
            redirects::follow_redirects(&self.client, &url.href, self.config.max_redirects, timeout),
            tls::probe_tls(&self.client, url, timeout),
            dns::resolve(&self.client, &self.config.doh_endpoint, &url.hostname, timeout),
            rdap::lookup_created(&self.client, &self.config.rdap_endpoint, &registrable, timeout)
        );

        Enrichment {
            redirects,
            tls,
            dns,
            domain_age,
        }
    }
}
