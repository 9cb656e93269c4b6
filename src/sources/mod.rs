//! Network enrichment probes. Each probe returns an outcome instead of an error so a
//! failing probe never takes its siblings down with it.

use chrono::{DateTime, Utc};

use crate::config::Lexicon;
use crate::core::types::{ScanResult, ScannedUrl};

pub mod dns;
pub mod rdap;
pub mod redirects;
pub mod tls;

use dns::DnsOutcome;
use rdap::RdapOutcome;
use redirects::RedirectChain;
use tls::TlsOutcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Redirects,
    Tls,
    Dns,
    Rdap,
}

impl SourceKind {
    pub fn name(&self) -> &'static str {
        match self {
            SourceKind::Redirects => "redirects",
            SourceKind::Tls => "tls",
            SourceKind::Dns => "dns",
            SourceKind::Rdap => "domain-age",
        }
    }
}

/// Settled outcomes of all four probes for one scan.
#[derive(Debug, Clone, PartialEq)]
pub struct Enrichment {
    pub redirects: RedirectChain,
    pub tls: TlsOutcome,
    pub dns: DnsOutcome,
    pub domain_age: RdapOutcome,
}

impl Enrichment {
    /// Fold the outcomes into `result` in a fixed order, whichever probe finished first.
    pub fn apply(
        &self,
        url: &ScannedUrl,
        lexicon: &Lexicon,
        now: DateTime<Utc>,
        result: &mut ScanResult,
    ) {
        self.log_outcomes();
        redirects::record(&self.redirects, url, &lexicon.multi_label_suffixes, result);
        tls::record(&self.tls, result);
        dns::record(&self.dns, result);
        rdap::record(&self.domain_age, now, result);
    }

    fn log_outcomes(&self) {
        let failures = [
            (SourceKind::Redirects, self.redirects.error.as_deref()),
            (SourceKind::Tls, self.tls.error()),
            (SourceKind::Dns, self.dns.error()),
            (SourceKind::Rdap, self.domain_age.error()),
        ];
        for (kind, failure) in failures {
            match failure {
                None => tracing::debug!(source = kind.name(), "probe ok"),
                Some(err) => tracing::warn!(source = kind.name(), error = %err, "probe failed"),
            }
        }
    }
}
