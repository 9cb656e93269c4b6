use std::time::Duration;

use reqwest::Client;

use crate::core::error::SentinelError;
use crate::core::types::{ScanResult, ScannedUrl, TlsDetail};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TlsOutcome {
    /// Not an https URL; nothing was probed.
    Skipped,
    Valid,
    Invalid(String),
}

impl TlsOutcome {
    pub fn error(&self) -> Option<&str> {
        match self {
            TlsOutcome::Invalid(err) => Some(err.as_str()),
            _ => None,
        }
    }
}

/// Any HTTP answer over https proves the handshake completed.
pub async fn probe_tls(client: &Client, url: &ScannedUrl, timeout: Duration) -> TlsOutcome {
    if !url.is_https() {
        return TlsOutcome::Skipped;
    }
    match client.head(&url.href).timeout(timeout).send().await {
        Ok(_) => TlsOutcome::Valid,
        Err(err) => TlsOutcome::Invalid(SentinelError::from(err).to_string()),
    }
}

pub fn record(outcome: &TlsOutcome, result: &mut ScanResult) {
    let detail = match outcome {
        TlsOutcome::Skipped => TlsDetail {
            checked: false,
            ..TlsDetail::default()
        },
        TlsOutcome::Valid => TlsDetail {
            checked: true,
            valid: Some(true),
            error: None,
        },
        TlsOutcome::Invalid(err) => {
            result.add_risk(8, "TLS handshake failed or blocked");
            TlsDetail {
                checked: true,
                valid: Some(false),
                error: Some(err.clone()),
            }
        }
    };
    result.details.tls = Some(detail);
}
