use std::net::IpAddr;
use std::time::Duration;

use reqwest::{header::ACCEPT, Client};
use serde::Deserialize;

use crate::core::error::SentinelError;
use crate::core::types::{DnsDetail, ScanResult};

#[derive(Debug, Deserialize)]
struct DohResponse {
    #[serde(rename = "Status")]
    status: i64,
    #[serde(rename = "Answer", default)]
    answer: Vec<DohAnswer>,
}

#[derive(Debug, Deserialize)]
struct DohAnswer {
    #[serde(default)]
    data: String,
}

/// A and MX answers. A failed query leaves its list empty and its error set.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DnsOutcome {
    pub a_records: Vec<String>,
    pub mx_records: Vec<String>,
    pub a_error: Option<String>,
    pub mx_error: Option<String>,
}

impl DnsOutcome {
    pub fn error(&self) -> Option<&str> {
        self.a_error.as_deref().or(self.mx_error.as_deref())
    }
}

pub async fn resolve(client: &Client, endpoint: &str, hostname: &str, timeout: Duration) -> DnsOutcome {
    let host = hostname.trim_start_matches('[').trim_end_matches(']');
    let (a, mx) = tokio::join!(
        query(client, endpoint, host, "A", timeout),
        query(client, endpoint, host, "MX", timeout)
    );

    let (a_records, a_error) = split(a);
    let (mx_records, mx_error) = split(mx);
    DnsOutcome {
        a_records,
        mx_records,
        a_error,
        mx_error,
    }
}

fn split(res: Result<Vec<String>, SentinelError>) -> (Vec<String>, Option<String>) {
    match res {
        Ok(records) => (records, None),
        Err(err) => (Vec::new(), Some(err.to_string())),
    }
}

/// One DNS-over-HTTPS JSON query. A non-zero status is an empty answer, not an error.
pub async fn query(
    client: &Client,
    endpoint: &str,
    name: &str,
    record_type: &str,
    timeout: Duration,
) -> Result<Vec<String>, SentinelError> {
    let resp = client
        .get(endpoint)
        .query(&[("name", name), ("type", record_type)])
        .header(ACCEPT, "application/dns-json")
        .timeout(timeout)
        .send()
        .await?
        .error_for_status()?;
    let body: DohResponse = resp.json().await?;
    if body.status != 0 {
        tracing::debug!(name, record_type, status = body.status, "dns query returned no data");
        return Ok(Vec::new());
    }
    Ok(body
        .answer
        .into_iter()
        .map(|a| a.data)
        .filter(|d| !d.is_empty())
        .collect())
}

/// RFC 1918 IPv4, IPv6 unique-local (fc00::/7) and link-local (fe80::/10).
pub fn is_private_ip(value: &str) -> bool {
    match value.trim().parse::<IpAddr>() {
        Ok(IpAddr::V4(ip)) => ip.is_private(),
        Ok(IpAddr::V6(ip)) => {
            let first = ip.segments()[0];
            (first & 0xfe00) == 0xfc00 || (first & 0xffc0) == 0xfe80
        }
        Err(_) => false,
    }
}

pub fn record(outcome: &DnsOutcome, result: &mut ScanResult) {
    result.details.dns = Some(DnsDetail {
        a_records: outcome.a_records.clone(),
        mx_records: outcome.mx_records.clone(),
    });

    if outcome.a_records.is_empty() {
        result.add_risk(15, "Domain does not resolve to an A record (possible sinkhole)");
    }
    if outcome.mx_records.is_empty() {
        result.add_risk(5, "Domain has no MX record");
    }
    if outcome.a_records.iter().any(|a| is_private_ip(a)) {
        result.add_risk(12, "Domain resolves to a private IP range");
    }
}
