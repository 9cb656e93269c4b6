use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;

use crate::core::error::SentinelError;
use crate::core::time::age_in_days;
use crate::core::types::ScanResult;

#[derive(Debug, Deserialize)]
struct RdapDomain {
    #[serde(default)]
    events: Vec<RdapEvent>,
}

#[derive(Debug, Deserialize)]
struct RdapEvent {
    #[serde(rename = "eventAction", default)]
    event_action: String,
    #[serde(rename = "eventDate")]
    event_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RdapOutcome {
    /// No registrable domain to look up.
    Skipped,
    Created(DateTime<Utc>),
    Failed(String),
}

impl RdapOutcome {
    pub fn error(&self) -> Option<&str> {
        match self {
            RdapOutcome::Failed(err) => Some(err.as_str()),
            _ => None,
        }
    }
}

pub async fn lookup_created(
    client: &Client,
    endpoint: &str,
    domain: &str,
    timeout: Duration,
) -> RdapOutcome {
    if domain.is_empty() {
        return RdapOutcome::Skipped;
    }
    match fetch_created(client, endpoint, domain, timeout).await {
        Ok(created) => RdapOutcome::Created(created),
        Err(err) => RdapOutcome::Failed(err.to_string()),
    }
}

async fn fetch_created(
    client: &Client,
    endpoint: &str,
    domain: &str,
    timeout: Duration,
) -> Result<DateTime<Utc>, SentinelError> {
    let url = format!("{}/domain/{}", endpoint.trim_end_matches('/'), domain);
    let resp = client.get(url).timeout(timeout).send().await?;
    if !resp.status().is_success() {
        return Err(SentinelError::Http(format!(
            "RDAP response {}",
            resp.status().as_u16()
        )));
    }
    let body: RdapDomain = resp.json().await?;
    let date = body
        .events
        .iter()
        .find(|ev| ev.event_action == "registration" || ev.event_action == "created")
        .and_then(|ev| ev.event_date.as_deref())
        .ok_or_else(|| SentinelError::Decode("no registration event".into()))?;
    let created = DateTime::parse_from_rfc3339(date)
        .map_err(|e| SentinelError::Decode(format!("bad eventDate {:?}: {}", date, e)))?;
    Ok(created.with_timezone(&Utc))
}

/// Failures are noted in `enrichmentErrors` and never scored.
pub fn record(outcome: &RdapOutcome, now: DateTime<Utc>, result: &mut ScanResult) {
    match outcome {
        RdapOutcome::Skipped => {}
        RdapOutcome::Failed(err) => {
            result.add_enrichment_error(format!("RDAP lookup failed: {}", err));
        }
        RdapOutcome::Created(created) => {
            let days = age_in_days(*created, now);
            result.details.domain_age_days = Some(days);
            result.details.domain_created = Some(*created);
            if days < 30 {
                result.add_risk(20, "Domain registered within the last 30 days");
            } else if days < 180 {
                result.add_risk(10, "Domain registered within the last 6 months");
            }
        }
    }
}
