use std::sync::Arc;

use anyhow::{anyhow, Result};
use tokio::sync::Semaphore;

use crate::cli::config::{resolve_config, RunConfig};
use crate::cli::flags::Cli;
use crate::config::{load_config, AppConfig};
use crate::core::engine::Engine;
use crate::core::output::{render, write_results};
use crate::core::stats::ScanStats;
use crate::core::types::{RiskLevel, ScanResult};
use crate::pipeline::normalizer::check_input_length;

pub async fn run(cli: Cli) -> Result<()> {
    let app = load_config(cli.config.as_deref())?;
    let cfg = resolve_config(&cli, &app)?;

    let (results, stats) = run_scan(app, &cfg).await?;

    let body = render(&results, cfg.format)?;
    println!("{}", body.trim_end());
    if let Some(path) = &cfg.output {
        write_results(&results, cfg.format, path)?;
        tracing::info!("Results written to {}", path.display());
    }

    tracing::info!(
        total = stats.total_scans,
        dangerous = stats.phishing_detected,
        suspicious = stats.suspicious_detected,
        safe = stats.safe_urls,
        "scan run finished"
    );
    Ok(())
}

/// Score every URL in `cfg` with at most `cfg.concurrency` scans in flight.
/// Results come back in input order; over-long inputs are skipped.
pub async fn run_scan(app: AppConfig, cfg: &RunConfig) -> Result<(Vec<ScanResult>, ScanStats)> {
    let engine = Arc::new(Engine::new(app)?);
    let permits = Arc::new(Semaphore::new(cfg.concurrency));

    let mut handles = Vec::with_capacity(cfg.urls.len());
    for raw in &cfg.urls {
        if let Err(err) = check_input_length(raw) {
            tracing::warn!(error = %err, "skipping url");
            continue;
        }
        let engine = Arc::clone(&engine);
        let permits = Arc::clone(&permits);
        let raw = raw.clone();
        handles.push(tokio::spawn(async move {
            let _permit = permits
                .acquire_owned()
                .await
                .map_err(|e| anyhow!("scan queue closed: {}", e))?;
            Ok::<_, anyhow::Error>(engine.scan(&raw).await)
        }));
    }

    let mut results = Vec::with_capacity(handles.len());
    let mut stats = ScanStats::default();
    for handle in handles {
        let result = handle.await??;
        if result.risk_level() != RiskLevel::Safe {
            tracing::warn!(
                url = %result.url(),
                level = %result.risk_level(),
                score = result.risk_score(),
                "risky url detected"
            );
        }
        stats.record(&result);
        results.push(result);
    }
    Ok((results, stats))
}
