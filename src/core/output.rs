use std::fs;
use std::path::Path;

use crate::core::error::SentinelError;
use crate::core::time::now_utc;
use crate::core::types::{OutputFormat, ScanResult};

pub fn write_results(
    results: &[ScanResult],
    format: OutputFormat,
    path: &Path,
) -> Result<(), SentinelError> {
    let body = render(results, format)?;
    fs::write(path, body)?;
    Ok(())
}

pub fn render(results: &[ScanResult], format: OutputFormat) -> Result<String, SentinelError> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(results)
            .map_err(|e| SentinelError::Decode(e.to_string())),
        OutputFormat::Jsonl => render_jsonl(results),
        OutputFormat::Markdown => Ok(render_markdown(results)),
    }
}

fn render_jsonl(results: &[ScanResult]) -> Result<String, SentinelError> {
    let mut lines = String::new();
    for result in results {
        let json =
            serde_json::to_string(result).map_err(|e| SentinelError::Decode(e.to_string()))?;
        lines.push_str(&json);
        lines.push('\n');
    }
    Ok(lines)
}

fn render_markdown(results: &[ScanResult]) -> String {
    let mut out = String::new();
    out.push_str("# URL Sentinel Scan Results\n\n");
    out.push_str(&format!("Generated: {}\n\n", now_utc().to_rfc3339()));
    if results.is_empty() {
        out.push_str("_No URLs scanned._\n");
    }
    for result in results {
        out.push_str(&format!("## {}\n", result.url()));
        out.push_str(&format!(
            "- Normalized: {}\n- Risk level: {}\n- Risk score: {}\n- Scanned at: {}\n",
            result.normalized_url().unwrap_or("n/a"),
            result.risk_level(),
            result.risk_score(),
            result.timestamp().to_rfc3339(),
        ));
        if let Some(final_url) = &result.details.final_url {
            out.push_str(&format!("- Final URL: {}\n", final_url));
        }
        if result.risk_breakdown().is_empty() {
            out.push_str("- Findings: none\n");
        } else {
            out.push_str("- Findings:\n");
            for signal in result.risk_breakdown() {
                out.push_str(&format!("  - (+{}) {}\n", signal.points, signal.reason));
            }
        }
        if !result.details.enrichment_errors.is_empty() {
            out.push_str("- Enrichment errors:\n");
            for err in &result.details.enrichment_errors {
                out.push_str(&format!("  - {}\n", err));
            }
        }
        out.push('\n');
    }
    out
}
