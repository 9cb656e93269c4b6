use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};

use crate::cli::flags::{Cli, Command};
use crate::config::AppConfig;
use crate::core::types::OutputFormat;

#[derive(Debug, Clone)]
pub struct RunConfig {
    pub urls: Vec<String>,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub concurrency: usize,
}

pub fn resolve_config(cli: &Cli, app: &AppConfig) -> Result<RunConfig> {
    let Command::Scan {
        urls,
        input,
        format,
        output,
        concurrency,
    } = &cli.command;

    let mut all = urls.clone();
    if let Some(path) = input {
        all.extend(read_url_list(path)?);
    }
    if all.is_empty() {
        return Err(anyhow!("no URLs given; pass them as arguments or via --input"));
    }

    let concurrency = concurrency.unwrap_or(app.max_concurrent_scans);
    if concurrency == 0 {
        return Err(anyhow!("--concurrency must be at least 1"));
    }

    Ok(RunConfig {
        urls: all,
        format: format.clone().map(Into::into).unwrap_or(OutputFormat::Json),
        output: output.clone(),
        concurrency,
    })
}

pub fn read_url_list(path: &Path) -> Result<Vec<String>> {
    let data = std::fs::read_to_string(path)
        .map_err(|e| anyhow!("cannot read {}: {}", path.display(), e))?;
    Ok(data
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .map(str::to_string)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Write;

    #[test]
    fn merges_arguments_and_input_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# batch\nhttps://a.example\n\n  b.example  ").unwrap();
        let path = file.path().to_string_lossy().to_string();

        let cli = Cli::parse_from([
            "url-sentinel",
            "scan",
            "http://first.example",
            "--input",
            path.as_str(),
            "--format",
            "jsonl",
        ]);
        let run = resolve_config(&cli, &AppConfig::default()).unwrap();
        assert_eq!(
            run.urls,
            vec!["http://first.example", "https://a.example", "b.example"]
        );
        assert_eq!(run.format, OutputFormat::Jsonl);
        assert_eq!(run.concurrency, 5);
    }

    #[test]
    fn requires_some_url() {
        let cli = Cli::parse_from(["url-sentinel", "scan"]);
        assert!(resolve_config(&cli, &AppConfig::default()).is_err());
    }
}
