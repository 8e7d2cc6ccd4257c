//! Entry point. Resolves config -> runs one collection pass -> reports.
//!
//! Usage: `collect_files [OUTPUT]`

mod collector;
mod config;
mod report;
mod types;
mod utils;

use anyhow::Context;
use dotenvy::dotenv;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::CollectorConfig;
use crate::report::ConsoleReporter;

fn main() -> anyhow::Result<()> {
    dotenv().ok();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let (mut cfg, source) = CollectorConfig::discover()?;
    match &source {
        Some(path) => info!("Config loaded from {}", path.display()),
        None => info!("No config file found, using built-in manifest"),
    }

    // Optional output override, as in `collect_files ./out/bundle.txt`
    let args: Vec<_> = std::env::args_os().skip(1).collect();
    if args.len() > 1 {
        anyhow::bail!("usage: collect_files [OUTPUT] (got {} arguments)", args.len());
    }
    if let Some(out) = args.into_iter().next() {
        cfg.output = PathBuf::from(out);
    }

    info!(
        "Collecting {} file(s) from {} into {} (mode={:?})",
        cfg.files.len(),
        cfg.root.display(),
        cfg.output.display(),
        cfg.write_mode
    );

    let summary = collector::collect(&cfg, &mut ConsoleReporter)
        .with_context(|| format!("collect into {}", cfg.output.display()))?;

    info!(
        "Collected {} file(s), skipped {}, {} bytes",
        summary.collected.len(),
        summary.skipped.len(),
        summary.bytes
    );
    Ok(())
}
