//! rc-log-fetch: print Redis Cloud log entries added since the last run.

mod cli;

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use rclog::state::FileStateStore;
use rclog::sync::HttpTransport;
use rclog::Fetcher;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::Args;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    // stdout carries the fetched entries, so diagnostics go to stderr.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level)))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<()> {
    let config = args.fetch_config()?;
    let transport = HttpTransport::new(args.api_config())?;
    let state = FileStateStore::new(&args.statefile);
    let output = open_output(&args)?;

    info!(kind = %config.kind, statefile = %args.statefile.display(), "starting");
    let fetcher = Fetcher::new(transport, state, config);
    let report = fetcher.run(output).await?;

    info!(
        kind = %report.kind,
        entries = report.entries(),
        pages = report.sync.pages_fetched,
        checkpoint = %report.checkpoint,
        "done"
    );
    Ok(())
}

/// Standard output, or the `--output` file truncated unless `--append`.
fn open_output(args: &Args) -> Result<Box<dyn Write>> {
    let Some(path) = &args.output else {
        return Ok(Box::new(io::stdout().lock()));
    };

    let file = if args.append {
        OpenOptions::new().append(true).create(true).open(path)
    } else {
        File::create(path)
    }
    .with_context(|| format!("unable to open output file {}", path.display()))?;

    Ok(Box::new(BufWriter::new(file)))
}
