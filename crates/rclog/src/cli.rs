//! Command-line arguments.
//!
//! Every flag can also be supplied through an `RCLOGFETCH_` environment
//! variable. Conflicting or out-of-range values are usage errors.

use std::path::PathBuf;
use std::time::Duration;

use clap::builder::NonEmptyStringValueParser;
use clap::Parser;
use rclog::state::DEFAULT_STATE_FILE;
use rclog::sync::{ApiConfig, SyncConfig, DEFAULT_BASE_URL, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use rclog::{FetchConfig, LogKind, OutputFormat, SortOrder};

/// Fetch new Redis Cloud system or session log entries since the last run
#[derive(Parser, Debug)]
#[command(name = "rc-log-fetch", author, version, about, long_about = None)]
pub struct Args {
    /// Redis Cloud API key
    #[arg(long, env = "RCLOGFETCH_API_KEY", hide_env_values = true,
          value_parser = NonEmptyStringValueParser::new())]
    pub api_key: String,

    /// Redis Cloud secret key
    #[arg(long, env = "RCLOGFETCH_SECRET_KEY", hide_env_values = true,
          value_parser = NonEmptyStringValueParser::new())]
    pub secret_key: String,

    /// Fetch the system log (default)
    #[arg(long, env = "RCLOGFETCH_SYSTEM")]
    pub system: bool,

    /// Fetch the session log
    #[arg(long, env = "RCLOGFETCH_SESSION", conflicts_with = "system")]
    pub session: bool,

    /// Output in JSON format (default)
    #[arg(long, env = "RCLOGFETCH_JSON")]
    pub json: bool,

    /// Output in CSV format
    #[arg(long, env = "RCLOGFETCH_CSV", conflicts_with = "json")]
    pub csv: bool,

    /// Sort the output oldest first (default)
    #[arg(long, env = "RCLOGFETCH_ASC")]
    pub asc: bool,

    /// Sort the output newest first
    #[arg(long, env = "RCLOGFETCH_DESC", conflicts_with = "asc")]
    pub desc: bool,

    /// Entries requested per page (at most 1000, 0 means 100)
    #[arg(long, env = "RCLOGFETCH_COUNT", default_value_t = DEFAULT_PAGE_SIZE,
          value_parser = clap::value_parser!(u32).range(0..=i64::from(MAX_PAGE_SIZE)))]
    pub count: u32,

    /// Id of the last entry already received; overrides the state file
    #[arg(long, env = "RCLOGFETCH_ID")]
    pub id: Option<String>,

    /// File holding the last fetched id per log
    #[arg(long, env = "RCLOGFETCH_STATEFILE", default_value = DEFAULT_STATE_FILE)]
    pub statefile: PathBuf,

    /// Output file (default is standard output)
    #[arg(long, env = "RCLOGFETCH_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Append to the output file instead of truncating it
    #[arg(long, env = "RCLOGFETCH_APPEND", requires = "output")]
    pub append: bool,

    /// API root URL
    #[arg(long, env = "RCLOGFETCH_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Per-request timeout in seconds
    #[arg(long, env = "RCLOGFETCH_TIMEOUT", default_value_t = 30)]
    pub timeout: u64,

    /// Log level (overridden by RUST_LOG)
    #[arg(long, env = "RCLOGFETCH_LOG_LEVEL", default_value = "warn")]
    pub log_level: String,
}

impl Args {
    pub fn kind(&self) -> LogKind {
        if self.session {
            LogKind::Session
        } else {
            LogKind::System
        }
    }

    pub fn format(&self) -> OutputFormat {
        if self.csv {
            OutputFormat::Csv
        } else {
            OutputFormat::Json
        }
    }

    pub fn order(&self) -> SortOrder {
        if self.desc {
            SortOrder::Descending
        } else {
            SortOrder::Ascending
        }
    }

    /// Run configuration. Must be called after logging is set up, since a
    /// zero page size is reported as a warning.
    pub fn fetch_config(&self) -> rclog::sync::Result<FetchConfig> {
        Ok(FetchConfig {
            kind: self.kind(),
            sync: SyncConfig::new(self.count)?,
            order: self.order(),
            format: self.format(),
            start_id: self.id.clone(),
        })
    }

    pub fn api_config(&self) -> ApiConfig {
        ApiConfig::new(self.api_key.clone(), self.secret_key.clone())
            .with_base_url(self.base_url.clone())
            .with_timeout(Duration::from_secs(self.timeout))
    }
}
