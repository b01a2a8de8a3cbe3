use clap::Parser;

use crate::config::ScannerConfig;
use crate::CONFIG_FILE;

/// Scan SpaceTraders systems and summarize markets and resource deposits into a CSV file.
#[derive(Debug, Parser)]
#[command(name = "system_scanner", version)]
pub struct Cli {
    /// Trade good tallied as exports minus imports per system
    #[arg(short, long)]
    pub resource: Option<String>,

    /// Number of systems pages to scan
    #[arg(long, conflicts_with = "all_pages")]
    pub pages: Option<u32>,

    /// Scan until the systems listing is exhausted
    #[arg(long)]
    pub all_pages: bool,

    /// CSV file to write
    #[arg(short, long)]
    pub output: Option<String>,

    /// Configuration file, created with defaults when missing
    #[arg(short, long, default_value = CONFIG_FILE)]
    pub config: String,

    /// API token (overrides configuration and environment)
    #[arg(long)]
    pub token: Option<String>,

    /// Pause after every API call in milliseconds
    #[arg(long)]
    pub delay_ms: Option<u64>,

    /// Append every API call to the debug log
    #[arg(long)]
    pub api_log: bool,

    /// Increase output verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Command line values take precedence over the configuration file.
    pub fn apply_overrides(&self, config: &mut ScannerConfig) {
        if let Some(resource) = &self.resource {
            config.scan.resource = resource.clone();
        }
        if let Some(pages) = self.pages {
            config.scan.max_pages = pages;
        }
        if self.all_pages {
            config.scan.max_pages = 0;
        }
        if let Some(output) = &self.output {
            config.output.results_file = output.clone();
        }
        if let Some(delay_ms) = self.delay_ms {
            config.api.request_delay_ms = delay_ms;
        }
        if self.api_log {
            config.api.api_logging = true;
        }
    }
}
