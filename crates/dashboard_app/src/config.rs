use std::time::Duration;

use clap::Parser;

/// Terminal dashboard for the web-page analysis service.
#[derive(Debug, Parser)]
#[command(name = "crawldash", version, about)]
pub struct Config {
    /// Base URL of the analysis API.
    #[arg(long, env = "DASHBOARD_API_BASE", default_value = "http://localhost:8080")]
    pub api_base: String,

    /// Seconds between automatic snapshot refreshes.
    #[arg(long, env = "DASHBOARD_POLL_INTERVAL", default_value_t = 5)]
    pub poll_interval_secs: u64,

    /// Rows per page.
    #[arg(long, env = "DASHBOARD_PAGE_SIZE", default_value_t = 20)]
    pub page_size: usize,

    /// Where log output goes.
    #[arg(long, value_enum, default_value = "file")]
    pub log: LogTarget,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LogTarget {
    /// Write to ./crawldash.log in the current directory.
    File,
    /// Write to the terminal.
    Terminal,
    /// Write to both.
    Both,
}

impl Config {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs.max(1))
    }
}
