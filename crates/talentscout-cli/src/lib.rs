//! CLI argument parsing for talentscout.

use camino::Utf8PathBuf;
use clap::{Parser, ValueEnum};
use std::time::Duration;
use talentscout_api::ClientConfig;
use talentscout_core::StalePagePolicy;
use talentscout_workflow::{PollerConfig, ProgressSource};

#[derive(Parser, Debug)]
#[command(name = "talentscout")]
#[command(about = "Terminal dashboard for the candidate sourcing backend")]
#[command(version)]
pub struct Args {
    /// Backend base URL
    #[arg(long, env = "TALENTSCOUT_API_URL", default_value = "http://localhost:8000")]
    pub api_url: String,

    /// Job status poll interval in milliseconds
    #[arg(long, default_value = "1000", value_parser = clap::value_parser!(u64).range(1..))]
    pub poll_interval_ms: u64,

    /// Seconds to follow a job before giving up
    #[arg(long, default_value = "180")]
    pub max_wait: u64,

    /// Per-request timeout in seconds
    #[arg(long, default_value = "30", value_parser = clap::value_parser!(u64).range(1..))]
    pub request_timeout: u64,

    /// Where phase progress comes from
    #[arg(long, value_enum, default_value_t = ProgressMode::Server)]
    pub progress: ProgressMode,

    /// What happens to a remembered page that no longer exists after a reload
    #[arg(long, value_enum, default_value_t = StalePages::Clamp)]
    pub stale_pages: StalePages,

    /// Color theme (dark or light)
    #[arg(long, default_value = "dark")]
    pub theme: String,

    /// Log file (the terminal belongs to the dashboard)
    #[arg(long, default_value = "talentscout.log")]
    pub log_file: Utf8PathBuf,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressMode {
    /// Backend progress resource, falling back to synthetic when absent
    Server,
    /// Fixed timeline
    Synthetic,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StalePages {
    Clamp,
    Reset,
    Keep,
}

impl From<ProgressMode> for ProgressSource {
    fn from(mode: ProgressMode) -> Self {
        match mode {
            ProgressMode::Server => ProgressSource::Server,
            ProgressMode::Synthetic => ProgressSource::Synthetic,
        }
    }
}

impl From<StalePages> for StalePagePolicy {
    fn from(policy: StalePages) -> Self {
        match policy {
            StalePages::Clamp => StalePagePolicy::Clamp,
            StalePages::Reset => StalePagePolicy::Reset,
            StalePages::Keep => StalePagePolicy::Keep,
        }
    }
}

impl Args {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Attempts that fit in `max_wait` at the poll interval; at least one.
    pub fn max_attempts(&self) -> u32 {
        let attempts = self.max_wait.saturating_mul(1000).div_ceil(self.poll_interval_ms.max(1));
        attempts.clamp(1, u32::MAX as u64) as u32
    }

    pub fn poller_config(&self) -> PollerConfig {
        PollerConfig {
            interval: self.poll_interval(),
            max_attempts: self.max_attempts(),
            progress_source: self.progress.into(),
        }
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.api_url.clone(),
            request_timeout: Duration::from_secs(self.request_timeout),
        }
    }

    pub fn stale_page_policy(&self) -> StalePagePolicy {
        self.stale_pages.into()
    }
}
