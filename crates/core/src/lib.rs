pub mod chart;
pub mod client;
pub mod domain;
pub mod lookup;
pub mod suggest;
pub mod time;
pub mod ui;

pub mod config {
    use anyhow::Context;

    const DEFAULT_TIMEOUT_SECS: u64 = 30;

    #[derive(Debug, Clone)]
    pub struct Settings {
        pub base_url: Option<String>,
        pub timeout_secs: u64,
        pub sentry_dsn: Option<String>,
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            let timeout_secs = match std::env::var("TICKVIEW_TIMEOUT_SECS") {
                Ok(s) => s
                    .trim()
                    .parse::<u64>()
                    .with_context(|| format!("TICKVIEW_TIMEOUT_SECS is not a number: {s}"))?,
                Err(_) => DEFAULT_TIMEOUT_SECS,
            };

            Ok(Self {
                base_url: std::env::var("TICKVIEW_BASE_URL")
                    .ok()
                    .filter(|s| !s.trim().is_empty()),
                timeout_secs,
                sentry_dsn: std::env::var("SENTRY_DSN").ok(),
            })
        }

        pub fn require_base_url(&self) -> anyhow::Result<&str> {
            self.base_url
                .as_deref()
                .context("TICKVIEW_BASE_URL is required")
        }
    }
}
