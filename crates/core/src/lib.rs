pub mod domain;
pub mod engine;
pub mod error;
pub mod ingest;
pub mod service;

pub mod config {
    use anyhow::Context;

    #[derive(Debug, Clone)]
    pub struct Settings {
        pub sentry_dsn: Option<String>,
        pub data_provider_base_url: Option<String>,
        pub data_provider_api_key: Option<String>,
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            Ok(Self {
                sentry_dsn: std::env::var("SENTRY_DSN").ok(),
                data_provider_base_url: std::env::var("DATA_PROVIDER_BASE_URL").ok(),
                data_provider_api_key: std::env::var("DATA_PROVIDER_API_KEY").ok(),
            })
        }

        pub fn require_data_provider_base_url(&self) -> anyhow::Result<&str> {
            self.data_provider_base_url
                .as_deref()
                .filter(|s| !s.trim().is_empty())
                .context("DATA_PROVIDER_BASE_URL is required")
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn blank_base_url_counts_as_missing() {
            let settings = Settings {
                sentry_dsn: None,
                data_provider_base_url: Some("  ".to_string()),
                data_provider_api_key: None,
            };
            assert!(settings.require_data_provider_base_url().is_err());
        }
    }
}
