use std::time::Duration;

use clap::Args;

/// Where the hosted backend lives and how to reach it
#[derive(Args, Debug, Clone)]
pub struct BackendConfig {
    /// Backend project URL (e.g., https://xyz.supabase.co)
    #[arg(long = "backend-url", env = "FOLIO_BACKEND_URL")]
    pub url: String,

    /// Public (anon) API key
    #[arg(long = "anon-key", env = "FOLIO_ANON_KEY", hide_env_values = true)]
    pub anon_key: String,

    /// Request timeout in seconds
    #[arg(long, env = "FOLIO_TIMEOUT_SECS", default_value_t = 10)]
    pub timeout_secs: u64,
}

impl BackendConfig {
    pub fn new(url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            anon_key: anon_key.into(),
            timeout_secs: 10,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// `url` without a trailing slash, joined with `path`
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_cleanly() {
        let config = BackendConfig::new("https://demo.supabase.co/", "anon");
        assert_eq!(
            config.endpoint("/rest/v1/projects"),
            "https://demo.supabase.co/rest/v1/projects"
        );
        assert_eq!(
            config.endpoint("auth/v1/user"),
            "https://demo.supabase.co/auth/v1/user"
        );
        assert_eq!(config.timeout(), Duration::from_secs(10));
    }
}
