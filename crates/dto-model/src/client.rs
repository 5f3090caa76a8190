use std::time::Duration;

/// Transport settings for the API client. Not part of the wire model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientOptions {
    pub base_url: String,
    pub api_version: String,
    pub timeout: Duration,
    pub max_retries: u32,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            base_url: "https://api.example.com".to_string(),
            api_version: "2026-01-01".to_string(),
            timeout: Duration::from_secs(30),
            max_retries: 2,
        }
    }
}
