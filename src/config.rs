//! Configuration options for the Base44 client

use std::time::Duration;

/// Base URL used when `BASE44_API_URL` is not set
pub const DEFAULT_BASE_URL: &str = "https://api.base44.com";

/// Environment variable selecting the backend host
pub const BASE_URL_ENV: &str = "BASE44_API_URL";

/// Configuration options for the Base44 client
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// The request timeout
    pub request_timeout: Option<Duration>,

    /// Value sent in the `X-Client-Info` header
    pub client_info: String,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            request_timeout: Some(Duration::from_secs(30)),
            client_info: format!("base44-rust/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientOptions {
    /// Set the request timeout
    pub fn with_request_timeout(mut self, value: Option<Duration>) -> Self {
        self.request_timeout = value;
        self
    }

    /// Set the client info header value
    pub fn with_client_info(mut self, value: &str) -> Self {
        self.client_info = value.to_string();
        self
    }
}

/// Resolve the backend base URL from the environment, falling back to the
/// production host
pub fn base_url_from_env() -> String {
    std::env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_have_timeout() {
        let options = ClientOptions::default();
        assert_eq!(options.request_timeout, Some(Duration::from_secs(30)));
        assert!(options.client_info.starts_with("base44-rust/"));
    }

    #[test]
    fn builder_overrides() {
        let options = ClientOptions::default()
            .with_request_timeout(None)
            .with_client_info("test-suite/1.0");
        assert_eq!(options.request_timeout, None);
        assert_eq!(options.client_info, "test-suite/1.0");
    }
}
