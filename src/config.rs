/// Compile-time defaults and endpoint validation

use url::Url;

use crate::error::ConfigError;

/// Classification endpoint served by the local model API
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000/classify";

/// Element holding the tweet body on x.com / twitter.com
pub const TWEET_TEXT_SELECTOR: &str = "[data-testid=\"tweetText\"]";

/// Returned by the page inspector when the tweet element is missing
pub const TEXT_NOT_FOUND: &str = "Tweet text not found!";

/// Shown when the page inspector never answered
pub const EXTRACT_FAILED: &str = "Failed to retrieve tweet text!";

/// Shown for any classification failure
pub const CLASSIFY_FAILED: &str = "Something went wrong!";

/// Settings for the background classification dispatcher
#[derive(Debug, Clone, PartialEq)]
pub struct DispatcherConfig {
    pub endpoint: Url,
}

impl DispatcherConfig {
    /// Build a config from an endpoint string.
    ///
    /// Only absolute http(s) URLs are accepted; `fetch` in a service worker
    /// has no base URL to resolve a relative one against.
    pub fn new(endpoint: &str) -> Result<Self, ConfigError> {
        let url = Url::parse(endpoint.trim())
            .map_err(|e| ConfigError::InvalidEndpoint(format!("{}: {}", endpoint, e)))?;

        match url.scheme() {
            "http" | "https" => Ok(DispatcherConfig { endpoint: url }),
            other => Err(ConfigError::UnsupportedScheme(other.to_string())),
        }
    }
}
