//! Centralized configuration for Sourcematch.
//!
//! All tunable parameters and settings are defined here to avoid
//! hard-coded values scattered throughout the codebase.

use std::time::Duration;

/// Central configuration for all Sourcematch components.
///
/// Groups related configuration settings into logical sections.
/// Supports environment variable overrides for runtime customization.
#[derive(Debug, Clone, Default)]
pub struct SourcematchConfig {
    pub explorer: ExplorerConfig,
    pub network: NetworkConfig,
}

/// Block-explorer endpoint configuration.
///
/// Identifies the verification API the client submits to and the
/// credentials it authenticates with.
#[derive(Debug, Clone)]
pub struct ExplorerConfig {
    /// Verification API endpoint
    pub api_url: String,
    /// Explorer API key sent with every request
    pub api_key: String,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.etherscan.io/api".to_string(),
            api_key: String::new(),
        }
    }
}

/// Network communication and polling configuration.
///
/// Controls HTTP timeouts and how long the client waits for the explorer
/// to finish processing a verification submission.
#[derive(Debug, Clone)]
pub struct NetworkConfig {
    /// HTTP request timeout for explorer communication
    pub request_timeout: Duration,
    /// Delay between verification status checks
    pub poll_interval: Duration,
    /// Maximum number of status checks before giving up on a submission
    pub max_status_polls: u32,
    /// User agent for HTTP requests
    pub user_agent: &'static str,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(30),
            poll_interval: Duration::from_secs(5),
            max_status_polls: 10,
            user_agent: "sourcematch/0.1.0",
        }
    }
}

impl SourcematchConfig {
    /// Creates configuration with environment variable overrides.
    ///
    /// Allows runtime configuration via environment variables while
    /// maintaining sensible defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        // Explorer configuration overrides
        if let Ok(api_url) = std::env::var("SOURCEMATCH_API_URL") {
            config.explorer.api_url = api_url;
        }

        if let Ok(api_key) = std::env::var("SOURCEMATCH_API_KEY") {
            config.explorer.api_key = api_key;
        }

        // Network configuration overrides
        if let Ok(timeout) = std::env::var("SOURCEMATCH_REQUEST_TIMEOUT") {
            if let Ok(seconds) = timeout.parse::<u64>() {
                config.network.request_timeout = Duration::from_secs(seconds);
            }
        }

        if let Ok(interval) = std::env::var("SOURCEMATCH_POLL_INTERVAL") {
            if let Ok(seconds) = interval.parse::<u64>() {
                config.network.poll_interval = Duration::from_secs(seconds);
            }
        }

        if let Ok(polls) = std::env::var("SOURCEMATCH_MAX_POLLS") {
            if let Ok(count) = polls.parse::<u32>() {
                config.network.max_status_polls = count;
            }
        }

        config
    }

    /// Creates a configuration optimized for testing.
    ///
    /// No poll delay and a small poll budget so status loops finish fast.
    pub fn for_testing() -> Self {
        Self {
            network: NetworkConfig {
                request_timeout: Duration::from_secs(5),
                poll_interval: Duration::ZERO,
                max_status_polls: 3,
                user_agent: "sourcematch/test",
            },
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_values() {
        let config = SourcematchConfig::default();

        assert_eq!(config.explorer.api_url, "https://api.etherscan.io/api");
        assert!(config.explorer.api_key.is_empty());
        assert_eq!(config.network.request_timeout, Duration::from_secs(30));
        assert_eq!(config.network.poll_interval, Duration::from_secs(5));
        assert_eq!(config.network.max_status_polls, 10);
    }

    #[test]
    fn test_testing_preset() {
        let config = SourcematchConfig::for_testing();

        assert_eq!(config.network.poll_interval, Duration::ZERO);
        assert_eq!(config.network.max_status_polls, 3);
        assert_eq!(config.network.user_agent, "sourcematch/test");
    }

    #[test]
    fn test_env_override() {
        unsafe {
            std::env::set_var("SOURCEMATCH_API_URL", "https://api.example.org/api");
            std::env::set_var("SOURCEMATCH_API_KEY", "test-key");
            std::env::set_var("SOURCEMATCH_REQUEST_TIMEOUT", "60");
            std::env::set_var("SOURCEMATCH_POLL_INTERVAL", "2");
            std::env::set_var("SOURCEMATCH_MAX_POLLS", "4");
        }

        let config = SourcematchConfig::from_env();

        assert_eq!(config.explorer.api_url, "https://api.example.org/api");
        assert_eq!(config.explorer.api_key, "test-key");
        assert_eq!(config.network.request_timeout, Duration::from_secs(60));
        assert_eq!(config.network.poll_interval, Duration::from_secs(2));
        assert_eq!(config.network.max_status_polls, 4);

        // Cleanup
        unsafe {
            std::env::remove_var("SOURCEMATCH_API_URL");
            std::env::remove_var("SOURCEMATCH_API_KEY");
            std::env::remove_var("SOURCEMATCH_REQUEST_TIMEOUT");
            std::env::remove_var("SOURCEMATCH_POLL_INTERVAL");
            std::env::remove_var("SOURCEMATCH_MAX_POLLS");
        }
    }
}
