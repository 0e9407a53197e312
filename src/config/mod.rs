use std::env;
use std::time::Duration;

use reqwest::Url;

use crate::errors::ConfigError;

const DEFAULT_BASE_URL: &str = "http://localhost:8081";
pub(crate) const DEFAULT_POLL_INTERVAL_MS: u64 = 2000;
const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 5000;

/// Dashboard configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub base_url: Url,
    pub poll_interval: Duration,
    pub request_timeout: Duration,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            request_timeout: Duration::from_millis(DEFAULT_REQUEST_TIMEOUT_MS),
        }
    }
}

impl DashboardConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url = env::var("INDEXDASH_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        Ok(Self {
            base_url: parse_base_url(&base_url)?,
            poll_interval: Duration::from_millis(millis_var(
                "INDEXDASH_POLL_INTERVAL_MS",
                DEFAULT_POLL_INTERVAL_MS,
            )),
            request_timeout: Duration::from_millis(millis_var(
                "INDEXDASH_REQUEST_TIMEOUT_MS",
                DEFAULT_REQUEST_TIMEOUT_MS,
            )),
        })
    }

    /// Build a config pointing at `base_url` with default timings.
    pub fn with_base_url(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            ..Self::default()
        })
    }
}

/// Parse and validate the service address. Only http(s) is accepted.
pub fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim())
        .map_err(|e| ConfigError::InvalidBaseUrl(format!("{raw}: {e}")))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::UnsupportedScheme(other.to_string())),
    }
}

/// Read a positive millisecond value, falling back on missing, unparsable or zero.
fn millis_var(name: &str, default: u64) -> u64 {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .filter(|&v| v > 0)
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_service_contract() {
        let config = DashboardConfig::default();
        assert_eq!(config.base_url.as_str(), "http://localhost:8081/");
        assert_eq!(config.poll_interval, Duration::from_millis(2000));
        assert_eq!(config.request_timeout, Duration::from_millis(5000));
    }

    #[test]
    fn with_base_url_keeps_default_timings() {
        let config = DashboardConfig::with_base_url("http://10.0.0.5:9000").unwrap();
        assert_eq!(config.base_url.host_str(), Some("10.0.0.5"));
        assert_eq!(config.base_url.port(), Some(9000));
        assert_eq!(config.poll_interval, Duration::from_millis(2000));
    }

    #[test]
    fn rejects_unparsable_base_url() {
        let err = parse_base_url("not a url").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBaseUrl(_)));
    }

    #[test]
    fn rejects_non_http_scheme() {
        let err = parse_base_url("ftp://localhost:8081").unwrap_err();
        assert_eq!(err.to_string(), "Unsupported base URL scheme: ftp");
    }

    #[test]
    fn millis_var_falls_back_on_garbage_and_zero() {
        env::set_var("INDEXDASH_TEST_MILLIS_GARBAGE", "soon");
        env::set_var("INDEXDASH_TEST_MILLIS_ZERO", "0");
        env::set_var("INDEXDASH_TEST_MILLIS_OK", " 750 ");

        assert_eq!(millis_var("INDEXDASH_TEST_MILLIS_GARBAGE", 2000), 2000);
        assert_eq!(millis_var("INDEXDASH_TEST_MILLIS_ZERO", 2000), 2000);
        assert_eq!(millis_var("INDEXDASH_TEST_MILLIS_OK", 2000), 750);
        assert_eq!(millis_var("INDEXDASH_TEST_MILLIS_UNSET", 42), 42);
    }
}
