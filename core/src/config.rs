//! Client configuration.

use std::time::Duration;

use crate::error::ApiError;
use crate::models::Region;

pub const DEFAULT_BASE_URL: &str = "https://developer.api.autodesk.com";

/// Settings shared by every call made through one `ApsClient`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the APS gateway, without trailing slash.
    pub base_url: String,
    /// Request timeout applied by the transport.
    pub timeout: Duration,
    /// Webhooks region used when a call does not name one.
    pub region: Option<Region>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            region: None,
        }
    }
}

impl ClientConfig {
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Load configuration from environment variables, falling back to the
    /// defaults for anything unset.
    ///
    /// # Environment Variables
    ///
    /// - `APS_BASE_URL`: gateway base URL
    /// - `APS_TIMEOUT_SECS`: request timeout in seconds
    /// - `APS_REGION`: default Webhooks region (`US`, `EMEA`, ...)
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Configuration` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ApiError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ApiError> {
        let mut config = Self::default();

        if let Some(url) = lookup("APS_BASE_URL") {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ApiError::Configuration(format!("invalid APS_BASE_URL `{url}`")));
            }
            config = config.with_base_url(&url);
        }

        if let Some(secs) = lookup("APS_TIMEOUT_SECS") {
            let secs: u64 = secs
                .trim()
                .parse()
                .map_err(|_| ApiError::Configuration(format!("invalid APS_TIMEOUT_SECS `{secs}`")))?;
            config.timeout = Duration::from_secs(secs);
        }

        if let Some(region) = lookup("APS_REGION") {
            config.region = Some(region.trim().parse()?);
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> =
            vars.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn config_default() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "https://developer.api.autodesk.com");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.region.is_none());
    }

    #[test]
    fn empty_environment_gives_defaults() {
        let config = ClientConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn environment_overrides() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("APS_BASE_URL", "http://127.0.0.1:3000/"),
            ("APS_TIMEOUT_SECS", "5"),
            ("APS_REGION", "EMEA"),
        ]))
        .unwrap();
        assert_eq!(config.base_url, "http://127.0.0.1:3000");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.region, Some(Region::Emea));
    }

    #[test]
    fn invalid_values_are_rejected() {
        for vars in [
            [("APS_BASE_URL", "ftp://x")],
            [("APS_TIMEOUT_SECS", "soon")],
            [("APS_REGION", "MARS")],
        ] {
            let err = ClientConfig::from_lookup(lookup(&vars)).unwrap_err();
            assert!(matches!(err, ApiError::Configuration(_)), "{vars:?}");
        }
    }
}
