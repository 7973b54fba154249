//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted into application types
//! once validated.

use lookup_application::LookupConfig;
use lookup_domain::{ProviderId, RetryPolicy};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("timeout_seconds cannot be 0")]
    InvalidTimeout,

    #[error("providers.{provider}.max_attempts cannot be 0")]
    ZeroAttempts { provider: String },

    #[error("providers.{provider}.base_url cannot be empty")]
    EmptyBaseUrl { provider: String },

    #[error("providers.{provider}.use_proxy is set but http.proxy_url is missing")]
    MissingProxyUrl { provider: String },
}

/// Output format for lookup results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileOutputFormat {
    /// Colored, human readable
    #[default]
    Pretty,
    /// One JSON object per render event
    Json,
}

/// Raw configuration for one provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProviderConfig {
    /// Endpoint the normalized CNPJ is appended to
    pub base_url: String,
    /// Total attempts, including the first
    pub max_attempts: u32,
    /// Fixed pause between attempts
    pub retry_delay_ms: u64,
    /// Route requests through `http.proxy_url`
    pub use_proxy: bool,
}

impl FileProviderConfig {
    /// Built-in settings for `provider`
    pub fn defaults_for(provider: ProviderId) -> Self {
        let policy = RetryPolicy::for_provider(provider);
        Self {
            base_url: crate::providers::ProviderEndpoint::default_base_url(provider).to_string(),
            max_attempts: policy.max_attempts,
            retry_delay_ms: policy.retry_delay.as_millis() as u64,
            use_proxy: false,
        }
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_attempts, Duration::from_millis(self.retry_delay_ms))
    }
}

impl Default for FileProviderConfig {
    fn default() -> Self {
        // Unnamed tables fall back to the authoritative settings
        Self::defaults_for(ProviderId::Authoritative)
    }
}

/// Raw `[providers]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProvidersConfig {
    pub cnpjws: FileProviderConfig,
    pub brasilapi: FileProviderConfig,
    pub receitaws: FileProviderConfig,
}

impl Default for FileProvidersConfig {
    fn default() -> Self {
        Self {
            cnpjws: FileProviderConfig::defaults_for(ProviderId::Authoritative),
            brasilapi: FileProviderConfig::defaults_for(ProviderId::Secondary1),
            receitaws: FileProviderConfig::defaults_for(ProviderId::Secondary2),
        }
    }
}

impl FileProvidersConfig {
    pub fn get(&self, provider: ProviderId) -> &FileProviderConfig {
        match provider {
            ProviderId::Authoritative => &self.cnpjws,
            ProviderId::Secondary1 => &self.brasilapi,
            ProviderId::Secondary2 => &self.receitaws,
        }
    }
}

/// Raw `[http]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileHttpConfig {
    /// Per-attempt timeout in seconds
    pub timeout_seconds: Option<u64>,
    pub user_agent: String,
    /// Fetch proxy used by providers with `use_proxy = true`
    pub proxy_url: Option<String>,
}

impl Default for FileHttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: Some(10),
            user_agent: crate::providers::DEFAULT_USER_AGENT.to_string(),
            proxy_url: None,
        }
    }
}

/// Raw output configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    pub format: Option<FileOutputFormat>,
    /// Enable colored terminal output
    pub color: bool,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            format: None,
            color: true,
        }
    }
}

/// Complete configuration file structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub providers: FileProvidersConfig,
    pub http: FileHttpConfig,
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.http.timeout_seconds == Some(0) {
            return Err(ConfigValidationError::InvalidTimeout);
        }

        for provider in ProviderId::ALL {
            let settings = self.providers.get(provider);
            let name = provider.as_str().to_string();

            if settings.max_attempts == 0 {
                return Err(ConfigValidationError::ZeroAttempts { provider: name });
            }
            if settings.base_url.trim().is_empty() {
                return Err(ConfigValidationError::EmptyBaseUrl { provider: name });
            }
            let has_proxy = self
                .http
                .proxy_url
                .as_deref()
                .is_some_and(|url| !url.trim().is_empty());
            if settings.use_proxy && !has_proxy {
                return Err(ConfigValidationError::MissingProxyUrl { provider: name });
            }
        }

        Ok(())
    }

    /// Resolve per-provider retry policies and the HTTP timeout.
    pub fn lookup_config(&self) -> LookupConfig {
        let mut config = ProviderId::ALL
            .iter()
            .fold(LookupConfig::default(), |config, provider| {
                config.with_policy(*provider, self.providers.get(*provider).retry_policy())
            });
        if let Some(seconds) = self.http.timeout_seconds {
            config = config.with_timeout_seconds(seconds);
        }
        config
    }

    /// Render as TOML for `--show-config`.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = FileConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.providers.cnpjws.max_attempts, 1);
        assert_eq!(config.providers.brasilapi.max_attempts, 3);
        assert_eq!(config.providers.receitaws.max_attempts, 2);
        assert_eq!(config.providers.receitaws.retry_delay_ms, 1500);
        assert!(config.output.color);
    }

    #[test]
    fn test_deserialize_partial_provider_table() {
        let toml_str = r#"
[providers.brasilapi]
max_attempts = 5

[output]
format = "json"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.providers.brasilapi.max_attempts, 5);
        assert_eq!(config.output.format, Some(FileOutputFormat::Json));
        // untouched tables keep their own defaults
        assert_eq!(config.providers.receitaws.max_attempts, 2);
    }

    #[test]
    fn test_validate_zero_attempts() {
        let mut config = FileConfig::default();
        config.providers.receitaws.max_attempts = 0;
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::ZeroAttempts {
                provider: "receitaws".into()
            })
        );
    }

    #[test]
    fn test_validate_zero_timeout() {
        let mut config = FileConfig::default();
        config.http.timeout_seconds = Some(0);
        assert_eq!(config.validate(), Err(ConfigValidationError::InvalidTimeout));
    }

    #[test]
    fn test_validate_empty_base_url() {
        let mut config = FileConfig::default();
        config.providers.cnpjws.base_url = "  ".into();
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::EmptyBaseUrl { .. })
        ));
    }

    #[test]
    fn test_validate_proxy_requires_url() {
        let mut config = FileConfig::default();
        config.providers.receitaws.use_proxy = true;
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::MissingProxyUrl { .. })
        ));

        config.http.proxy_url = Some("https://proxy.example.com/fetch".into());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_lookup_config_carries_policies() {
        let mut config = FileConfig::default();
        config.providers.brasilapi.max_attempts = 4;
        config.providers.brasilapi.retry_delay_ms = 200;
        config.http.timeout_seconds = Some(3);

        let lookup = config.lookup_config();
        assert_eq!(
            lookup.policy_for(ProviderId::Secondary1),
            RetryPolicy::new(4, Duration::from_millis(200))
        );
        assert_eq!(lookup.timeout, Some(Duration::from_secs(3)));
    }

    #[test]
    fn test_to_toml_round_trips_through_parser() {
        let config = FileConfig::default();
        let rendered = config.to_toml().unwrap();
        assert!(rendered.contains("[providers.cnpjws]"));
        let parsed: FileConfig = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed, config);
    }
}
