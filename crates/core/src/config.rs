//! Core runtime configuration.
//!
//! This module defines configuration that should be resolved once at process startup and then
//! passed into core services. Request handling never reads process-wide environment variables.

use crate::constants::{DEFAULT_MOCK_DELAY_MS, DEFAULT_REQUEST_TIMEOUT_SECS};
use crate::{AssessmentError, AssessmentResult};
use std::str::FromStr;
use std::time::Duration;

/// Which summary provider produces risk summaries.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ProviderKind {
    /// Generate in-process, immediately.
    #[default]
    Local,
    /// Generate in-process after an artificial delay.
    MockDelay,
    /// Post the record to a summary backend and republish its message.
    Http,
}

impl FromStr for ProviderKind {
    type Err = AssessmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(ProviderKind::Local),
            "mock" | "mock-delay" => Ok(ProviderKind::MockDelay),
            "http" => Ok(ProviderKind::Http),
            other => Err(AssessmentError::InvalidInput(format!(
                "unknown summary provider '{other}' (expected local, mock or http)"
            ))),
        }
    }
}

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    provider: ProviderKind,
    mock_delay: Duration,
    summary_url: Option<String>,
    request_timeout: Duration,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns `AssessmentError::InvalidInput` if the HTTP provider is selected without a
    /// usable `http://` or `https://` summary URL.
    pub fn new(
        provider: ProviderKind,
        mock_delay: Duration,
        summary_url: Option<String>,
        request_timeout: Duration,
    ) -> AssessmentResult<Self> {
        let summary_url = summary_url
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty());

        if provider == ProviderKind::Http {
            match &summary_url {
                None => {
                    return Err(AssessmentError::InvalidInput(
                        "summary URL is required for the http provider".into(),
                    ))
                }
                Some(url) if !(url.starts_with("http://") || url.starts_with("https://")) => {
                    return Err(AssessmentError::InvalidInput(format!(
                        "summary URL must start with http:// or https://, got '{url}'"
                    )))
                }
                Some(_) => {}
            }
        }

        Ok(Self {
            provider,
            mock_delay,
            summary_url,
            request_timeout,
        })
    }

    pub fn provider(&self) -> ProviderKind {
        self.provider
    }

    pub fn mock_delay(&self) -> Duration {
        self.mock_delay
    }

    pub fn summary_url(&self) -> Option<&str> {
        self.summary_url.as_deref()
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::Local,
            mock_delay: Duration::from_millis(DEFAULT_MOCK_DELAY_MS),
            summary_url: None,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse the provider kind from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns [`ProviderKind::Local`].
pub fn provider_kind_from_env_value(value: Option<String>) -> AssessmentResult<ProviderKind> {
    let parsed = non_blank(value).map(|v| v.parse::<ProviderKind>()).transpose()?;
    Ok(parsed.unwrap_or_default())
}

/// Parse the mock delay in milliseconds from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns the default of 2000 ms.
pub fn mock_delay_from_env_value(value: Option<String>) -> AssessmentResult<Duration> {
    let millis = non_blank(value)
        .map(|v| {
            v.parse::<u64>().map_err(|_| {
                AssessmentError::InvalidInput(format!(
                    "mock delay must be a whole number of milliseconds, got '{v}'"
                ))
            })
        })
        .transpose()?;
    Ok(Duration::from_millis(millis.unwrap_or(DEFAULT_MOCK_DELAY_MS)))
}

/// Parse the HTTP request timeout in seconds from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns the default of 30 seconds.
pub fn request_timeout_from_env_value(value: Option<String>) -> AssessmentResult<Duration> {
    let secs = non_blank(value)
        .map(|v| match v.parse::<u64>() {
            Ok(0) | Err(_) => Err(AssessmentError::InvalidInput(format!(
                "request timeout must be a positive number of seconds, got '{v}'"
            ))),
            Ok(secs) => Ok(secs),
        })
        .transpose()?;
    Ok(Duration::from_secs(
        secs.unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_kind_defaults_to_local() {
        assert_eq!(provider_kind_from_env_value(None).unwrap(), ProviderKind::Local);
        assert_eq!(
            provider_kind_from_env_value(Some("  ".into())).unwrap(),
            ProviderKind::Local
        );
    }

    #[test]
    fn provider_kind_parses_known_names() {
        assert_eq!(
            provider_kind_from_env_value(Some("Mock".into())).unwrap(),
            ProviderKind::MockDelay
        );
        assert_eq!(
            provider_kind_from_env_value(Some("http".into())).unwrap(),
            ProviderKind::Http
        );
        assert!(matches!(
            provider_kind_from_env_value(Some("grpc".into())),
            Err(AssessmentError::InvalidInput(msg)) if msg.contains("grpc")
        ));
    }

    #[test]
    fn mock_delay_parses_milliseconds() {
        assert_eq!(
            mock_delay_from_env_value(None).unwrap(),
            Duration::from_millis(2000)
        );
        assert_eq!(
            mock_delay_from_env_value(Some("0".into())).unwrap(),
            Duration::ZERO
        );
        assert!(mock_delay_from_env_value(Some("-5".into())).is_err());
    }

    #[test]
    fn request_timeout_rejects_zero() {
        assert_eq!(
            request_timeout_from_env_value(Some("5".into())).unwrap(),
            Duration::from_secs(5)
        );
        assert!(request_timeout_from_env_value(Some("0".into())).is_err());
    }

    #[test]
    fn http_provider_requires_url() {
        let err = CoreConfig::new(ProviderKind::Http, Duration::ZERO, None, Duration::from_secs(1))
            .expect_err("should require url");
        assert!(matches!(err, AssessmentError::InvalidInput(msg) if msg.contains("required")));

        let err = CoreConfig::new(
            ProviderKind::Http,
            Duration::ZERO,
            Some("ftp://example.org".into()),
            Duration::from_secs(1),
        )
        .expect_err("should reject scheme");
        assert!(matches!(err, AssessmentError::InvalidInput(msg) if msg.contains("http://")));

        let cfg = CoreConfig::new(
            ProviderKind::Http,
            Duration::ZERO,
            Some(" http://localhost:3000 ".into()),
            Duration::from_secs(1),
        )
        .expect("valid config");
        assert_eq!(cfg.summary_url(), Some("http://localhost:3000"));
    }

    #[test]
    fn local_provider_ignores_missing_url() {
        let cfg = CoreConfig::new(
            ProviderKind::Local,
            Duration::ZERO,
            Some("".into()),
            Duration::from_secs(1),
        )
        .expect("valid config");
        assert_eq!(cfg.summary_url(), None);
    }
}
