//! Configuration module
//!
//! Resolves where the backend API and the media files live. Values come from
//! the environment (optionally a `.env` file).

use std::env;

use crate::media_url::sanitize_absolute_url;

const DEFAULT_API_URL: &str = "http://localhost:8080";
const HTTP_TIMEOUT_SECS: u64 = 60;

/// Admin engine configuration
#[derive(Clone, Debug)]
pub struct AdminConfig {
    pub environment: String,
    /// Base URL of the REST API
    pub api_base_url: String,
    /// Base URL relative media references are joined to
    pub media_base_url: Option<String>,
    /// Optional bearer token sent with every request
    pub api_token: Option<String>,
    pub http_timeout_secs: u64,
}

/// Raw environment values, separated from the process environment for testing.
#[derive(Clone, Debug, Default)]
pub struct EnvSource {
    pub environment: Option<String>,
    pub api_url: Option<String>,
    pub api_url_local: Option<String>,
    pub api_url_prod: Option<String>,
    pub storage_url: Option<String>,
    pub api_token: Option<String>,
    pub http_timeout_secs: Option<String>,
}

impl EnvSource {
    pub fn from_process() -> Self {
        let var = |key: &str| env::var(key).ok().filter(|v| !v.trim().is_empty());
        Self {
            environment: var("ENVIRONMENT").or_else(|| var("APP_ENV")),
            api_url: var("FONON_API_URL"),
            api_url_local: var("FONON_API_URL_LOCAL"),
            api_url_prod: var("FONON_API_URL_PROD"),
            storage_url: var("FONON_STORAGE_URL"),
            api_token: var("FONON_API_TOKEN"),
            http_timeout_secs: var("FONON_HTTP_TIMEOUT_SECS"),
        }
    }
}

impl AdminConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        let config = Self::from_source(EnvSource::from_process());
        config.validate()?;
        Ok(config)
    }

    pub fn from_source(source: EnvSource) -> Self {
        let environment = source
            .environment
            .clone()
            .unwrap_or_else(|| "development".to_string());
        let production = is_production(&environment);

        let fallback = if production {
            source
                .api_url_prod
                .clone()
                .or_else(|| source.api_url_local.clone())
        } else {
            source
                .api_url_local
                .clone()
                .or_else(|| source.api_url_prod.clone())
        };

        let api_base_url = source
            .api_url
            .clone()
            .or(fallback)
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let api_base_url = api_base_url.trim().trim_end_matches('/').to_string();

        let media_base_url = sanitize_absolute_url(source.storage_url.as_deref())
            .or_else(|| sanitize_absolute_url(Some(&api_base_url)))
            .or_else(|| sanitize_absolute_url(source.api_url_prod.as_deref()))
            .or_else(|| sanitize_absolute_url(source.api_url_local.as_deref()));

        let http_timeout_secs = source
            .http_timeout_secs
            .as_deref()
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(HTTP_TIMEOUT_SECS);

        Self {
            environment,
            api_base_url,
            media_base_url,
            api_token: source.api_token,
            http_timeout_secs,
        }
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if sanitize_absolute_url(Some(&self.api_base_url)).is_none() {
            return Err(anyhow::anyhow!(
                "API base URL must be an absolute http(s) URL, got '{}'",
                self.api_base_url
            ));
        }
        if self.http_timeout_secs == 0 {
            return Err(anyhow::anyhow!("FONON_HTTP_TIMEOUT_SECS must be greater than 0"));
        }
        Ok(())
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        is_production(&self.environment)
    }
}

fn is_production(environment: &str) -> bool {
    let env = environment.to_lowercase();
    env == "production" || env == "prod"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_api_url_wins() {
        let config = AdminConfig::from_source(EnvSource {
            api_url: Some("https://api.fonon.uz/".to_string()),
            api_url_local: Some("http://localhost:9000".to_string()),
            ..Default::default()
        });
        assert_eq!(config.api_base_url, "https://api.fonon.uz");
        assert_eq!(config.media_base_url.as_deref(), Some("https://api.fonon.uz"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn environment_picks_fallback_order() {
        let source = EnvSource {
            api_url_local: Some("http://localhost:9000".to_string()),
            api_url_prod: Some("https://prod.fonon.uz".to_string()),
            ..Default::default()
        };
        let dev = AdminConfig::from_source(source.clone());
        assert_eq!(dev.api_base_url, "http://localhost:9000");

        let prod = AdminConfig::from_source(EnvSource {
            environment: Some("PROD".to_string()),
            ..source
        });
        assert!(prod.is_production());
        assert_eq!(prod.api_base_url, "https://prod.fonon.uz");
    }

    #[test]
    fn defaults_and_storage_override() {
        let config = AdminConfig::from_source(EnvSource {
            storage_url: Some("https://cdn.fonon.uz/".to_string()),
            http_timeout_secs: Some("abc".to_string()),
            ..Default::default()
        });
        assert_eq!(config.api_base_url, DEFAULT_API_URL);
        assert_eq!(config.media_base_url.as_deref(), Some("https://cdn.fonon.uz"));
        assert_eq!(config.http_timeout_secs, HTTP_TIMEOUT_SECS);
    }

    #[test]
    fn relative_api_url_is_rejected() {
        let config = AdminConfig::from_source(EnvSource {
            api_url: Some("/api".to_string()),
            ..Default::default()
        });
        assert!(config.media_base_url.is_none());
        assert!(config.validate().is_err());
    }
}
