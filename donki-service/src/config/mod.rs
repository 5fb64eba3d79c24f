use secrecy::Secret;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

/// NASA's shared, heavily rate-limited key. Fine for local runs only.
const DEMO_API_KEY: &str = "DEMO_KEY";
const DEFAULT_DONKI_BASE_URL: &str = "https://api.nasa.gov/DONKI";

#[derive(Debug, Clone)]
pub struct DonkiConfig {
    pub common: core_config::Config,
    pub nasa: NasaConfig,
}

#[derive(Debug, Clone)]
pub struct NasaConfig {
    /// Sent upstream as `api_key`.
    pub api_key: Secret<String>,
    /// DONKI API root, without a trailing slash.
    pub base_url: String,
}

impl NasaConfig {
    pub fn notifications_url(&self) -> String {
        format!("{}/notifications", self.base_url.trim_end_matches('/'))
    }
}

impl DonkiConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;
        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        Ok(DonkiConfig {
            common: common_config,
            nasa: NasaConfig {
                api_key: Secret::new(get_env("NASA_API_KEY", Some(DEMO_API_KEY), is_prod)?),
                base_url: get_env("DONKI_BASE_URL", Some(DEFAULT_DONKI_BASE_URL), false)?,
            },
        })
    }
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}
