use std::net::SocketAddr;

use chrono_tz::Tz;
use thiserror::Error;

use crate::services::qr_service::PromptPaySettings;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} not set")]
    Missing(&'static str),
    #[error("{var} is invalid: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// Runtime settings read from the environment (and `.env`)
#[derive(Debug, Clone)]
pub struct Config {
    pub line_channel_access_token: String,
    pub airtable_api_token: String,
    pub airtable_base_id: String,
    pub airtable_table_name: String,
    pub promptpay: PromptPaySettings,
    /// Timezone that decides which records count as "today"
    pub ledger_timezone: Tz,
    pub bind_addr: SocketAddr,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from any key/value source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| -> Result<String, ConfigError> {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::Missing(key))
        };
        let optional = |key: &'static str, default: &str| -> String {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let ledger_timezone = optional("LEDGER_TIMEZONE", "UTC")
            .parse::<Tz>()
            .map_err(|e| ConfigError::Invalid {
                var: "LEDGER_TIMEZONE",
                reason: e.to_string(),
            })?;

        let bind_addr = optional("BIND_ADDR", "0.0.0.0:3000")
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::Invalid {
                var: "BIND_ADDR",
                reason: e.to_string(),
            })?;

        let provider_url = optional("PROMPTPAY_BASE_URL", "https://promptpay.io");
        if !provider_url.starts_with("http://") && !provider_url.starts_with("https://") {
            return Err(ConfigError::Invalid {
                var: "PROMPTPAY_BASE_URL",
                reason: "must start with http:// or https://".to_string(),
            });
        }

        Ok(Self {
            line_channel_access_token: required("LINE_CHANNEL_ACCESS_TOKEN")?,
            airtable_api_token: required("AIRTABLE_API_TOKEN")?,
            airtable_base_id: required("AIRTABLE_BASE_ID")?,
            airtable_table_name: optional("AIRTABLE_TABLE_NAME", "Table 1"),
            promptpay: PromptPaySettings {
                provider_url,
                payee_id: required("PROMPTPAY_ID")?,
            },
            ledger_timezone,
            bind_addr,
        })
    }
}
