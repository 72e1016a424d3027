use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default completion model, matching the deployed assistant.
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Root configuration for casabot. Each section is loaded independently so
/// a flow only fails fast on the variables it actually needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub completion: CompletionConfig,
    pub mail: MailConfig,
    pub storage: StorageConfig,
}

impl Config {
    /// Load every section from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            completion: CompletionConfig::from_env()?,
            mail: MailConfig::from_env()?,
            storage: StorageConfig::from_env()?,
        })
    }
}

/// Credentials and parameters for the completion API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionConfig {
    pub api_key: String,
    pub api_base: Option<String>,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f64,
}

impl CompletionConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|k| std::env::var(k).ok())
    }

    pub fn from_vars(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_key = require(&get, "OPENAI_API_KEY")?;
        Ok(Self {
            api_key,
            api_base: get("OPENAI_API_BASE").filter(|s| !s.is_empty()),
            model: get("CASABOT_MODEL")
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            max_tokens: 1024,
            temperature: 0.7,
        })
    }
}

/// SMTP transport and addressing for lead notifications.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub sender: String,
    pub password: String,
    pub broker_email: String,
}

impl MailConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|k| std::env::var(k).ok())
    }

    pub fn from_vars(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let sender = require(&get, "EMAIL_SENDER")?;
        let password = require(&get, "EMAIL_PASSWORD")?;
        let broker_email = require(&get, "BROKER_EMAIL")?;

        let smtp_port = match get("SMTP_PORT").filter(|s| !s.is_empty()) {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                var: "SMTP_PORT",
                message: format!("not a port number: {raw}"),
            })?,
            None => 465,
        };

        Ok(Self {
            smtp_host: get("SMTP_HOST")
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| "smtp.gmail.com".to_string()),
            smtp_port,
            sender,
            password,
            broker_email,
        })
    }
}

/// Location and key for the prompt record backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageConfig {
    pub url: String,
    pub api_key: String,
}

impl StorageConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|k| std::env::var(k).ok())
    }

    pub fn from_vars(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            url: require(&get, "SUPABASE_URL")?
                .trim_end_matches('/')
                .to_string(),
            api_key: require(&get, "SUPABASE_KEY")?,
        })
    }
}

fn require(
    get: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<String, ConfigError> {
    match get(var) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ConfigError::MissingVar(var)),
    }
}
