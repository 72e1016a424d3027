//! Prompt record storage and operator sign-in against the hosted backend.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::StorageConfig;
use crate::error::{AuthError, StorageError};
use crate::locale::Language;
use crate::util::http::client;

const PROMPTS_TABLE: &str = "prompts";

/// A stored system-instruction record, keyed by language.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptRecord {
    pub language: String,
    pub prompt: String,
}

/// Trait for prompt record backends.
#[async_trait]
pub trait PromptStore: Send + Sync {
    /// Fetch the record for a language.
    async fn fetch(&self, language: Language) -> Result<PromptRecord, StorageError>;

    /// Overwrite the prompt text for a language.
    async fn update(&self, language: Language, prompt: &str) -> Result<(), StorageError>;
}

/// An authenticated operator session.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub access_token: String,
    pub user_email: String,
}

/// Sign an operator in with email + password. Any rejection blocks the
/// admin flow entirely.
pub async fn sign_in(
    config: &StorageConfig,
    email: &str,
    password: &str,
) -> Result<AuthSession, AuthError> {
    let url = format!("{}/auth/v1/token?grant_type=password", config.url);
    let body = serde_json::json!({
        "email": email,
        "password": password,
    });

    let resp = client()
        .post(&url)
        .header("apikey", &config.api_key)
        .json(&body)
        .send()
        .await?;

    let status = resp.status();
    if !status.is_success() {
        let text = resp.text().await.unwrap_or_default();
        return Err(AuthError::Rejected {
            status: status.as_u16(),
            message: text,
        });
    }

    let data: serde_json::Value = resp.json().await?;
    let access_token = data
        .get("access_token")
        .and_then(|v| v.as_str())
        .ok_or_else(|| AuthError::Parse("No access_token in response".to_string()))?
        .to_string();
    let user_email = data
        .get("user")
        .and_then(|u| u.get("email"))
        .and_then(|v| v.as_str())
        .unwrap_or(email)
        .to_string();

    debug!("Signed in as {}", user_email);
    Ok(AuthSession {
        access_token,
        user_email,
    })
}

/// Prompt store backed by the hosted REST API.
pub struct RestPromptStore {
    config: StorageConfig,
    access_token: Option<String>,
}

impl RestPromptStore {
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            access_token: None,
        }
    }

    /// Attach an operator token so writes run under their identity.
    pub fn with_auth(config: StorageConfig, auth: &AuthSession) -> Self {
        Self {
            config,
            access_token: Some(auth.access_token.clone()),
        }
    }

    fn bearer(&self) -> &str {
        self.access_token.as_deref().unwrap_or(&self.config.api_key)
    }

    fn table_url(&self, language: Language) -> String {
        format!(
            "{}/rest/v1/{}?language=eq.{}",
            self.config.url,
            PROMPTS_TABLE,
            language.record_key()
        )
    }
}

#[async_trait]
impl PromptStore for RestPromptStore {
    async fn fetch(&self, language: Language) -> Result<PromptRecord, StorageError> {
        let url = format!("{}&select=language,prompt", self.table_url(language));

        let resp = client()
            .get(&url)
            .header("apikey", &self.config.api_key)
            .header("Authorization", format!("Bearer {}", self.bearer()))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(StorageError::Api {
                status: status.as_u16(),
                message: text,
            });
        }

        let records: Vec<PromptRecord> = resp
            .json()
            .await
            .map_err(|e| StorageError::Parse(e.to_string()))?;

        records
            .into_iter()
            .next()
            .ok_or_else(|| StorageError::NotFound(language.record_key().to_string()))
    }

    async fn update(&self, language: Language, prompt: &str) -> Result<(), StorageError> {
        let url = self.table_url(language);
        let body = serde_json::json!({ "prompt": prompt });

        let resp = client()
            .patch(&url)
            .header("apikey", &self.config.api_key)
            .header("Authorization", format!("Bearer {}", self.bearer()))
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(StorageError::Api {
                status: status.as_u16(),
                message: text,
            });
        }

        debug!("Updated {} prompt record", language.record_key());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_record_deserializes_from_rest_shape() {
        let json = r#"[{"language": "english", "prompt": "You are an assistant."}]"#;
        let records: Vec<PromptRecord> = serde_json::from_str(json).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].language, "english");
        assert_eq!(records[0].prompt, "You are an assistant.");
    }

    #[test]
    fn test_table_url_uses_record_key() {
        let store = RestPromptStore::new(StorageConfig {
            url: "https://proj.supabase.co".into(),
            api_key: "anon".into(),
        });
        assert_eq!(
            store.table_url(Language::Spanish),
            "https://proj.supabase.co/rest/v1/prompts?language=eq.spanish"
        );
    }

    #[test]
    fn test_bearer_prefers_operator_token() {
        let cfg = StorageConfig {
            url: "https://proj.supabase.co".into(),
            api_key: "anon".into(),
        };
        let anon = RestPromptStore::new(cfg.clone());
        assert_eq!(anon.bearer(), "anon");

        let auth = AuthSession {
            access_token: "jwt-token".into(),
            user_email: "op@solmar.example".into(),
        };
        let authed = RestPromptStore::with_auth(cfg, &auth);
        assert_eq!(authed.bearer(), "jwt-token");
    }
}
