//! Machine translation of prompt text between the two supported languages.

use async_trait::async_trait;
use tracing::debug;

use crate::error::TranslationError;
use crate::locale::Language;
use crate::util::http::client;

const TRANSLATE_API: &str = "https://translate.googleapis.com/translate_a/single";

/// Trait for translation backends.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate a single string from one language to the other.
    async fn translate(
        &self,
        text: &str,
        from: Language,
        to: Language,
    ) -> Result<String, TranslationError>;
}

/// Translator backed by the public Google endpoint (no key required).
pub struct GoogleTranslator;

#[async_trait]
impl Translator for GoogleTranslator {
    async fn translate(
        &self,
        text: &str,
        from: Language,
        to: Language,
    ) -> Result<String, TranslationError> {
        let resp = client()
            .get(TRANSLATE_API)
            .query(&[
                ("client", "gtx"),
                ("sl", from.code()),
                ("tl", to.code()),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(TranslationError::Api {
                status: status.as_u16(),
                message: text,
            });
        }

        let data: serde_json::Value = resp.json().await?;
        let translated = parse_translation(&data)?;
        debug!("Translated {} chars {} -> {}", text.len(), from.code(), to.code());
        Ok(translated)
    }
}

/// The endpoint answers with nested arrays; the first element holds one
/// `[translated, source, ...]` entry per sentence segment.
pub fn parse_translation(data: &serde_json::Value) -> Result<String, TranslationError> {
    let segments = data
        .get(0)
        .and_then(|v| v.as_array())
        .ok_or_else(|| TranslationError::Parse("No segments in response".to_string()))?;

    let mut out = String::new();
    for segment in segments {
        if let Some(piece) = segment.get(0).and_then(|v| v.as_str()) {
            out.push_str(piece);
        }
    }

    if out.is_empty() {
        return Err(TranslationError::Parse("Empty translation".to_string()));
    }
    Ok(out)
}
