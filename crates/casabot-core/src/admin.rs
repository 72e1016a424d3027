//! Operator console flow: edit the stored English prompt, derive a Spanish
//! draft by machine translation, and persist both records.

use tracing::{error, warn};

use crate::error::StorageError;
use crate::locale::Language;
use crate::storage::PromptStore;
use crate::translate::Translator;

/// Result of translating the edited English text. A failed translation
/// degrades to a blank draft; the operator may still save English alone.
#[derive(Debug, Clone)]
pub struct TranslationDraft {
    pub spanish: String,
    pub failed: bool,
}

/// Translate the English prompt into the Spanish draft shown alongside it.
pub async fn draft_translation(translator: &dyn Translator, english: &str) -> TranslationDraft {
    match translator
        .translate(english, Language::English, Language::Spanish)
        .await
    {
        Ok(spanish) => TranslationDraft {
            spanish,
            failed: false,
        },
        Err(e) => {
            warn!("Translation failed, leaving Spanish draft blank: {}", e);
            TranslationDraft {
                spanish: String::new(),
                failed: true,
            }
        }
    }
}

/// Outcome of the two-write save. The writes are independent and there is
/// no rollback: a Spanish failure after an English success leaves the
/// records inconsistent, and this report makes that visible.
#[derive(Debug)]
pub struct SaveOutcome {
    pub english: Result<(), StorageError>,
    /// `None` when the Spanish write was skipped (blank draft).
    pub spanish: Option<Result<(), StorageError>>,
}

impl SaveOutcome {
    /// Every attempted write succeeded.
    pub fn all_saved(&self) -> bool {
        self.english.is_ok() && self.spanish.as_ref().map_or(true, |r| r.is_ok())
    }

    /// The English record was written but the Spanish one was not.
    pub fn inconsistent(&self) -> bool {
        self.english.is_ok() && self.spanish.as_ref().is_some_and(|r| r.is_err())
    }
}

/// Persist the edited prompts: English first, then Spanish. A blank
/// Spanish text skips the second write so the operator can save the
/// English prompt alone after a failed translation.
pub async fn save_prompts(
    store: &dyn PromptStore,
    english: &str,
    spanish: &str,
) -> SaveOutcome {
    let english_result = store.update(Language::English, english).await;
    if let Err(e) = &english_result {
        error!("Failed to save English prompt: {}", e);
    }

    let spanish_result = if spanish.trim().is_empty() {
        None
    } else {
        let r = store.update(Language::Spanish, spanish).await;
        if let Err(e) = &r {
            error!("Failed to save Spanish prompt: {}", e);
        }
        Some(r)
    };

    SaveOutcome {
        english: english_result,
        spanish: spanish_result,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TranslationError;
    use crate::storage::PromptRecord;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct StubTranslator {
        fail: bool,
    }

    #[async_trait]
    impl Translator for StubTranslator {
        async fn translate(
            &self,
            text: &str,
            _from: Language,
            _to: Language,
        ) -> Result<String, TranslationError> {
            if self.fail {
                Err(TranslationError::Api {
                    status: 500,
                    message: "boom".to_string(),
                })
            } else {
                Ok(format!("es:{text}"))
            }
        }
    }

    /// Records updates; optionally fails writes for one language.
    struct StubStore {
        fail_language: Option<Language>,
        updates: Mutex<Vec<(Language, String)>>,
    }

    impl StubStore {
        fn new(fail_language: Option<Language>) -> Self {
            Self {
                fail_language,
                updates: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl PromptStore for StubStore {
        async fn fetch(&self, language: Language) -> Result<PromptRecord, StorageError> {
            Ok(PromptRecord {
                language: language.record_key().to_string(),
                prompt: format!("stored {}", language.record_key()),
            })
        }

        async fn update(&self, language: Language, prompt: &str) -> Result<(), StorageError> {
            if self.fail_language == Some(language) {
                return Err(StorageError::Api {
                    status: 500,
                    message: "write failed".to_string(),
                });
            }
            self.updates
                .lock()
                .unwrap()
                .push((language, prompt.to_string()));
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_draft_translation_success() {
        let t = StubTranslator { fail: false };
        let draft = draft_translation(&t, "Sell houses.").await;
        assert!(!draft.failed);
        assert_eq!(draft.spanish, "es:Sell houses.");
    }

    #[tokio::test]
    async fn test_draft_translation_failure_degrades_to_blank() {
        let t = StubTranslator { fail: true };
        let draft = draft_translation(&t, "Sell houses.").await;
        assert!(draft.failed);
        assert!(draft.spanish.is_empty());
    }

    #[tokio::test]
    async fn test_save_writes_english_then_spanish() {
        let store = StubStore::new(None);
        let outcome = save_prompts(&store, "EN text", "ES text").await;
        assert!(outcome.all_saved());
        assert!(!outcome.inconsistent());

        let updates = store.updates.lock().unwrap();
        assert_eq!(updates.len(), 2);
        assert_eq!(updates[0], (Language::English, "EN text".to_string()));
        assert_eq!(updates[1], (Language::Spanish, "ES text".to_string()));
    }

    #[tokio::test]
    async fn test_blank_spanish_saves_english_alone() {
        let store = StubStore::new(None);
        let outcome = save_prompts(&store, "EN text", "").await;
        assert!(outcome.all_saved());
        assert!(outcome.spanish.is_none());

        let updates = store.updates.lock().unwrap();
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].0, Language::English);
    }

    #[tokio::test]
    async fn test_spanish_failure_after_english_success_is_reported() {
        let store = StubStore::new(Some(Language::Spanish));
        let outcome = save_prompts(&store, "EN text", "ES text").await;
        assert!(!outcome.all_saved());
        assert!(outcome.inconsistent());
        assert!(outcome.english.is_ok());

        // The English write really landed.
        let updates = store.updates.lock().unwrap();
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].0, Language::English);
    }

    #[tokio::test]
    async fn test_english_failure_still_attempts_spanish() {
        let store = StubStore::new(Some(Language::English));
        let outcome = save_prompts(&store, "EN text", "ES text").await;
        assert!(outcome.english.is_err());
        assert!(!outcome.inconsistent());
        assert!(outcome.spanish.as_ref().unwrap().is_ok());
    }
}
