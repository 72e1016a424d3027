//! End-to-end scenarios for the conversation session, lead capture, and
//! the prompt editor flow.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

use casabot_core::admin::{draft_translation, save_prompts};
use casabot_core::config::CompletionConfig;
use casabot_core::error::{CompletionError, SessionError, StorageError, TranslationError};
use casabot_core::lead::Lead;
use casabot_core::locale::Language;
use casabot_core::provider::CompletionProvider;
use casabot_core::session::{ChatSession, PromptSet, MAX_TURNS};
use casabot_core::storage::{PromptRecord, PromptStore};
use casabot_core::translate::Translator;
use casabot_core::types::{CompletionResponse, Message, TokenUsage};

struct CountingProvider {
    calls: AtomicUsize,
}

impl CountingProvider {
    fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl CompletionProvider for CountingProvider {
    async fn complete(
        &self,
        messages: &[Message],
        _model: &str,
        _max_tokens: u32,
        _temperature: f64,
    ) -> Result<CompletionResponse, CompletionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(CompletionResponse {
            content: format!("answer to: {}", messages.last().unwrap().content),
            usage: TokenUsage::default(),
        })
    }

    fn default_model(&self) -> &str {
        "stub"
    }
}

fn completion_config() -> CompletionConfig {
    CompletionConfig {
        api_key: "sk-test".into(),
        api_base: None,
        model: "gpt-3.5-turbo".into(),
        max_tokens: 1024,
        temperature: 0.7,
    }
}

#[tokio::test]
async fn ten_questions_then_the_session_goes_read_only() {
    let provider = CountingProvider::new();
    let mut session = ChatSession::new(
        Language::English,
        PromptSet::builtin(),
        &completion_config(),
    );

    for i in 0..MAX_TURNS {
        let question = format!("Question number {i} about Homestead");
        let reply = session.submit_question(&provider, &question).await.unwrap();
        assert_eq!(reply, format!("answer to: {question}"));
        assert_eq!(session.transcript().len(), i + 1);
    }

    assert!(session.is_limit_reached());
    assert_eq!(provider.calls.load(Ordering::SeqCst), MAX_TURNS);

    // The 11th submission is rejected before any external call is spent.
    let err = session
        .submit_question(&provider, "an 11th question")
        .await
        .unwrap_err();
    assert!(matches!(err, SessionError::LimitReached));
    assert_eq!(provider.calls.load(Ordering::SeqCst), MAX_TURNS);
    assert_eq!(session.transcript().len(), MAX_TURNS);

    // History survives the cap and keeps submission order.
    for (i, turn) in session.transcript().iter().enumerate() {
        assert_eq!(turn.question, format!("Question number {i} about Homestead"));
    }
}

#[tokio::test]
async fn language_switch_mid_conversation_keeps_history_untouched() {
    let provider = CountingProvider::new();
    let mut session = ChatSession::new(
        Language::English,
        PromptSet::builtin(),
        &completion_config(),
    );

    session.submit_question(&provider, "first").await.unwrap();
    session.submit_question(&provider, "second").await.unwrap();
    let before = session.transcript().to_vec();

    session.toggle_language();
    assert_eq!(session.language(), Language::Spanish);
    assert_eq!(session.transcript(), &before[..]);

    session.submit_question(&provider, "tercera").await.unwrap();
    assert_eq!(session.transcript().len(), 3);
    assert_eq!(&session.transcript()[..2], &before[..]);
}

#[test]
fn lead_without_phone_renders_the_placeholder() {
    let lead = Lead::new("Carlos Vega", "carlos@example.com", None).unwrap();
    let body = lead.render_body();
    assert!(body.contains("Name: Carlos Vega"));
    assert!(body.contains("Email: carlos@example.com"));
    assert!(body.contains("Phone: N/A"));
}

struct FailingTranslator;

#[async_trait]
impl Translator for FailingTranslator {
    async fn translate(
        &self,
        _text: &str,
        _from: Language,
        _to: Language,
    ) -> Result<String, TranslationError> {
        Err(TranslationError::Parse("no segments".to_string()))
    }
}

struct RecordingStore {
    updates: std::sync::Mutex<Vec<(Language, String)>>,
    fail_fetch: bool,
}

#[async_trait]
impl PromptStore for RecordingStore {
    async fn fetch(&self, language: Language) -> Result<PromptRecord, StorageError> {
        if self.fail_fetch {
            return Err(StorageError::NotFound(language.record_key().to_string()));
        }
        Ok(PromptRecord {
            language: language.record_key().to_string(),
            prompt: format!("stored {} prompt", language.record_key()),
        })
    }

    async fn update(&self, language: Language, prompt: &str) -> Result<(), StorageError> {
        self.updates
            .lock()
            .unwrap()
            .push((language, prompt.to_string()));
        Ok(())
    }
}

#[tokio::test]
async fn failed_translation_still_lets_the_english_prompt_save() {
    let draft = draft_translation(&FailingTranslator, "You are an assistant.").await;
    assert!(draft.failed);
    assert!(draft.spanish.is_empty());

    let store = RecordingStore {
        updates: std::sync::Mutex::new(Vec::new()),
        fail_fetch: false,
    };
    let outcome = save_prompts(&store, "You are an assistant.", &draft.spanish).await;
    assert!(outcome.all_saved());
    assert!(outcome.spanish.is_none());

    let updates = store.updates.lock().unwrap();
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].0, Language::English);
}

#[tokio::test]
async fn sessions_load_stored_prompts_and_fall_back_to_builtin() {
    let stored = RecordingStore {
        updates: std::sync::Mutex::new(Vec::new()),
        fail_fetch: false,
    };
    let set = PromptSet::load(&stored).await;
    assert_eq!(set.english, "stored english prompt");
    assert_eq!(set.spanish, "stored spanish prompt");

    let unreachable = RecordingStore {
        updates: std::sync::Mutex::new(Vec::new()),
        fail_fetch: true,
    };
    let fallback = PromptSet::load(&unreachable).await;
    assert_eq!(fallback.english, PromptSet::builtin().english);
    assert_eq!(fallback.spanish, PromptSet::builtin().spanish);
}
