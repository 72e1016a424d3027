pub mod store;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::CompletionConfig;
use crate::error::SessionError;
use crate::locale::{self, Language};
use crate::provider::CompletionProvider;
use crate::storage::PromptStore;
use crate::types::Message;
use crate::util;

/// Hard cap on questions per session. Once the transcript holds this many
/// turns, new questions are rejected; history is never truncated.
pub const MAX_TURNS: usize = 10;

/// One question/answer exchange. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    pub question: String,
    pub answer: String,
    pub at: String,
}

/// The per-language system instruction pair a session works against.
#[derive(Debug, Clone)]
pub struct PromptSet {
    pub english: String,
    pub spanish: String,
}

impl PromptSet {
    /// The built-in instructions shipped with the binary.
    pub fn builtin() -> Self {
        Self {
            english: locale::default_system_prompt(Language::English).to_string(),
            spanish: locale::default_system_prompt(Language::Spanish).to_string(),
        }
    }

    /// Load both stored prompt records, falling back to the built-in text
    /// per language when the store cannot produce a record. The visitor
    /// flow must never be blocked by the admin backend.
    pub async fn load(store: &dyn PromptStore) -> Self {
        let mut set = Self::builtin();
        match store.fetch(Language::English).await {
            Ok(record) => set.english = record.prompt,
            Err(e) => warn!("Using built-in English prompt: {}", e),
        }
        match store.fetch(Language::Spanish).await {
            Ok(record) => set.spanish = record.prompt,
            Err(e) => warn!("Using built-in Spanish prompt: {}", e),
        }
        set
    }

    pub fn get(&self, lang: Language) -> &str {
        match lang {
            Language::English => &self.english,
            Language::Spanish => &self.spanish,
        }
    }
}

/// One visitor's conversation: transcript, language selector, and the
/// completion parameters every submission is sent with.
pub struct ChatSession {
    language: Language,
    prompts: PromptSet,
    transcript: Vec<Turn>,
    model: String,
    max_tokens: u32,
    temperature: f64,
}

impl ChatSession {
    pub fn new(language: Language, prompts: PromptSet, completion: &CompletionConfig) -> Self {
        Self {
            language,
            prompts,
            transcript: Vec::new(),
            model: completion.model.clone(),
            max_tokens: completion.max_tokens,
            temperature: completion.temperature,
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Switch the session language. Prior turns are left untouched; only
    /// the system instruction and labels for the next submission change.
    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    pub fn toggle_language(&mut self) -> Language {
        self.language = self.language.toggle();
        self.language
    }

    pub fn transcript(&self) -> &[Turn] {
        &self.transcript
    }

    /// Whether the session has stopped accepting new questions.
    pub fn is_limit_reached(&self) -> bool {
        self.transcript.len() >= MAX_TURNS
    }

    /// Assemble the ordered message list for a submission: the system
    /// instruction for the current language, every prior turn flattened
    /// into a user/assistant sequence, and the new question last.
    pub fn build_messages(&self, question: &str) -> Vec<Message> {
        let mut messages = Vec::with_capacity(self.transcript.len() * 2 + 2);
        messages.push(Message::system(self.prompts.get(self.language)));
        for turn in &self.transcript {
            messages.push(Message::user(&turn.question));
            messages.push(Message::assistant(&turn.answer));
        }
        messages.push(Message::user(question));
        messages
    }

    /// Submit a question to the completion provider and append the
    /// exchange to the transcript.
    ///
    /// Preconditions are checked before any external call is made; a
    /// failed completion leaves the transcript unchanged and is not
    /// retried.
    pub async fn submit_question(
        &mut self,
        provider: &dyn CompletionProvider,
        text: &str,
    ) -> Result<String, SessionError> {
        if text.trim().is_empty() {
            return Err(SessionError::EmptyQuestion);
        }
        if self.is_limit_reached() {
            return Err(SessionError::LimitReached);
        }

        let messages = self.build_messages(text);
        let response = provider
            .complete(&messages, &self.model, self.max_tokens, self.temperature)
            .await?;

        info!(
            "Answered \"{}\" ({} prompt / {} completion tokens)",
            util::truncate_string(text, 60, "..."),
            response.usage.prompt_tokens,
            response.usage.completion_tokens,
        );

        self.transcript.push(Turn {
            question: text.to_string(),
            answer: response.content.clone(),
            at: util::timestamp(),
        });

        Ok(response.content)
    }
}
