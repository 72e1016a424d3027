use std::collections::HashMap;

use crate::config::CompletionConfig;
use crate::locale::Language;

use super::{ChatSession, PromptSet};

/// In-memory keyed session store. The hosting layer owns one of these and
/// keys it per visitor connection; sessions live for the process lifetime
/// only (no persistence).
pub struct SessionManager {
    default_language: Language,
    prompts: PromptSet,
    completion: CompletionConfig,
    sessions: HashMap<String, ChatSession>,
}

impl SessionManager {
    pub fn new(
        default_language: Language,
        prompts: PromptSet,
        completion: CompletionConfig,
    ) -> Self {
        Self {
            default_language,
            prompts,
            completion,
            sessions: HashMap::new(),
        }
    }

    /// Get an existing session or create a fresh one for the key.
    pub fn get_or_create(&mut self, key: &str) -> &mut ChatSession {
        if !self.sessions.contains_key(key) {
            let session = ChatSession::new(
                self.default_language,
                self.prompts.clone(),
                &self.completion,
            );
            self.sessions.insert(key.to_string(), session);
        }
        self.sessions.get_mut(key).unwrap()
    }

    /// Drop a session, if present.
    pub fn remove(&mut self, key: &str) -> bool {
        self.sessions.remove(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
