/// Core error types for casabot.
#[derive(Debug, thiserror::Error)]
pub enum CasabotError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Completion error: {0}")]
    Completion(#[from] CompletionError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("Mail error: {0}")]
    Mail(#[from] MailError),

    #[error("Translation error: {0}")]
    Translation(#[from] TranslationError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {var}: {message}")]
    Invalid { var: &'static str, message: String },
}

/// The completion service could not produce a reply. Any variant means the
/// submission failed as a whole and the transcript stays unchanged.
#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    Parse(String),
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Question limit reached for this session")]
    LimitReached,

    #[error("Question must not be empty")]
    EmptyQuestion,

    #[error("Completion unavailable: {0}")]
    Completion(#[from] CompletionError),
}

#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("Failed to build message: {0}")]
    Build(#[from] lettre::error::Error),

    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum TranslationError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    Parse(String),
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("No prompt record for language: {0}")]
    NotFound(String),

    #[error("Failed to parse response: {0}")]
    Parse(String),
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Sign-in rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    Parse(String),
}

pub type Result<T> = std::result::Result<T, CasabotError>;
