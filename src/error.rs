//! Error types for the digital banking core

use thiserror::Error;

/// Result type alias for banking operations
pub type Result<T> = std::result::Result<T, BankingError>;

#[derive(Error, Debug)]
pub enum BankingError {

    // =============================
    // Session Errors
    // =============================

    #[error("Invalid credentials. Please try again.")]
    InvalidCredentials,

    #[error("No authenticated session")]
    NotAuthenticated,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // =============================
    // Assistant Errors
    // =============================

    /// Transport, upstream or parse failure talking to the text-generation provider.
    /// Never escapes the assistant bridge.
    #[error("Assistant provider error: {0}")]
    AssistantProvider(String),

    /// Provider answered but produced no text. Never escapes the assistant bridge.
    #[error("Assistant returned an empty response")]
    EmptyAssistantResponse,

    #[error("Assistant is still answering the previous question")]
    AssistantBusy,

    #[error("Configuration error: {0}")]
    Config(String),

    // =============================
    // External Library Conversions
    // =============================

    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),
}
