use thiserror::Error;

use crate::core::types::Difficulty;

#[derive(Error, Debug)]
pub enum BroadsideError {
    #[error("No questions available for {subject} ({difficulty})")]
    NoQuestionsAvailable {
        subject: String,
        difficulty: Difficulty,
    },

    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    #[error("Answer index {index} out of range ({choices} choices)")]
    InvalidAnswerIndex { index: usize, choices: usize },

    #[error("Malformed question: {0}")]
    MalformedQuestion(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BroadsideError>;
