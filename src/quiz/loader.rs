//! Load question catalogs from TOML files

use crate::core::error::{BroadsideError, Result};
use crate::core::types::Difficulty;
use crate::quiz::question::Question;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// The catalog shipped with the game
const BUILTIN_CATALOG: &str = include_str!("../../data/questions.toml");

/// On-disk record; difficulty stays a string so one bad entry can be skipped
#[derive(Debug, Deserialize)]
struct RawQuestion {
    text: String,
    #[serde(default)]
    choices: Vec<String>,
    answer: String,
    subject: String,
    difficulty: String,
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    questions: Vec<RawQuestion>,
}

/// Parse a TOML catalog, skipping malformed records
///
/// A file that is not valid TOML, or whose shape is not a `[[questions]]`
/// array, is an error. Individual records with an unknown difficulty or a
/// broken answer key are dropped with a warning.
pub fn parse_catalog(content: &str) -> Result<Vec<Question>> {
    let file: CatalogFile =
        toml::from_str(content).map_err(|e| BroadsideError::Catalog(e.to_string()))?;

    let mut questions = Vec::with_capacity(file.questions.len());
    for (i, raw) in file.questions.into_iter().enumerate() {
        let difficulty: Difficulty = match raw.difficulty.parse() {
            Ok(d) => d,
            Err(e) => {
                tracing::warn!("Catalog entry {}: {}", i, e);
                continue;
            }
        };

        let question = Question::new(raw.text, raw.choices, raw.answer, raw.subject, difficulty);
        if let Err(e) = question.validate() {
            tracing::warn!("Catalog entry {}: {}", i, e);
            continue;
        }
        questions.push(question);
    }

    Ok(questions)
}

/// Load a catalog file from disk
pub fn load_catalog(path: &Path) -> Result<Vec<Question>> {
    let content = fs::read_to_string(path)?;
    let questions = parse_catalog(&content)?;
    tracing::info!("Loaded {} questions from {}", questions.len(), path.display());
    Ok(questions)
}

/// The built-in catalog
pub fn builtin_catalog() -> Result<Vec<Question>> {
    parse_catalog(BUILTIN_CATALOG)
}
