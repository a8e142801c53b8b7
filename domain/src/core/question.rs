//! Question value object

use super::error::DomainError;
use serde::{Deserialize, Serialize};

/// Maximum question length, in characters.
pub const MAX_QUESTION_CHARS: usize = 10_000;

/// A question to be answered by the council (Value Object)
///
/// Represents the input query that will be fanned out to every
/// selected provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Question {
    content: String,
}

impl Question {
    /// Create a new question without validation.
    ///
    /// Use [`Question::try_new`] at system boundaries.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }

    /// Try to create a new question, rejecting empty or oversized text
    pub fn try_new(content: impl Into<String>) -> Result<Self, DomainError> {
        let question = Self::new(content);
        question.validate()?;
        Ok(question)
    }

    /// Check the length bounds (1..=10000 characters, not blank)
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.content.trim().is_empty() {
            return Err(DomainError::InvalidQuestion(
                "question cannot be empty".to_string(),
            ));
        }
        let len = self.content.chars().count();
        if len > MAX_QUESTION_CHARS {
            return Err(DomainError::InvalidQuestion(format!(
                "question is {} characters long (max {})",
                len, MAX_QUESTION_CHARS
            )));
        }
        Ok(())
    }

    /// Get the question content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Trimmed, lower-cased form used to fingerprint the request.
    pub fn normalized(&self) -> String {
        self.content.trim().to_lowercase()
    }

    /// Consume and return the inner content
    pub fn into_content(self) -> String {
        self.content
    }
}

impl std::fmt::Display for Question {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}

impl From<&str> for Question {
    fn from(s: &str) -> Self {
        Question::new(s)
    }
}

impl From<String> for Question {
    fn from(s: String) -> Self {
        Question::new(s)
    }
}
