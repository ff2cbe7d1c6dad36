//! UserInput - Validated free text for a discovery request

use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

/// Maximum accepted input length, in characters
pub const MAX_USER_INPUT_CHARS: usize = 500;

/// Discovery text: non-empty after trim, at most 500 characters.
///
/// The length limit applies to the text as submitted; the stored value
/// is the trimmed text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserInput(String);

impl UserInput {
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DomainError::invalid(
                "userInput is required: describe your mood or what you want to hear",
            ));
        }
        if raw.chars().count() > MAX_USER_INPUT_CHARS {
            return Err(DomainError::invalid(format!(
                "userInput is too long: maximum {} characters",
                MAX_USER_INPUT_CHARS
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl AsRef<str> for UserInput {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
