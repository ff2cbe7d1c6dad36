//! Comment - Free-text note on a favorite

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::errors::DomainError;

pub const MAX_COMMENT_CHARS: usize = 500;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub user_id: Uuid,
    pub favorite_id: Uuid,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(user_id: Uuid, favorite_id: Uuid, text: &str) -> Result<Self, DomainError> {
        let text = Self::validate_text(text)?;
        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            user_id,
            favorite_id,
            text,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn validate_text(text: &str) -> Result<String, DomainError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(DomainError::invalid("Comment text is required"));
        }
        if trimmed.chars().count() > MAX_COMMENT_CHARS {
            return Err(DomainError::invalid(format!(
                "Comment text must be at most {} characters",
                MAX_COMMENT_CHARS
            )));
        }
        Ok(trimmed.to_string())
    }
}
