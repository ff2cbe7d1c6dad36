//! Category - User-defined grouping of favorites

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::errors::DomainError;

/// Maximum category name length (characters, after trim)
pub const MAX_CATEGORY_NAME_CHARS: usize = 100;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    /// Member favorites, in insertion order
    pub favorite_ids: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Category {
    pub fn new(user_id: Uuid, name: &str) -> Result<Self, DomainError> {
        let name = Self::validate_name(name)?;
        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            user_id,
            name,
            favorite_ids: Vec::new(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Trim and bound-check a category name
    pub fn validate_name(name: &str) -> Result<String, DomainError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(DomainError::invalid("Category name is required"));
        }
        if trimmed.chars().count() > MAX_CATEGORY_NAME_CHARS {
            return Err(DomainError::invalid(format!(
                "Category name must be at most {} characters",
                MAX_CATEGORY_NAME_CHARS
            )));
        }
        Ok(trimmed.to_string())
    }

    pub fn favorites_count(&self) -> usize {
        self.favorite_ids.len()
    }

    pub fn contains(&self, favorite_id: Uuid) -> bool {
        self.favorite_ids.contains(&favorite_id)
    }
}
