//! Rating - Satisfaction score for a recommendation

use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

pub const MIN_RATING: i64 = 1;
pub const MAX_RATING: i64 = 5;

/// Integer satisfaction rating in [1, 5]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Rating(u8);

impl Rating {
    pub fn new(value: i64) -> Result<Self, DomainError> {
        if !(MIN_RATING..=MAX_RATING).contains(&value) {
            return Err(DomainError::invalid(format!(
                "rating must be an integer between {} and {}",
                MIN_RATING, MAX_RATING
            )));
        }
        Ok(Self(value as u8))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Rating {
    type Error = DomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Rating> for i64 {
    fn from(rating: Rating) -> Self {
        rating.0 as i64
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
