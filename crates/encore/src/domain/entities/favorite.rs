//! Favorite - Catalog track saved by a user

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::FavoriteDigest;
use crate::domain::errors::DomainError;

/// Favorite track, unique per (user, catalog track)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Favorite {
    pub id: Uuid,
    pub user_id: Uuid,
    pub catalog_track_id: String,
    pub track_name: Option<String>,
    pub artist_name: Option<String>,
    pub album_image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for adding a favorite
#[derive(Debug, Clone, Default)]
pub struct NewFavorite {
    pub catalog_track_id: String,
    pub track_name: Option<String>,
    pub artist_name: Option<String>,
    pub album_image_url: Option<String>,
}

impl Favorite {
    /// Create a new Favorite, rejecting a blank catalog track id
    pub fn new(user_id: Uuid, input: NewFavorite) -> Result<Self, DomainError> {
        let catalog_track_id = input.catalog_track_id.trim().to_string();
        if catalog_track_id.is_empty() {
            return Err(DomainError::invalid("catalogTrackId is required"));
        }

        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            user_id,
            catalog_track_id,
            track_name: input.track_name,
            artist_name: input.artist_name,
            album_image_url: input.album_image_url,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn digest(&self) -> FavoriteDigest {
        FavoriteDigest {
            catalog_track_id: self.catalog_track_id.clone(),
            track_name: self.track_name.clone().unwrap_or_default(),
            artist_name: self.artist_name.clone().unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_track_id_rejected() {
        let result = Favorite::new(
            Uuid::new_v4(),
            NewFavorite {
                catalog_track_id: "   ".to_string(),
                ..Default::default()
            },
        );
        assert!(matches!(result, Err(DomainError::InvalidArgument(_))));
    }

    #[test]
    fn test_digest_fills_missing_names() {
        let favorite = Favorite::new(
            Uuid::new_v4(),
            NewFavorite {
                catalog_track_id: "4uLU6hMCjMI75M1A2tKUQC".to_string(),
                track_name: Some("Never Gonna Give You Up".to_string()),
                ..Default::default()
            },
        )
        .unwrap();

        let digest = favorite.digest();
        assert_eq!(digest.track_name, "Never Gonna Give You Up");
        assert_eq!(digest.artist_name, "");
    }
}
