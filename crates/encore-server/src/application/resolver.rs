//! Recommendation Resolver
//!
//! Looks each parsed candidate up in the catalog. Searches run concurrently
//! up to a fixed cap and results are re-assembled in candidate order.
//! A failed or empty search drops that candidate only.

use std::sync::Arc;

use futures::stream::{self, StreamExt};
use uuid::Uuid;

use encore::{CatalogSearch, CatalogTrack, ParsedCandidate, ResolvedRecommendation};

/// Catalog hits requested per candidate; only the first is used
pub const SEARCH_LIMIT: u32 = 5;

pub struct RecommendationResolver {
    catalog: Arc<dyn CatalogSearch>,
    concurrency: usize,
}

impl RecommendationResolver {
    pub fn new(catalog: Arc<dyn CatalogSearch>, concurrency: usize) -> Self {
        Self {
            catalog,
            concurrency: concurrency.max(1),
        }
    }

    /// Never fails as a whole: the output is an order-preserving subset
    /// of `candidates`.
    pub async fn resolve(
        &self,
        user_id: Uuid,
        candidates: &[ParsedCandidate],
    ) -> Vec<ResolvedRecommendation> {
        let lookups: Vec<_> = candidates
            .iter()
            .map(|candidate| self.resolve_one(user_id, candidate))
            .collect();
        let resolved: Vec<Option<ResolvedRecommendation>> = stream::iter(lookups)
            .buffered(self.concurrency)
            .collect()
            .await;

        let resolved: Vec<ResolvedRecommendation> = resolved.into_iter().flatten().collect();

        tracing::info!(
            "Resolved {}/{} recommendations for user {}",
            resolved.len(),
            candidates.len(),
            user_id
        );

        resolved
    }

    async fn resolve_one(
        &self,
        user_id: Uuid,
        candidate: &ParsedCandidate,
    ) -> Option<ResolvedRecommendation> {
        let query = search_query(candidate);

        match self
            .catalog
            .search_tracks(user_id, &query, SEARCH_LIMIT)
            .await
        {
            Ok(tracks) => {
                let track = tracks.into_iter().next();
                if track.is_none() {
                    tracing::debug!("No catalog match for {}", query);
                }
                track.map(|track| to_resolved(track, candidate))
            }
            Err(e) => {
                tracing::warn!(
                    track = %candidate.track_name,
                    artist = %candidate.artist_name,
                    error = %e,
                    "Skipping candidate after catalog search failure"
                );
                None
            }
        }
    }
}

/// Field-qualified catalog query for one candidate
pub fn search_query(candidate: &ParsedCandidate) -> String {
    format!(
        "track:\"{}\" artist:\"{}\"",
        candidate.track_name, candidate.artist_name
    )
}

fn to_resolved(track: CatalogTrack, candidate: &ParsedCandidate) -> ResolvedRecommendation {
    let artist_name = track
        .primary_artist()
        .map(str::to_string)
        .unwrap_or_else(|| candidate.artist_name.clone());

    ResolvedRecommendation {
        catalog_track_id: track.id,
        track_name: track.name,
        artist_name,
        album_name: track.album_name,
        album_image_url: track.album_image_url,
        preview_url: track.preview_url,
        catalog_url: track.external_url,
        duration_ms: track.duration_ms,
        popularity: track.popularity,
        explicit: track.explicit,
        explanation: candidate.explanation.clone(),
    }
}
