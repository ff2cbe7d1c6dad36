//! Recommendation prompt builder
//!
//! Builds the deterministic prompt sent to the text generation backend.
//! The output format requested here is the contract `LabeledBlockParser`
//! relies on; change both together.

use crate::domain::entities::FavoriteDigest;

/// Number of entries the model is asked for
pub const RECOMMENDATION_COUNT: usize = 5;

/// Per-entry header token, followed by the entry number and a colon
pub const ENTRY_HEADER: &str = "ENTRY";
pub const NAME_LABEL: &str = "Name:";
pub const ARTIST_LABEL: &str = "Artist:";
pub const WHY_LABEL: &str = "Why:";

/// Lead-in for the favorites section
pub const FAVORITES_LEAD_IN: &str = "Some tracks the user likes: ";

pub const PREAMBLE: &str =
    "You are a music expert who helps people discover new music they will love.";

/// Two-tier priority policy, included verbatim in every prompt
pub const PRIORITY_POLICY: &str = "Priority policy:
- If the user request names a specific, narrow criterion (an artist, an album, a genre, or an explicit attribute), every recommendation must stay strictly within that criterion. In that case the tracks the user likes are advisory at best.
- If the user request is open-ended or describes a mood, the tracks the user likes are the primary signal for your recommendations.";

/// Build the prompt for a discovery request.
///
/// The favorites section is omitted entirely when `favorites` is empty.
pub fn build_recommendation_prompt(user_input: &str, favorites: &[FavoriteDigest]) -> String {
    let favorites_context = if favorites.is_empty() {
        String::new()
    } else {
        format!("\n\n{}{}", FAVORITES_LEAD_IN, render_favorites(favorites))
    };

    let mut prompt = format!(
        "{PREAMBLE}\n\n{PRIORITY_POLICY}\n\nUser request: \"{user_input}\"{favorites_context}\n\n\
         Based on the user request and, when available, the tracks the user likes, \
         recommend exactly {RECOMMENDATION_COUNT} tracks that fit what the user is looking for.\n\n\
         For each track, provide:\n\
         1. The track name\n\
         2. The artist name\n\
         3. A short explanation of why the track fits the request\n\n\
         Response format (follow it exactly):\n"
    );

    for n in 1..=2 {
        prompt.push_str(&entry_template(n));
        prompt.push('\n');
    }
    prompt.push_str(&format!(
        "[continue for all {RECOMMENDATION_COUNT} entries]\n\n\
         Be creative but precise. Consider the mood, energy, genre and emotional context of the request."
    ));

    prompt
}

/// `"name" by artist` pairs joined with `, `
fn render_favorites(favorites: &[FavoriteDigest]) -> String {
    favorites
        .iter()
        .map(|fav| format!("\"{}\" by {}", fav.track_name, fav.artist_name))
        .collect::<Vec<_>>()
        .join(", ")
}

fn entry_template(n: usize) -> String {
    format!(
        "{ENTRY_HEADER} {n}:\n{NAME_LABEL} [track name]\n{ARTIST_LABEL} [artist name]\n{WHY_LABEL} [explanation]\n"
    )
}
