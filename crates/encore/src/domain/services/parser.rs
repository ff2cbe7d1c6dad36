//! Recommendation response parser
//!
//! Extracts `ParsedCandidate`s from the free text returned by the model.

use regex::Regex;
use std::sync::OnceLock;

use super::prompt::{ARTIST_LABEL, NAME_LABEL, WHY_LABEL};
use crate::domain::entities::ParsedCandidate;

/// Turns raw generated text into candidates.
///
/// Implementations must be pure: the same text always yields the same
/// candidates, in the order they appear.
pub trait RecommendationParser: Send + Sync {
    fn parse(&self, raw_response: &str) -> Vec<ParsedCandidate>;
}

/// Parser for the `ENTRY <n>:` / labeled-line format requested by
/// `build_recommendation_prompt`.
///
/// Text before the first entry header is ignored. Labels are matched as
/// exact, case-sensitive line prefixes.
#[derive(Debug, Clone, Copy, Default)]
pub struct LabeledBlockParser;

fn entry_delimiter() -> &'static Regex {
    static DELIMITER: OnceLock<Regex> = OnceLock::new();
    DELIMITER.get_or_init(|| Regex::new(r"ENTRY \d+:").expect("entry delimiter pattern is valid"))
}

impl RecommendationParser for LabeledBlockParser {
    fn parse(&self, raw_response: &str) -> Vec<ParsedCandidate> {
        let blocks: Vec<&str> = entry_delimiter().split(raw_response).skip(1).collect();
        let candidates: Vec<ParsedCandidate> =
            blocks.iter().filter_map(|block| parse_block(block)).collect();

        if candidates.len() < blocks.len() {
            tracing::debug!(
                "Dropped {} entries without track or artist",
                blocks.len() - candidates.len()
            );
        }
        candidates
    }
}

fn parse_block(block: &str) -> Option<ParsedCandidate> {
    let mut track_name = None;
    let mut artist_name = None;
    let mut explanation = None;

    for line in block.trim().lines() {
        if let Some(value) = line.strip_prefix(NAME_LABEL) {
            track_name = Some(value.trim().to_string());
        } else if let Some(value) = line.strip_prefix(ARTIST_LABEL) {
            artist_name = Some(value.trim().to_string());
        } else if let Some(value) = line.strip_prefix(WHY_LABEL) {
            explanation = Some(value.trim().to_string());
        }
    }

    let track_name = track_name.filter(|s| !s.is_empty())?;
    let artist_name = artist_name.filter(|s| !s.is_empty())?;

    Some(ParsedCandidate {
        track_name,
        artist_name,
        explanation: explanation.filter(|s| !s.is_empty()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const REPLY: &str = "Sure! Here are some picks for your workout.

ENTRY 1:
Name: Till I Collapse
Artist: Eminem
Why: Relentless tempo that keeps you pushing.

ENTRY 2:
Name: Stronger
Artist: Kanye West
Why: Anthemic and driving.

ENTRY 3:
Name: Eye of the Tiger
Artist: Survivor
";

    #[test]
    fn test_parses_entries_in_order() {
        let candidates = LabeledBlockParser.parse(REPLY);

        assert_eq!(candidates.len(), 3);
        assert_eq!(candidates[0].track_name, "Till I Collapse");
        assert_eq!(candidates[0].artist_name, "Eminem");
        assert_eq!(
            candidates[0].explanation.as_deref(),
            Some("Relentless tempo that keeps you pushing.")
        );
        assert_eq!(candidates[1].track_name, "Stronger");
        assert_eq!(candidates[2].track_name, "Eye of the Tiger");
        assert_eq!(candidates[2].explanation, None);
    }

    #[test]
    fn test_parse_is_idempotent() {
        assert_eq!(LabeledBlockParser.parse(REPLY), LabeledBlockParser.parse(REPLY));
    }

    #[test]
    fn test_no_delimiter_yields_empty() {
        let candidates =
            LabeledBlockParser.parse("Name: Song\nArtist: Someone\nWhy: no header here");
        assert!(candidates.is_empty());
        assert!(LabeledBlockParser.parse("").is_empty());
    }

    #[test]
    fn test_block_without_artist_is_dropped() {
        let text = "ENTRY 1:\nName: Orphan Track\nWhy: missing artist\n\nENTRY 2:\nName: Hyperballad\nArtist: Björk\n";
        let candidates = LabeledBlockParser.parse(text);

        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].track_name, "Hyperballad");
        assert_eq!(candidates[0].artist_name, "Björk");
    }

    #[test]
    fn test_empty_values_are_dropped() {
        let text = "ENTRY 1:\nName:   \nArtist: Nobody\n";
        assert!(LabeledBlockParser.parse(text).is_empty());
    }

    #[test]
    fn test_labels_are_case_sensitive() {
        let text = "ENTRY 1:\nname: Lowercase\nARTIST: Shouting\n";
        assert!(LabeledBlockParser.parse(text).is_empty());
    }

    #[test]
    fn test_later_label_overwrites_earlier() {
        let text = "ENTRY 1:\nName: First\nName: Second\nArtist: Band\n";
        let candidates = LabeledBlockParser.parse(text);
        assert_eq!(candidates[0].track_name, "Second");
    }

    #[test]
    fn test_handles_crlf_and_unrecognized_lines() {
        let text = "ENTRY 1:\r\nName: Windows Song\r\nGenre: Ambient\r\nArtist: Brian Eno\r\n";
        let candidates = LabeledBlockParser.parse(text);

        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].track_name, "Windows Song");
        assert_eq!(candidates[0].artist_name, "Brian Eno");
    }
}
