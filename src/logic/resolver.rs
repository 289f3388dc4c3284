//! Identifier resolution: rank number, @mention, exact name, or unique partial.

use crate::models::Player;
use regex::Regex;
use std::sync::OnceLock;

/// Parsed form of a user-supplied player identifier.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Identifier {
    /// All-digit token, interpreted as a 1-based rank.
    Rank(usize),
    /// Platform mention enclosing a numeric user id.
    Mention(u64),
    /// Anything else: matched against player names.
    Name(String),
}

fn mention_pattern() -> &'static Regex {
    static MENTION: OnceLock<Regex> = OnceLock::new();
    // Anchored at the start only: trailing text after the mention is ignored.
    MENTION.get_or_init(|| Regex::new(r"^<@!?(\d+)>").expect("valid mention pattern"))
}

impl Identifier {
    /// Classify a token. Pure string sniffing; no ladder lookup yet.
    pub fn parse(token: &str) -> Identifier {
        let s = token.trim();
        if !s.is_empty() && s.chars().all(|c| c.is_ascii_digit()) {
            // Digits always mean a rank. A value too large for usize is
            // simply out of range; it never falls through to name matching.
            return Identifier::Rank(s.parse::<usize>().unwrap_or(usize::MAX));
        }
        if let Some(caps) = mention_pattern().captures(s) {
            if let Ok(uid) = caps[1].parse::<u64>() {
                return Identifier::Mention(uid);
            }
        }
        Identifier::Name(s.to_string())
    }
}

/// Resolve a token against the ladder, returning the player's 0-based index.
///
/// Resolution order (first matching branch wins; failure within a branch is
/// terminal, with no fallthrough to later branches):
/// 1. All digits: a 1-based rank, valid only within [1, N].
/// 2. Mention: the player whose linked user id matches.
/// 3. Case-insensitive exact name match.
/// 4. Case-insensitive substring of exactly one name (ambiguous = unresolved).
pub fn resolve(players: &[Player], token: &str) -> Option<usize> {
    match Identifier::parse(token) {
        Identifier::Rank(rank) => {
            if (1..=players.len()).contains(&rank) {
                Some(rank - 1)
            } else {
                None
            }
        }
        Identifier::Mention(uid) => players.iter().position(|p| p.user_id == Some(uid)),
        Identifier::Name(name) => {
            let lowered = name.to_lowercase();
            if let Some(i) = players
                .iter()
                .position(|p| p.name.to_lowercase() == lowered)
            {
                return Some(i);
            }
            let matches: Vec<usize> = players
                .iter()
                .enumerate()
                .filter(|(_, p)| p.name.to_lowercase().contains(&lowered))
                .map(|(i, _)| i)
                .collect();
            if matches.len() == 1 {
                Some(matches[0])
            } else {
                None
            }
        }
    }
}
