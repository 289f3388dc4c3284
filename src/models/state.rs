//! Ladder state, pairings, promotion rules, and errors.

use crate::models::history::HistoryEntry;
use crate::models::player::Player;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Errors that can occur during ladder operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum LadderError {
    /// No players on the ladder yet.
    EmptyLadder,
    /// Target rank outside [1, N].
    RankOutOfRange { rank: usize, size: usize },
    /// Identifier did not resolve to a player (not found or ambiguous partial).
    /// Carries the current roster so callers can show it for disambiguation.
    UnknownPlayer { identifier: String, roster: String },
    /// `record_result` given a winner or loser rank outside [1, N].
    InvalidRankPair { winner_rank: usize, loser_rank: usize, size: usize },
    /// Unknown promotion rule name.
    UnsupportedRule(String),
    /// Writing the state file failed.
    Persist(String),
}

impl std::fmt::Display for LadderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LadderError::EmptyLadder => {
                write!(f, "No players on the ladder yet. Add a player first")
            }
            LadderError::RankOutOfRange { rank, size } => {
                write!(f, "Rank {} is out of range; must be between 1 and {}", rank, size)
            }
            LadderError::UnknownPlayer { identifier, roster } => {
                write!(
                    f,
                    "Couldn't identify '{}'. Try rank number, exact name, @mention, or a longer partial. Current ladder: {}",
                    identifier, roster
                )
            }
            LadderError::InvalidRankPair { winner_rank, loser_rank, size } => {
                write!(
                    f,
                    "Invalid ranks: winner {} / loser {} (ladder has {} players)",
                    winner_rank, loser_rank, size
                )
            }
            LadderError::UnsupportedRule(s) => {
                write!(f, "Invalid rule '{}'. Use SWAP_ONLY or ONE_STEP_ALWAYS", s)
            }
            LadderError::Persist(e) => write!(f, "Failed to save ladder state: {}", e),
        }
    }
}

impl std::error::Error for LadderError {}

/// Promotion rule: how a reported result reorders the ladder.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LadderRule {
    /// Swap winner and loser only when the lower-ranked player won (an upset).
    #[default]
    SwapOnly,
    /// Winner always moves up one slot, loser always moves down one slot.
    OneStepAlways,
}

impl std::fmt::Display for LadderRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LadderRule::SwapOnly => write!(f, "SWAP_ONLY"),
            LadderRule::OneStepAlways => write!(f, "ONE_STEP_ALWAYS"),
        }
    }
}

impl FromStr for LadderRule {
    type Err = LadderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SWAP_ONLY" => Ok(LadderRule::SwapOnly),
            "ONE_STEP_ALWAYS" => Ok(LadderRule::OneStepAlways),
            other => Err(LadderError::UnsupportedRule(other.to_string())),
        }
    }
}

/// One pairing of a generated round, as 1-based ranks. Second rank 0 = bye.
/// Serializes as a two-element array, matching the state file format.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Pairing(pub usize, pub usize);

impl Pairing {
    pub fn is_bye(&self) -> bool {
        self.1 == 0
    }
}

/// Full persisted ladder state: ordered players, latest pairings, round counter, history.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct LadderState {
    /// Ordered ladder; index 0 is rank 1 (top).
    pub players: Vec<Player>,
    /// Most recent round's pairings (replaced wholesale on each generation).
    pub pairings: Vec<Pairing>,
    /// Incremented by exactly 1 each time pairings are generated.
    pub round: u32,
    /// Append-only ledger of reported results.
    pub history: Vec<HistoryEntry>,
}

impl LadderState {
    /// Roster enumeration for disambiguation messages: `#1 Alice, #2 Bob, ...`.
    pub fn roster(&self) -> String {
        self.players
            .iter()
            .enumerate()
            .map(|(i, p)| format!("#{} {}", i + 1, p.name))
            .collect::<Vec<_>>()
            .join(", ")
    }
}
