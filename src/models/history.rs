//! History ledger entries for reported results.

use crate::models::player::UserId;
use crate::models::state::LadderRule;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Immutable record of one reported result. Ranks and rule are as of the
/// moment the result was recorded, before the ladder was reordered.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub timestamp: DateTime<Utc>,
    pub round: u32,
    pub winner_rank_pre: usize,
    pub loser_rank_pre: usize,
    pub winner: String,
    pub loser: String,
    pub score: String,
    /// Platform account that reported the result, if known.
    pub reporter_id: Option<UserId>,
    /// Promotion rule in effect when the result was recorded.
    pub rule: LadderRule,
}

impl HistoryEntry {
    /// One-line display form: `R3 — Alice def. Bob (6-4) — rule SWAP_ONLY`.
    pub fn summary(&self) -> String {
        format!(
            "R{} — {} def. {} ({}) — rule {}",
            self.round, self.winner, self.loser, self.score, self.rule
        )
    }
}
