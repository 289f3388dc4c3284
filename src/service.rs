//! LadderService: owns the in-memory state, backed by file storage.
//!
//! Every mutating operation persists the full state before returning
//! (write-through). The service is not internally synchronized; callers that
//! may run operations concurrently must serialize mutating calls behind a
//! lock of their own (the web binary uses an `RwLock`).

use crate::logic::{apply_rule, pairings_for, resolve};
use crate::models::{HistoryEntry, LadderError, LadderRule, LadderState, Pairing, Player, UserId};
use crate::storage::Storage;
use chrono::Utc;

pub struct LadderService {
    state: LadderState,
    storage: Storage,
    rule: LadderRule,
}

impl LadderService {
    /// Load state from storage (missing/corrupt file = empty ladder) and
    /// start with the default SWAP_ONLY rule.
    pub fn new(storage: Storage) -> Self {
        let state = storage.load();
        Self {
            state,
            storage,
            rule: LadderRule::default(),
        }
    }

    /// Ordered ladder; index 0 is rank 1.
    pub fn ladder(&self) -> &[Player] {
        &self.state.players
    }

    /// Most recent round's pairings.
    pub fn pairings(&self) -> &[Pairing] {
        &self.state.pairings
    }

    pub fn round(&self) -> u32 {
        self.state.round
    }

    pub fn rule(&self) -> LadderRule {
        self.rule
    }

    /// Set the active promotion rule. Runtime configuration; not persisted.
    pub fn set_rule(&mut self, rule: LadderRule) {
        self.rule = rule;
    }

    /// Append a player at the bottom of the ladder. Returns the new rank.
    pub fn add_player(
        &mut self,
        name: impl Into<String>,
        user_id: Option<UserId>,
    ) -> Result<usize, LadderError> {
        self.state.players.push(Player::new(name, user_id));
        self.persist()?;
        Ok(self.state.players.len())
    }

    /// Remove a player by identifier (rank, mention, or name). Lower-ranked
    /// players shift up implicitly since rank is positional.
    pub fn remove_player(&mut self, identifier: &str) -> Result<Player, LadderError> {
        let idx = self.resolve_or_err(identifier)?;
        let removed = self.state.players.remove(idx);
        self.persist()?;
        Ok(removed)
    }

    /// Move a player to `new_rank` (1-based). A single move, not a swap:
    /// players between the old and new position shift by one slot.
    pub fn set_rank(&mut self, identifier: &str, new_rank: usize) -> Result<String, LadderError> {
        let n = self.state.players.len();
        if n == 0 {
            return Err(LadderError::EmptyLadder);
        }
        if !(1..=n).contains(&new_rank) {
            return Err(LadderError::RankOutOfRange { rank: new_rank, size: n });
        }
        let idx = self.resolve_or_err(identifier)?;
        let player = self.state.players.remove(idx);
        let name = player.name.clone();
        self.state.players.insert(new_rank - 1, player);
        self.persist()?;
        Ok(format!("Moved {} to rank #{}", name, new_rank))
    }

    /// Pair adjacent ranks (1v2, 3v4, ...; odd player count = bye for the last
    /// rank), replace the stored pairings, and bump the round counter.
    pub fn generate_pairings(&mut self) -> Result<Vec<Pairing>, LadderError> {
        self.state.pairings = pairings_for(self.state.players.len());
        self.state.round += 1;
        self.persist()?;
        Ok(self.state.pairings.clone())
    }

    /// Record a reported result: append a history entry capturing pre-match
    /// ranks and names, then reorder the ladder per the active rule.
    /// Validation happens before any mutation, so a failed call leaves both
    /// the ladder and the history untouched.
    pub fn record_result(
        &mut self,
        winner_rank: usize,
        loser_rank: usize,
        score: impl Into<String>,
        reporter_id: Option<UserId>,
    ) -> Result<HistoryEntry, LadderError> {
        let n = self.state.players.len();
        if !(1..=n).contains(&winner_rank) || !(1..=n).contains(&loser_rank) {
            return Err(LadderError::InvalidRankPair { winner_rank, loser_rank, size: n });
        }
        let winner_idx = winner_rank - 1;
        let loser_idx = loser_rank - 1;

        let entry = HistoryEntry {
            timestamp: Utc::now(),
            round: self.state.round,
            winner_rank_pre: winner_rank,
            loser_rank_pre: loser_rank,
            winner: self.state.players[winner_idx].name.clone(),
            loser: self.state.players[loser_idx].name.clone(),
            score: score.into(),
            reporter_id,
            rule: self.rule,
        };
        self.state.history.push(entry.clone());

        apply_rule(&mut self.state.players, self.rule, winner_idx, loser_idx);
        self.persist()?;
        Ok(entry)
    }

    /// Last `limit` history entries in chronological order (oldest of the
    /// window first). Read-only.
    pub fn recent_history(&self, limit: usize) -> &[HistoryEntry] {
        let len = self.state.history.len();
        &self.state.history[len.saturating_sub(limit)..]
    }

    fn resolve_or_err(&self, identifier: &str) -> Result<usize, LadderError> {
        resolve(&self.state.players, identifier).ok_or_else(|| LadderError::UnknownPlayer {
            identifier: identifier.to_string(),
            roster: self.state.roster(),
        })
    }

    fn persist(&self) -> Result<(), LadderError> {
        self.storage
            .save(&self.state)
            .map_err(|e| LadderError::Persist(e.to_string()))
    }
}
