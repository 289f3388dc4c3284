//! Promotion rule engine: reorder the ladder after a reported result.

use crate::models::{LadderRule, Player};

/// Apply the active promotion rule to the ladder. `winner_idx` and
/// `loser_idx` are 0-based positions, already validated against the ladder.
///
/// SWAP_ONLY: swap winner and loser only when the winner sat below the loser
/// (an upset); the expected outcome leaves the ladder untouched.
///
/// ONE_STEP_ALWAYS: the winner swaps one slot up (unless at rank 1), then the
/// loser swaps one slot down (unless last). The two steps interact when the
/// loser sat directly above the winner: the winner's upward swap moves the
/// loser into the winner's old slot, so the loser's index is re-pointed there
/// before the downward swap.
pub fn apply_rule(players: &mut [Player], rule: LadderRule, winner_idx: usize, loser_idx: usize) {
    match rule {
        LadderRule::SwapOnly => {
            if winner_idx > loser_idx {
                players.swap(winner_idx, loser_idx);
            }
        }
        LadderRule::OneStepAlways => {
            let mut loser_idx = loser_idx;
            if winner_idx > 0 {
                players.swap(winner_idx - 1, winner_idx);
                if loser_idx == winner_idx - 1 {
                    loser_idx = winner_idx;
                }
            }
            if loser_idx + 1 < players.len() {
                players.swap(loser_idx, loser_idx + 1);
            }
        }
    }
}
