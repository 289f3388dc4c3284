//! Data structures for the ladder: players, state, history, rules, errors.

mod history;
mod player;
mod state;

pub use history::HistoryEntry;
pub use player::{Player, UserId};
pub use state::{LadderError, LadderRule, LadderState, Pairing};
