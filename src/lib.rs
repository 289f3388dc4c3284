//! Tennis ladder manager: library with models, logic, storage, and service.

pub mod capabilities;
pub mod logic;
pub mod models;
pub mod service;
pub mod storage;

pub use capabilities::{Authorizer, Notifier, TextGenerator};
pub use logic::{apply_rule, pairings_for, resolve, Identifier};
pub use models::{HistoryEntry, LadderError, LadderRule, LadderState, Pairing, Player, UserId};
pub use service::LadderService;
pub use storage::Storage;
