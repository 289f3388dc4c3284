//! Player data structure.

use serde::{Deserialize, Serialize};

/// Numeric id of a linked platform account (e.g. a chat user id).
pub type UserId = u64;

/// A player on the ladder. Rank is positional (index in the ladder), not stored here.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    /// Linked platform account, if any. Unique among players when present.
    pub user_id: Option<UserId>,
}

impl Player {
    pub fn new(name: impl Into<String>, user_id: Option<UserId>) -> Self {
        Self {
            name: name.into(),
            user_id,
        }
    }

    /// Display form: a mention for linked players, otherwise the plain name.
    pub fn display(&self) -> String {
        match self.user_id {
            Some(uid) => format!("<@{uid}>"),
            None => self.name.clone(),
        }
    }
}
