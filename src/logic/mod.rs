//! Ladder business logic: identifier resolution, pairing generation, promotion rules.

mod pairings;
mod resolver;
mod rules;

pub use pairings::pairings_for;
pub use resolver::{resolve, Identifier};
pub use rules::apply_rule;
