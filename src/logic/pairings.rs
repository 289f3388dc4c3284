//! Pairing generation: adjacent ranks play each other.

use crate::models::Pairing;

/// Pair ranks 1-2, 3-4, ... for a ladder of `n` players. If `n` is odd the
/// last (lowest) rank gets a bye, encoded as a second rank of 0.
/// Pure function of `n`; prior rounds do not influence the result.
pub fn pairings_for(n: usize) -> Vec<Pairing> {
    let mut pairings = Vec::with_capacity(n.div_ceil(2));
    let mut i = 1;
    while i <= n {
        if i + 1 <= n {
            pairings.push(Pairing(i, i + 1));
            i += 2;
        } else {
            pairings.push(Pairing(i, 0));
            i += 1;
        }
    }
    pairings
}
