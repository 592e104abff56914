//! Shuffle-and-pair shared by bracket generation and round advancement.

use crate::models::{BracketKey, BracketMatch, TeamId};
use rand::seq::SliceRandom;
use rand::Rng;

/// Build one round from `teams`.
///
/// 1. Uniform shuffle (Fisher-Yates) with the caller's RNG.
/// 2. Pair consecutively: (0, 1), (2, 3), ...
/// 3. Odd count: the trailing team gets a bye, completed at creation.
///
/// Positions follow pairing order, so the bye (if any) is always last.
pub fn shuffle_and_pair<R: Rng + ?Sized>(
    key: BracketKey,
    round: u32,
    mut teams: Vec<TeamId>,
    rng: &mut R,
) -> Vec<BracketMatch> {
    teams.shuffle(rng);

    teams
        .chunks(2)
        .zip(0u32..)
        .map(|(chunk, position)| match *chunk {
            [a, b] => BracketMatch::new(key, round, position, a, b),
            [lone] => BracketMatch::bye(key, round, position, lone),
            _ => unreachable!("chunks(2) yields one or two teams"),
        })
        .collect()
}

/// Number of rounds a bracket of `teams` entrants needs: ceil(log2(teams)).
pub fn rounds_needed(teams: usize) -> u32 {
    if teams <= 1 {
        return 0;
    }
    usize::BITS - (teams - 1).leading_zeros()
}
