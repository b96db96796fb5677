//! Utilities for collecting game statistics and testing game and bot implementations.
use std::collections::{HashMap, HashSet};

use internal_iterator::InternalIterator;

use crate::ai::{Bot, SelectError};
use crate::position::Position;

/// The number of move sequences of length `depth` starting from `position`, including transpositions.
/// See <https://www.chessprogramming.org/Perft>.
pub fn perft<P: Position>(position: &P, depth: u32) -> u64 {
    let mut map = HashMap::default();
    perft_recurse(&mut map, position.clone(), depth)
}

fn perft_recurse<P: Position>(map: &mut HashMap<(P, u32), u64>, position: P, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }
    if position.is_terminal() {
        return 0;
    }

    // we need keys (P, depth) because otherwise we risk miscounting if the same position is encountered at different depths
    let key = (position, depth);
    let position = &key.0;

    if let Some(&p) = map.get(&key) {
        return p;
    }

    let mut p = 0;
    position.operators().for_each(|mv: P::Move| {
        if let Ok(child) = position.clone_and_apply(mv) {
            p += perft_recurse(map, child, depth - 1);
        }
    });

    map.insert(key, p);
    p
}

/// Structure returned by [`average_game_stats`].
#[derive(Debug)]
pub struct GameStats {
    pub game_length: f32,
    pub available_moves: f32,
}

/// Return `GameStats` estimated from `n` games starting from `start` played by `bot` for both sides.
pub fn average_game_stats<P: Position>(start: &P, mut bot: impl Bot<P>, n: u64) -> Result<GameStats, SelectError> {
    let mut total_moves = 0;
    let mut total_positions = 0;

    for _ in 0..n {
        let mut position = start.clone();
        while !position.is_terminal() {
            total_moves += position.operators().count();
            total_positions += 1;

            match bot.select_move(&position)? {
                Some(mv) => {
                    if position.apply(mv).is_err() {
                        return Err(SelectError::UnavailableMove(mv.to_string()));
                    }
                }
                None => break,
            }
        }
    }

    Ok(GameStats {
        game_length: total_positions as f32 / n as f32,
        available_moves: total_moves as f32 / total_positions as f32,
    })
}

/// Generate the set of all possible positions reachable from the given position.
/// This function can easily take a long time to terminate or not terminate at all depending on the game.
pub fn all_possible_positions<P: Position>(start: &P, include_terminal: bool) -> Vec<P> {
    let mut set = HashSet::new();
    let mut result = vec![];
    all_possible_positions_impl(start, include_terminal, &mut result, &mut set);
    result
}

fn all_possible_positions_impl<P: Position>(
    start: &P,
    include_terminal: bool,
    result: &mut Vec<P>,
    set: &mut HashSet<P>,
) {
    if !include_terminal && start.is_terminal() {
        return;
    }
    if !set.insert(start.clone()) {
        return;
    }
    result.push(start.clone());

    start.operators().for_each(|mv| {
        if let Ok(child) = start.clone_and_apply(mv) {
            all_possible_positions_impl(&child, include_terminal, result, set)
        }
    })
}
