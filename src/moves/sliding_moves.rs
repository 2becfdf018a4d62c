//! Ray walking shared by the sliding pieces.
//!
//! A ray extends one square at a time until it leaves the board or reaches
//! an occupied square. The blocker is included so that friendly blockers can
//! be masked out by the caller and enemy blockers remain as captures.

use crate::game_state::chess_types::{Square, SquareSet};

pub const ORTHOGONAL_DIRECTIONS: [(i8, i8); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];
pub const DIAGONAL_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (-1, 1), (1, -1), (-1, -1)];

pub fn slide(square: Square, directions: &[(i8, i8)], occupancy: SquareSet) -> SquareSet {
    let mut attacks = SquareSet::EMPTY;
    for &(file_step, rank_step) in directions {
        attacks |= trace_ray(square, file_step, rank_step, occupancy);
    }
    attacks
}

fn trace_ray(square: Square, file_step: i8, rank_step: i8, occupancy: SquareSet) -> SquareSet {
    let mut attacks = SquareSet::EMPTY;
    let mut cursor = square.offset(file_step, rank_step);

    while let Some(target) = cursor {
        attacks.insert(target);
        if occupancy.contains(target) {
            break;
        }
        cursor = target.offset(file_step, rank_step);
    }

    attacks
}
