use crate::game_state::board_state::BoardState;
use crate::game_state::chess_types::{Color, Square, SquareSet};
use crate::moves::sliding_moves::{slide, DIAGONAL_DIRECTIONS};

#[inline]
pub fn bishop_attacks(square: Square, occupancy: SquareSet) -> SquareSet {
    slide(square, &DIAGONAL_DIRECTIONS, occupancy)
}

pub fn bishop_moves(from: Square, color: Color, board: &BoardState) -> SquareSet {
    bishop_attacks(from, board.occupancy()) & !board.occupancy_of(color)
}
