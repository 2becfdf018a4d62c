//! Pawn attack tables and pseudo-legal pawn destinations.

use crate::game_state::board_state::BoardState;
use crate::game_state::chess_rules::pawn_start_rank;
use crate::game_state::chess_types::{Color, Square, SquareSet};
use crate::game_state::move_record::Move;
use crate::move_generation::special_moves::en_passant_target;

pub const WHITE_PAWN_ATTACKS: [u64; 64] = generate_white_pawn_attacks();
pub const BLACK_PAWN_ATTACKS: [u64; 64] = generate_black_pawn_attacks();

/// Diagonal squares a pawn attacks, whether or not anything stands there.
#[inline]
pub const fn pawn_attacks(color: Color, square: Square) -> SquareSet {
    let bits = match color {
        Color::White => WHITE_PAWN_ATTACKS[square.index() as usize],
        Color::Black => BLACK_PAWN_ATTACKS[square.index() as usize],
    };
    SquareSet::from_bits(bits)
}

/// Forward steps, diagonal captures onto enemies, and the en passant target
/// opened by `last_move`.
pub fn pawn_moves(
    from: Square,
    color: Color,
    board: &BoardState,
    last_move: Option<&Move>,
) -> SquareSet {
    let mut moves = SquareSet::EMPTY;

    if let Some(one_step) = from.offset(0, color.forward()) {
        if !board.is_occupied(one_step) {
            moves.insert(one_step);

            if from.rank() == pawn_start_rank(color) {
                if let Some(two_step) = one_step.offset(0, color.forward()) {
                    if !board.is_occupied(two_step) {
                        moves.insert(two_step);
                    }
                }
            }
        }
    }

    moves |= pawn_attacks(color, from) & board.occupancy_of(color.opposite());

    if let Some(target) = en_passant_target(from, board, last_move) {
        moves.insert(target);
    }

    moves
}

const fn generate_white_pawn_attacks() -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let file = sq % 8;
        let rank = sq / 8;
        let mut attacks = 0u64;

        if rank < 7 {
            if file > 0 {
                attacks |= 1u64 << (sq + 7);
            }
            if file < 7 {
                attacks |= 1u64 << (sq + 9);
            }
        }

        table[sq] = attacks;
        sq += 1;
    }

    table
}

const fn generate_black_pawn_attacks() -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let file = sq % 8;
        let rank = sq / 8;
        let mut attacks = 0u64;

        if rank > 0 {
            if file > 0 {
                attacks |= 1u64 << (sq - 9);
            }
            if file < 7 {
                attacks |= 1u64 << (sq - 7);
            }
        }

        table[sq] = attacks;
        sq += 1;
    }

    table
}
