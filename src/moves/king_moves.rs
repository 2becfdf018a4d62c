//! King step table and pseudo-legal king destinations.
//!
//! Castling destinations are unioned in as candidates only; whether the king
//! ends up in check is decided later by the executor's legality filter.

use crate::game_state::board_state::BoardState;
use crate::game_state::chess_types::{Color, Square, SquareSet};
use crate::move_generation::special_moves::castling_targets;

pub const KING_ATTACKS: [u64; 64] = generate_king_attacks();

#[inline]
pub const fn king_attacks(square: Square) -> SquareSet {
    SquareSet::from_bits(KING_ATTACKS[square.index() as usize])
}

pub fn king_moves(from: Square, color: Color, board: &BoardState) -> SquareSet {
    (king_attacks(from) & !board.occupancy_of(color)) | castling_targets(from, board)
}

const fn generate_king_attacks() -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let file = (sq % 8) as i32;
        let rank = (sq / 8) as i32;
        let mut attacks = 0u64;

        attacks |= set_if_valid(file - 1, rank - 1);
        attacks |= set_if_valid(file, rank - 1);
        attacks |= set_if_valid(file + 1, rank - 1);
        attacks |= set_if_valid(file - 1, rank);
        attacks |= set_if_valid(file + 1, rank);
        attacks |= set_if_valid(file - 1, rank + 1);
        attacks |= set_if_valid(file, rank + 1);
        attacks |= set_if_valid(file + 1, rank + 1);

        table[sq] = attacks;
        sq += 1;
    }

    table
}

const fn set_if_valid(file: i32, rank: i32) -> u64 {
    if file < 0 || file > 7 || rank < 0 || rank > 7 {
        return 0;
    }

    let square = (rank as usize) * 8 + (file as usize);
    1u64 << square
}

#[cfg(test)]
mod tests {
    use super::{king_attacks, king_moves};
    use crate::game_state::board_state::BoardState;
    use crate::game_state::chess_types::{Color, Square};

    fn sq(name: &str) -> Square {
        name.parse().expect("test square should parse")
    }

    #[test]
    fn king_in_corner_has_three_steps() {
        assert_eq!(king_attacks(sq("a1")).len(), 3);
        assert_eq!(king_attacks(sq("e4")).len(), 8);
    }

    #[test]
    fn boxed_in_king_has_no_moves_at_start() {
        let board = BoardState::standard();
        assert!(king_moves(sq("e1"), Color::White, &board).is_empty());
    }

    #[test]
    fn cleared_back_rank_adds_both_castling_candidates() {
        let mut board = BoardState::standard();
        for name in ["b1", "c1", "d1", "f1", "g1"] {
            board.remove(sq(name));
        }
        let moves = king_moves(sq("e1"), Color::White, &board);
        assert!(moves.contains(sq("g1")));
        assert!(moves.contains(sq("c1")));
        assert!(moves.contains(sq("d1")));
        assert!(moves.contains(sq("f1")));
    }
}
