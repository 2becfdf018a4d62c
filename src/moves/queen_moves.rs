use crate::game_state::board_state::BoardState;
use crate::game_state::chess_types::{Color, Square, SquareSet};
use crate::moves::bishop_moves::bishop_attacks;
use crate::moves::rook_moves::rook_attacks;

#[inline]
pub fn queen_attacks(square: Square, occupancy: SquareSet) -> SquareSet {
    bishop_attacks(square, occupancy) | rook_attacks(square, occupancy)
}

pub fn queen_moves(from: Square, color: Color, board: &BoardState) -> SquareSet {
    queen_attacks(from, board.occupancy()) & !board.occupancy_of(color)
}

#[cfg(test)]
mod tests {
    use super::queen_attacks;
    use crate::game_state::chess_types::{Square, SquareSet};

    fn sq(name: &str) -> Square {
        name.parse().expect("test square should parse")
    }

    #[test]
    fn queen_attacks_match_union_of_lines() {
        assert_eq!(queen_attacks(sq("d4"), SquareSet::EMPTY).len(), 27);

        let blockers: SquareSet = [sq("d6"), sq("g7")].into_iter().collect();
        let attacks = queen_attacks(sq("d4"), blockers);
        assert!(attacks.contains(sq("d6")));
        assert!(!attacks.contains(sq("d7")));
        assert!(attacks.contains(sq("g7")));
        assert!(!attacks.contains(sq("h8")));
    }
}
