use crate::game_state::board_state::BoardState;
use crate::game_state::chess_types::{Color, Square, SquareSet};
use crate::moves::sliding_moves::{slide, ORTHOGONAL_DIRECTIONS};

#[inline]
pub fn rook_attacks(square: Square, occupancy: SquareSet) -> SquareSet {
    slide(square, &ORTHOGONAL_DIRECTIONS, occupancy)
}

pub fn rook_moves(from: Square, color: Color, board: &BoardState) -> SquareSet {
    rook_attacks(from, board.occupancy()) & !board.occupancy_of(color)
}

#[cfg(test)]
mod tests {
    use super::rook_moves;
    use crate::game_state::board_state::BoardState;
    use crate::game_state::chess_types::{Color, PieceKind, Square};

    fn sq(name: &str) -> Square {
        name.parse().expect("test square should parse")
    }

    #[test]
    fn rook_stops_before_friend_and_on_enemy() {
        let mut board = BoardState::empty();
        board.spawn(sq("a1"), Color::White, PieceKind::Rook).expect("free");
        board.spawn(sq("a4"), Color::White, PieceKind::Pawn).expect("free");
        board.spawn(sq("d1"), Color::Black, PieceKind::Knight).expect("free");

        let moves = rook_moves(sq("a1"), Color::White, &board);
        let names: Vec<String> = moves.iter().map(|s| s.to_string()).collect();
        assert_eq!(names, ["b1", "c1", "d1", "a2", "a3"]);
    }
}
