use crate::errors::ChessResult;
use crate::game_state::board_state::BoardState;
use crate::game_state::chess_types::{Color, Piece, PieceKind, Square, SquareSet};
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_generator::has_any_legal_move;
use crate::move_generation::pseudo_legal::attacks_from;
use crate::moves::bishop_moves::bishop_attacks;
use crate::moves::king_moves::king_attacks;
use crate::moves::knight_moves::knight_attacks;
use crate::moves::pawn_moves::pawn_attacks;
use crate::moves::rook_moves::rook_attacks;

#[inline]
fn squares_with(board: &BoardState, color: Color, kinds: &[PieceKind]) -> SquareSet {
    board
        .pieces_of(color)
        .filter(|(_, piece)| kinds.contains(&piece.kind))
        .map(|(square, _)| square)
        .collect()
}

pub fn is_square_attacked(square: Square, by_color: Color, board: &BoardState) -> bool {
    let occupancy = board.occupancy();

    // A pawn of `by_color` attacks `square` iff it stands where a pawn of the
    // other color on `square` would attack.
    let pawns = squares_with(board, by_color, &[PieceKind::Pawn]);
    if !(pawn_attacks(by_color.opposite(), square) & pawns).is_empty() {
        return true;
    }

    let knights = squares_with(board, by_color, &[PieceKind::Knight]);
    if !(knight_attacks(square) & knights).is_empty() {
        return true;
    }

    let kings = squares_with(board, by_color, &[PieceKind::King]);
    if !(king_attacks(square) & kings).is_empty() {
        return true;
    }

    let bishops_queens = squares_with(board, by_color, &[PieceKind::Bishop, PieceKind::Queen]);
    if !(bishop_attacks(square, occupancy) & bishops_queens).is_empty() {
        return true;
    }

    let rooks_queens = squares_with(board, by_color, &[PieceKind::Rook, PieceKind::Queen]);
    !(rook_attacks(square, occupancy) & rooks_queens).is_empty()
}

/// A side without a king on the board is never in check.
#[inline]
pub fn is_in_check(color: Color, board: &BoardState) -> bool {
    let Some(king_square) = board.king_square(color) else {
        return false;
    };
    is_square_attacked(king_square, color.opposite(), board)
}

pub fn attackers_to_square(square: Square, by_color: Color, board: &BoardState) -> Vec<(Square, Piece)> {
    board
        .pieces_of(by_color)
        .filter(|(from, _)| attacks_from(*from, board).contains(square))
        .collect()
}

/// In check with no move that gets out of it.
pub fn is_checkmate(color: Color, game: &mut GameState) -> ChessResult<bool> {
    if !is_in_check(color, &game.board) {
        return Ok(false);
    }
    Ok(!has_any_legal_move(game, color)?)
}

/// Not in check, but every move would leave the king attacked.
pub fn is_stalemate(color: Color, game: &mut GameState) -> ChessResult<bool> {
    if is_in_check(color, &game.board) {
        return Ok(false);
    }
    Ok(!has_any_legal_move(game, color)?)
}

#[cfg(test)]
mod tests {
    use super::{attackers_to_square, is_checkmate, is_in_check, is_square_attacked, is_stalemate};
    use crate::game_state::board_state::BoardState;
    use crate::game_state::chess_types::{Color, PieceKind, Square};
    use crate::game_state::game_state::GameState;

    fn sq(name: &str) -> Square {
        name.parse().expect("test square should parse")
    }

    fn board_with(pieces: &[(&str, Color, PieceKind)]) -> BoardState {
        let mut board = BoardState::empty();
        for (name, color, kind) in pieces {
            board.spawn(sq(name), *color, *kind).expect("distinct squares");
        }
        board
    }

    #[test]
    fn starting_position_has_no_checks() {
        let board = BoardState::standard();
        assert!(!is_in_check(Color::White, &board));
        assert!(!is_in_check(Color::Black, &board));
        assert!(is_square_attacked(sq("f3"), Color::White, &board));
        assert!(!is_square_attacked(sq("e4"), Color::White, &board));
    }

    #[test]
    fn sliders_are_blocked_by_interposed_pieces() {
        let mut board = board_with(&[
            ("e1", Color::White, PieceKind::King),
            ("e8", Color::Black, PieceKind::Rook),
            ("h8", Color::Black, PieceKind::King),
        ]);
        assert!(is_in_check(Color::White, &board));
        board.spawn(sq("e4"), Color::White, PieceKind::Knight).expect("free");
        assert!(!is_in_check(Color::White, &board));
    }

    #[test]
    fn pawn_diagonals_count_as_attacks() {
        let board = board_with(&[
            ("d5", Color::Black, PieceKind::Pawn),
            ("e1", Color::White, PieceKind::King),
            ("e8", Color::Black, PieceKind::King),
        ]);
        assert!(is_square_attacked(sq("e4"), Color::Black, &board));
        assert!(is_square_attacked(sq("c4"), Color::Black, &board));
        assert!(!is_square_attacked(sq("d4"), Color::Black, &board));
    }

    #[test]
    fn attackers_lists_every_checking_piece() {
        let board = board_with(&[
            ("e1", Color::White, PieceKind::King),
            ("e8", Color::Black, PieceKind::Rook),
            ("d3", Color::Black, PieceKind::Knight),
            ("a8", Color::Black, PieceKind::King),
        ]);
        let attackers = attackers_to_square(sq("e1"), Color::Black, &board);
        let squares: Vec<Square> = attackers.iter().map(|(square, _)| *square).collect();
        assert_eq!(squares, vec![sq("d3"), sq("e8")]);
    }

    #[test]
    fn back_rank_mate_is_checkmate() {
        let board = board_with(&[
            ("g1", Color::White, PieceKind::King),
            ("f2", Color::White, PieceKind::Pawn),
            ("g2", Color::White, PieceKind::Pawn),
            ("h2", Color::White, PieceKind::Pawn),
            ("a1", Color::Black, PieceKind::Rook),
            ("g8", Color::Black, PieceKind::King),
        ]);
        let mut game = GameState::from_board(board, Color::White);
        let before = game.clone();
        assert!(is_checkmate(Color::White, &mut game).expect("consistent board"));
        assert!(!is_stalemate(Color::White, &mut game).expect("consistent board"));
        assert_eq!(game, before);
    }

    #[test]
    fn cornered_king_without_moves_is_stalemate() {
        let board = board_with(&[
            ("a8", Color::Black, PieceKind::King),
            ("b6", Color::White, PieceKind::Queen),
            ("h1", Color::White, PieceKind::King),
        ]);
        let mut game = GameState::from_board(board, Color::Black);
        assert!(is_stalemate(Color::Black, &mut game).expect("consistent board"));
        assert!(!is_checkmate(Color::Black, &mut game).expect("consistent board"));
    }
}
