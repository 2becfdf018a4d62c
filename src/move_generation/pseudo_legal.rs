//! Per-piece move candidates, ignoring whether the mover's king ends up in
//! check.

use crate::game_state::board_state::BoardState;
use crate::game_state::chess_types::{PieceKind, Square, SquareSet};
use crate::game_state::move_record::Move;
use crate::moves::bishop_moves::{bishop_attacks, bishop_moves};
use crate::moves::king_moves::{king_attacks, king_moves};
use crate::moves::knight_moves::{knight_attacks, knight_moves};
use crate::moves::pawn_moves::{pawn_attacks, pawn_moves};
use crate::moves::queen_moves::{queen_attacks, queen_moves};
use crate::moves::rook_moves::{rook_attacks, rook_moves};

/// Destination squares for the piece on `square`, including castling and en
/// passant candidates. Empty when the square is empty.
pub fn pseudo_legal_moves(square: Square, board: &BoardState, last_move: Option<&Move>) -> SquareSet {
    let Some(piece) = board.occupant_at(square) else {
        return SquareSet::EMPTY;
    };

    match piece.kind {
        PieceKind::Pawn => pawn_moves(square, piece.color, board, last_move),
        PieceKind::Knight => knight_moves(square, piece.color, board),
        PieceKind::Bishop => bishop_moves(square, piece.color, board),
        PieceKind::Rook => rook_moves(square, piece.color, board),
        PieceKind::Queen => queen_moves(square, piece.color, board),
        PieceKind::King => king_moves(square, piece.color, board),
    }
}

/// Squares the piece on `square` attacks. Pawns attack both forward
/// diagonals whether or not anything stands there; castling is never an
/// attack.
pub fn attacks_from(square: Square, board: &BoardState) -> SquareSet {
    let Some(piece) = board.occupant_at(square) else {
        return SquareSet::EMPTY;
    };
    let occupancy = board.occupancy();

    match piece.kind {
        PieceKind::Pawn => pawn_attacks(piece.color, square),
        PieceKind::Knight => knight_attacks(square),
        PieceKind::Bishop => bishop_attacks(square, occupancy),
        PieceKind::Rook => rook_attacks(square, occupancy),
        PieceKind::Queen => queen_attacks(square, occupancy),
        PieceKind::King => king_attacks(square),
    }
}
