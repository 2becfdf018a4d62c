//! Castling, en passant and promotion.
//!
//! Castling eligibility only looks at piece placement and moved flags: the
//! king's current, transit and destination squares are not tested for enemy
//! attack. The executor still rejects any castle that ends with the king in
//! check.

use crate::errors::{ChessError, ChessResult};
use crate::game_state::board_state::BoardState;
use crate::game_state::chess_rules::{king_home, promotion_rank, CastlingSide};
use crate::game_state::chess_types::{Piece, PieceKind, Square, SquareSet};
use crate::game_state::move_record::{CastlingRecord, Move};
use crate::move_generation::legal_move_apply::play_on_board;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CastlingEligibility {
    pub kingside: bool,
    pub queenside: bool,
}

impl CastlingEligibility {
    pub fn allows(self, side: CastlingSide) -> bool {
        match side {
            CastlingSide::Kingside => self.kingside,
            CastlingSide::Queenside => self.queenside,
        }
    }
}

/// Which sides the king on `king_square` may castle toward.
pub fn castling_eligibility(king_square: Square, board: &BoardState) -> CastlingEligibility {
    let mut eligibility = CastlingEligibility::default();

    let Some(king) = board.occupant_at(king_square) else {
        return eligibility;
    };
    if king.kind != PieceKind::King || king.has_moved || king_square != king_home(king.color) {
        return eligibility;
    }

    for side in CastlingSide::BOTH {
        let rook_ready = board
            .occupant_at(side.rook_home(king.color))
            .is_some_and(|rook| {
                rook.kind == PieceKind::Rook && rook.color == king.color && !rook.has_moved
            });
        let path_clear = side
            .between_files()
            .iter()
            .all(|&file| !board.is_occupied(Square::at(file, king_square.rank())));

        if rook_ready && path_clear {
            match side {
                CastlingSide::Kingside => eligibility.kingside = true,
                CastlingSide::Queenside => eligibility.queenside = true,
            }
        }
    }

    eligibility
}

/// King destinations for every currently eligible castling side.
pub fn castling_targets(king_square: Square, board: &BoardState) -> SquareSet {
    let Some(king) = board.occupant_at(king_square) else {
        return SquareSet::EMPTY;
    };
    let eligibility = castling_eligibility(king_square, board);
    CastlingSide::BOTH
        .into_iter()
        .filter(|side| eligibility.allows(*side))
        .map(|side| side.king_target(king.color))
        .collect()
}

pub fn castling_side(
    king_square: Square,
    target: Square,
    board: &BoardState,
) -> ChessResult<CastlingSide> {
    let king = board
        .occupant_at(king_square)
        .ok_or(ChessError::InvalidCastle { target })?;
    let eligibility = castling_eligibility(king_square, board);
    CastlingSide::BOTH
        .into_iter()
        .find(|side| eligibility.allows(*side) && side.king_target(king.color) == target)
        .ok_or(ChessError::InvalidCastle { target })
}

/// Builds the compound king + rook record without touching the board.
pub fn castling_move(board: &BoardState, king_square: Square, target: Square) -> ChessResult<Move> {
    let side = castling_side(king_square, target, board)?;
    let king = board
        .occupant_at(king_square)
        .ok_or(ChessError::InvalidCastle { target })?;
    let rook_from = side.rook_home(king.color);
    let rook = board
        .occupant_at(rook_from)
        .ok_or_else(|| ChessError::inconsistent(format!("castling rook missing from {rook_from}")))?;

    Ok(Move {
        mover: king,
        from: king_square,
        to: target,
        captured: None,
        castling: Some(CastlingRecord {
            rook,
            rook_from,
            rook_to: side.rook_target(king.color),
        }),
        is_en_passant: false,
        promotion: None,
    })
}

/// Moves the king two squares toward the chosen rook and the rook onto the
/// square the king crossed, marking both as moved.
pub fn execute_castling(
    board: &mut BoardState,
    king_square: Square,
    target: Square,
) -> ChessResult<Move> {
    let mv = castling_move(board, king_square, target)?;
    play_on_board(board, &mv)?;
    Ok(mv)
}

/// Square a pawn on `pawn_square` may capture onto en passant, given the
/// move played immediately before.
pub fn en_passant_target(
    pawn_square: Square,
    board: &BoardState,
    last_move: Option<&Move>,
) -> Option<Square> {
    let pawn = board.occupant_at(pawn_square)?;
    let last = last_move?;

    if pawn.kind != PieceKind::Pawn
        || last.mover.color == pawn.color
        || !last.is_double_pawn_push()
        || last.to.rank() != pawn_square.rank()
        || last.to.file().abs_diff(pawn_square.file()) != 1
    {
        return None;
    }

    let victim_in_place = board
        .occupant_at(last.to)
        .is_some_and(|victim| victim.id == last.mover.id);
    if !victim_in_place {
        return None;
    }

    let target = last.to.offset(0, pawn.color.forward())?;
    (!board.is_occupied(target)).then_some(target)
}

/// Square of the pawn removed by an en passant capture landing on `target`.
#[inline]
pub fn en_passant_capture_square(from: Square, target: Square) -> Square {
    Square::at(target.file(), from.rank())
}

/// True when the pawn on `square` stands on its last rank.
pub fn check_promotion(square: Square, board: &BoardState) -> bool {
    board.occupant_at(square).is_some_and(|piece| {
        piece.kind == PieceKind::Pawn && square.rank() == promotion_rank(piece.color)
    })
}

/// Replaces the pawn on `square` with `kind`, keeping its identity.
pub fn promote_in_place(board: &mut BoardState, square: Square, kind: PieceKind) -> ChessResult<Piece> {
    if !kind.is_promotion_target() {
        return Err(ChessError::InvalidPromotion { kind });
    }
    if !check_promotion(square, board) {
        return Err(ChessError::inconsistent(format!(
            "no pawn on a promotion square at {square}"
        )));
    }
    let pawn = board.replace_kind(square, kind)?;
    Ok(Piece { kind, ..pawn })
}

#[cfg(test)]
mod tests {
    use super::{
        castling_eligibility, check_promotion, en_passant_target, execute_castling,
        CastlingEligibility,
    };
    use crate::errors::ChessError;
    use crate::game_state::board_state::BoardState;
    use crate::game_state::chess_types::{Color, PieceKind, Square};

    fn sq(name: &str) -> Square {
        name.parse().expect("test square should parse")
    }

    fn castling_board() -> BoardState {
        let mut board = BoardState::empty();
        board.spawn(sq("e1"), Color::White, PieceKind::King).expect("free");
        board.spawn(sq("a1"), Color::White, PieceKind::Rook).expect("free");
        board.spawn(sq("h1"), Color::White, PieceKind::Rook).expect("free");
        board.spawn(sq("e8"), Color::Black, PieceKind::King).expect("free");
        board
    }

    #[test]
    fn both_sides_available_with_clear_back_rank() {
        let board = castling_board();
        assert_eq!(
            castling_eligibility(sq("e1"), &board),
            CastlingEligibility {
                kingside: true,
                queenside: true
            }
        );
    }

    #[test]
    fn moved_rook_disables_only_its_side() {
        let mut board = castling_board();
        board.set_has_moved(sq("h1"), true).expect("rook on h1");
        let eligibility = castling_eligibility(sq("e1"), &board);
        assert!(!eligibility.kingside);
        assert!(eligibility.queenside);
    }

    #[test]
    fn enemy_rook_in_the_corner_does_not_count() {
        let mut board = castling_board();
        board.remove(sq("a1"));
        board.spawn(sq("a1"), Color::Black, PieceKind::Rook).expect("free");
        assert!(!castling_eligibility(sq("e1"), &board).queenside);
    }

    #[test]
    fn execute_castling_moves_both_pieces_and_marks_them() {
        let mut board = castling_board();
        let mv = execute_castling(&mut board, sq("e1"), sq("c1")).expect("queenside castle");

        assert_eq!(mv.rook_from(), Some(sq("a1")));
        assert_eq!(mv.rook_to(), Some(sq("d1")));
        let king = board.occupant_at(sq("c1")).expect("king landed");
        let rook = board.occupant_at(sq("d1")).expect("rook landed");
        assert_eq!(king.kind, PieceKind::King);
        assert_eq!(rook.kind, PieceKind::Rook);
        assert!(king.has_moved && rook.has_moved);
        assert!(!board.is_occupied(sq("e1")));
        assert!(!board.is_occupied(sq("a1")));
    }

    #[test]
    fn execute_castling_rejects_non_castling_target() {
        let mut board = castling_board();
        let before = board.clone();
        let err = execute_castling(&mut board, sq("e1"), sq("f1")).expect_err("f1 is no castle");
        assert_eq!(err, ChessError::InvalidCastle { target: sq("f1") });
        assert_eq!(board, before);
    }

    #[test]
    fn en_passant_needs_a_fresh_adjacent_double_step() {
        use crate::game_state::game_state::GameState;
        use crate::move_generation::legal_move_apply::apply_move;

        let mut board = BoardState::empty();
        board.spawn(sq("e1"), Color::White, PieceKind::King).expect("free");
        board.spawn(sq("e8"), Color::Black, PieceKind::King).expect("free");
        let white_pawn = board.spawn(sq("e5"), Color::White, PieceKind::Pawn).expect("free");
        let black_pawn = board.spawn(sq("d7"), Color::Black, PieceKind::Pawn).expect("free");
        let mut game = GameState::from_board(board, Color::Black);

        apply_move(&mut game, black_pawn, sq("d5"), None).expect("double step");
        assert_eq!(
            en_passant_target(sq("e5"), &game.board, game.last_move()),
            Some(sq("d6"))
        );
        assert!(game.board.square_of(white_pawn).is_some());
    }

    #[test]
    fn promotion_triggers_on_last_rank_only() {
        let mut board = BoardState::empty();
        board.spawn(sq("a8"), Color::White, PieceKind::Pawn).expect("free");
        board.spawn(sq("b7"), Color::White, PieceKind::Pawn).expect("free");
        board.spawn(sq("c1"), Color::Black, PieceKind::Pawn).expect("free");
        assert!(check_promotion(sq("a8"), &board));
        assert!(!check_promotion(sq("b7"), &board));
        assert!(check_promotion(sq("c1"), &board));
    }
}
