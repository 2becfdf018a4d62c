use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_types::{Color, PieceId, PieceKind, Square, SquareSet};
use crate::game_state::game_state::GameState;
use crate::game_state::move_record::Move;
use crate::move_generation::legal_move_apply::{build_move, leaves_king_safe};
use crate::move_generation::pseudo_legal::pseudo_legal_moves;

/// Destinations of the piece on `from` that do not leave its own king in
/// check.
pub fn legal_targets(game: &mut GameState, from: Square) -> ChessResult<SquareSet> {
    let candidates = pseudo_legal_moves(from, &game.board, game.last_move());
    let mut targets = SquareSet::EMPTY;
    for to in candidates {
        // Promotion kind does not affect king safety.
        let mv = build_move(&game.board, from, to, None)?;
        if leaves_king_safe(game, &mv)? {
            targets.insert(to);
        }
    }
    Ok(targets)
}

pub fn legal_moves_for_piece(game: &mut GameState, piece_id: PieceId) -> ChessResult<SquareSet> {
    let from = game
        .board
        .square_of(piece_id)
        .ok_or(ChessError::UnknownPiece { piece: piece_id })?;
    legal_targets(game, from)
}

/// Every legal move of `color`. Promotions appear once per promotion kind.
pub fn legal_moves(game: &mut GameState, color: Color) -> ChessResult<Vec<Move>> {
    generate(game, color, false)
}

/// Legal captures of `color`, including en passant.
pub fn capture_moves(game: &mut GameState, color: Color) -> ChessResult<Vec<Move>> {
    generate(game, color, true)
}

pub fn has_any_legal_move(game: &mut GameState, color: Color) -> ChessResult<bool> {
    let origins: Vec<Square> = game.board.pieces_of(color).map(|(square, _)| square).collect();
    for from in origins {
        if !legal_targets(game, from)?.is_empty() {
            return Ok(true);
        }
    }
    Ok(false)
}

fn generate(game: &mut GameState, color: Color, captures_only: bool) -> ChessResult<Vec<Move>> {
    let origins: Vec<Square> = game.board.pieces_of(color).map(|(square, _)| square).collect();
    let mut moves = Vec::with_capacity(40);

    for from in origins {
        let candidates = pseudo_legal_moves(from, &game.board, game.last_move());
        for to in candidates {
            let mv = build_move(&game.board, from, to, None)?;
            if captures_only && !mv.is_capture() {
                continue;
            }
            if !leaves_king_safe(game, &mv)? {
                continue;
            }
            if mv.promotion.is_some() {
                moves.extend(PieceKind::PROMOTIONS.iter().map(|kind| Move {
                    promotion: Some(*kind),
                    ..mv
                }));
            } else {
                moves.push(mv);
            }
        }
    }

    Ok(moves)
}

#[cfg(test)]
mod tests {
    use super::{capture_moves, legal_moves, legal_moves_for_piece};
    use crate::errors::ChessError;
    use crate::game_state::board_state::BoardState;
    use crate::game_state::chess_types::{Color, PieceId, PieceKind, Square};
    use crate::game_state::game_state::GameState;
    use crate::move_generation::legal_move_apply::apply_move;

    fn sq(name: &str) -> Square {
        name.parse().expect("test square should parse")
    }

    #[test]
    fn twenty_moves_from_the_start() {
        let mut game = GameState::new_game();
        let before = game.clone();
        assert_eq!(legal_moves(&mut game, Color::White).expect("consistent").len(), 20);
        assert_eq!(legal_moves(&mut game, Color::Black).expect("consistent").len(), 20);
        assert!(capture_moves(&mut game, Color::White).expect("consistent").is_empty());
        assert_eq!(game, before);
    }

    #[test]
    fn promotion_is_expanded_into_four_moves() {
        let mut board = BoardState::empty();
        board.spawn(sq("a1"), Color::White, PieceKind::King).expect("free");
        board.spawn(sq("h8"), Color::Black, PieceKind::King).expect("free");
        board.spawn(sq("c7"), Color::White, PieceKind::Pawn).expect("free");
        let mut game = GameState::from_board(board, Color::White);

        let promotions: Vec<PieceKind> = legal_moves(&mut game, Color::White)
            .expect("consistent")
            .into_iter()
            .filter_map(|mv| mv.promotion)
            .collect();
        assert_eq!(promotions, PieceKind::PROMOTIONS.to_vec());
    }

    #[test]
    fn en_passant_window_lasts_one_move() {
        let mut board = BoardState::empty();
        board.spawn(sq("e1"), Color::White, PieceKind::King).expect("free");
        board.spawn(sq("e8"), Color::Black, PieceKind::King).expect("free");
        let white_pawn = board.spawn(sq("e5"), Color::White, PieceKind::Pawn).expect("free");
        let black_pawn = board.spawn(sq("d7"), Color::Black, PieceKind::Pawn).expect("free");
        let white_king = PieceId(0);
        let black_king = PieceId(1);
        let mut game = GameState::from_board(board, Color::Black);

        apply_move(&mut game, black_pawn, sq("d5"), None).expect("double step");
        let targets = legal_moves_for_piece(&mut game, white_pawn).expect("pawn on board");
        assert!(targets.contains(sq("d6")));
        let captures = capture_moves(&mut game, Color::White).expect("consistent");
        assert_eq!(captures.len(), 1);
        assert!(captures[0].is_en_passant);

        apply_move(&mut game, white_king, sq("f1"), None).expect("quiet king move");
        apply_move(&mut game, black_king, sq("f8"), None).expect("quiet king move");
        let targets = legal_moves_for_piece(&mut game, white_pawn).expect("pawn on board");
        assert!(!targets.contains(sq("d6")));
    }

    #[test]
    fn unknown_piece_is_reported() {
        let mut game = GameState::new_game();
        assert_eq!(
            legal_moves_for_piece(&mut game, PieceId(77)),
            Err(ChessError::UnknownPiece { piece: PieceId(77) })
        );
    }
}
