//! Move execution, undo and history review.
//!
//! `play_on_board` / `revert_on_board` are the raw board transitions of a
//! resolved [`Move`]; both verify the board against the record before they
//! touch it and fail with `Inconsistent` otherwise. Everything above them
//! layers history, turn and legality handling on top.

use tracing::{debug, error, warn};

use crate::errors::{ChessError, ChessResult};
use crate::game_state::board_state::BoardState;
use crate::game_state::chess_rules::promotion_rank;
use crate::game_state::chess_types::{Piece, PieceId, PieceKind, Square};
use crate::game_state::game_state::GameState;
use crate::game_state::move_record::Move;
use crate::move_generation::legal_move_checks::is_in_check;
use crate::move_generation::legal_move_generator::legal_targets;
use crate::move_generation::pseudo_legal::pseudo_legal_moves;
use crate::move_generation::simulation::SimulatedMove;
use crate::move_generation::special_moves::{castling_move, en_passant_capture_square, promote_in_place};

/// Resolves a pseudo-legal `from -> to` into a full move record: castling,
/// en passant and promotion (Queen unless `promotion` says otherwise).
pub fn build_move(
    board: &BoardState,
    from: Square,
    to: Square,
    promotion: Option<PieceKind>,
) -> ChessResult<Move> {
    let mover = board
        .occupant_at(from)
        .ok_or_else(|| ChessError::inconsistent(format!("no piece on {from} to move")))?;

    if mover.kind == PieceKind::King && from.file().abs_diff(to.file()) == 2 {
        return castling_move(board, from, to);
    }

    let (captured, is_en_passant) =
        if mover.kind == PieceKind::Pawn && from.file() != to.file() && !board.is_occupied(to) {
            let at = en_passant_capture_square(from, to);
            let victim = board.occupant_at(at).ok_or_else(|| {
                ChessError::inconsistent(format!("no pawn on {at} to take en passant"))
            })?;
            (Some((victim, at)), true)
        } else {
            (board.occupant_at(to).map(|victim| (victim, to)), false)
        };

    let promotion = if mover.kind == PieceKind::Pawn && to.rank() == promotion_rank(mover.color) {
        let kind = promotion.unwrap_or(PieceKind::Queen);
        if !kind.is_promotion_target() {
            return Err(ChessError::InvalidPromotion { kind });
        }
        Some(kind)
    } else {
        None
    };

    Ok(Move {
        mover,
        from,
        to,
        captured,
        castling: None,
        is_en_passant,
        promotion,
    })
}

fn mismatch(message: String) -> ChessError {
    let err = ChessError::inconsistent(message);
    error!(%err, "board does not match move record");
    err
}

fn expect_occupant(board: &BoardState, square: Square, piece: Piece) -> ChessResult<()> {
    match board.occupant_at(square) {
        Some(found) if found == piece => Ok(()),
        found => Err(mismatch(format!(
            "expected {:?} {:?} {} on {square}, found {found:?}",
            piece.color, piece.kind, piece.id
        ))),
    }
}

fn expect_empty(board: &BoardState, square: Square) -> ChessResult<()> {
    match board.occupant_at(square) {
        None => Ok(()),
        Some(found) => Err(mismatch(format!("expected {square} empty, found {found:?}"))),
    }
}

/// Plays `mv` on the board. Nothing is mutated unless the board matches the
/// record's pre-move snapshots.
pub fn play_on_board(board: &mut BoardState, mv: &Move) -> ChessResult<()> {
    expect_occupant(board, mv.from, mv.mover)?;
    match mv.captured {
        Some((victim, at)) => expect_occupant(board, at, victim)?,
        None => expect_empty(board, mv.to)?,
    }
    if mv.captured.is_some_and(|(_, at)| at != mv.to) {
        expect_empty(board, mv.to)?;
    }
    if let Some(castling) = mv.castling {
        expect_occupant(board, castling.rook_from, castling.rook)?;
        expect_empty(board, castling.rook_to)?;
    }

    if let Some((_, at)) = mv.captured {
        board.remove(at);
    }
    board.relocate(mv.from, mv.to)?;
    board.set_has_moved(mv.to, true)?;
    if let Some(kind) = mv.promotion {
        promote_in_place(board, mv.to, kind)?;
    }
    if let Some(castling) = mv.castling {
        board.relocate(castling.rook_from, castling.rook_to)?;
        board.set_has_moved(castling.rook_to, true)?;
    }
    Ok(())
}

/// Exact inverse of [`play_on_board`]: restores the mover (and a promoted
/// pawn's kind), any captured piece and the castling rook with their
/// original moved flags.
pub fn revert_on_board(board: &mut BoardState, mv: &Move) -> ChessResult<()> {
    expect_occupant(board, mv.to, mv.placed_piece())?;
    expect_empty(board, mv.from)?;
    if let Some((_, at)) = mv.captured.filter(|(_, at)| *at != mv.to) {
        expect_empty(board, at)?;
    }
    if let Some(castling) = mv.castling {
        let moved_rook = Piece {
            has_moved: true,
            ..castling.rook
        };
        expect_occupant(board, castling.rook_to, moved_rook)?;
        expect_empty(board, castling.rook_from)?;
    }

    if let Some(castling) = mv.castling {
        board.remove(castling.rook_to);
        board.place(castling.rook_from, castling.rook)?;
    }
    board.remove(mv.to);
    board.place(mv.from, mv.mover)?;
    if let Some((victim, at)) = mv.captured {
        board.place(at, victim)?;
    }
    Ok(())
}

/// Plays `mv` and records it at the history cursor. The side to move is left
/// alone. In review mode the reviewed tail stays behind the inserted entry.
pub fn make_move_in_place(game: &mut GameState, mv: &Move) -> ChessResult<()> {
    play_on_board(&mut game.board, mv)?;
    game.history.push(*mv);
    Ok(())
}

/// Reverts and forgets the move just before the history cursor. The side to
/// move is left alone.
pub fn unmake_move_in_place(game: &mut GameState) -> ChessResult<Move> {
    let mv = *game.history.last().ok_or(ChessError::EmptyHistory)?;
    revert_on_board(&mut game.board, &mv)?;
    game.history.pop();
    Ok(mv)
}

/// Simulates `mv` and reports whether the mover's king is safe afterwards.
pub fn leaves_king_safe(game: &mut GameState, mv: &Move) -> ChessResult<bool> {
    let color = mv.mover.color;
    let simulated = SimulatedMove::new(game, mv)?;
    let safe = !is_in_check(color, &simulated.board);
    simulated.finish()?;
    Ok(safe)
}

/// Whether the piece may legally move to `target`, regardless of whose turn
/// it is. Unknown pieces and inconsistent boards are never legal.
pub fn is_legal(game: &mut GameState, piece_id: PieceId, target: Square) -> bool {
    let Some(from) = game.board.square_of(piece_id) else {
        return false;
    };
    legal_targets(game, from).is_ok_and(|targets| targets.contains(target))
}

/// Validates, simulates and commits a move for the side to move.
pub fn apply_move(
    game: &mut GameState,
    piece_id: PieceId,
    target: Square,
    promotion: Option<PieceKind>,
) -> ChessResult<Move> {
    if game.history.is_reviewing() {
        return Err(ChessError::ReviewActive);
    }
    let (from, piece) = game
        .board
        .piece_by_id(piece_id)
        .ok_or(ChessError::UnknownPiece { piece: piece_id })?;
    if piece.color != game.side_to_move {
        warn!(piece = %piece_id, color = %piece.color, "move out of turn");
        return Err(ChessError::NotYourTurn { color: piece.color });
    }

    let illegal = ChessError::IllegalMove {
        piece: piece_id,
        to: target,
    };
    if !pseudo_legal_moves(from, &game.board, game.last_move()).contains(target) {
        warn!(piece = %piece_id, %from, %target, "move not allowed for piece");
        return Err(illegal);
    }
    let mv = build_move(&game.board, from, target, promotion)?;
    if !leaves_king_safe(game, &mv)? {
        warn!(%mv, "move would leave the king in check");
        return Err(illegal);
    }

    make_move_in_place(game, &mv)?;
    game.flip_turn();
    debug!(%mv, piece = %piece_id, capture = mv.is_capture(), "move applied");
    Ok(mv)
}

/// Takes back the most recent move and hands the turn back.
pub fn undo_move(game: &mut GameState) -> ChessResult<Move> {
    if game.history.is_reviewing() {
        return Err(ChessError::ReviewActive);
    }
    let mv = unmake_move_in_place(game)?;
    game.flip_turn();
    debug!(%mv, "move undone");
    Ok(mv)
}

pub fn undo(game: &mut GameState) -> bool {
    match undo_move(game) {
        Ok(_) => true,
        Err(err) => {
            warn!(%err, "undo rejected");
            false
        }
    }
}

/// Steps the review cursor back one move, reverting it on the board. The
/// history tail is kept for [`review_forward`].
pub fn review_backward(game: &mut GameState) -> ChessResult<Move> {
    let mv = *game.history.last().ok_or(ChessError::EmptyHistory)?;
    revert_on_board(&mut game.board, &mv)?;
    game.history.step_back();
    game.flip_turn();
    Ok(mv)
}

/// Replays the move after the review cursor.
pub fn review_forward(game: &mut GameState) -> ChessResult<Move> {
    let mv = *game
        .history
        .all()
        .get(game.history.cursor())
        .ok_or(ChessError::NothingToReplay)?;
    play_on_board(&mut game.board, &mv)?;
    game.history.step_forward();
    game.flip_turn();
    Ok(mv)
}

/// Replays every reviewed move; returns how many were replayed.
pub fn resume_live(game: &mut GameState) -> ChessResult<usize> {
    let mut replayed = 0;
    while game.history.is_reviewing() {
        review_forward(game)?;
        replayed += 1;
    }
    Ok(replayed)
}
