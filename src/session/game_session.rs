//! The owner object for one game, exposing the external interface to
//! surrounding layers.
//!
//! A session holds the game state and the AI player, validates requests,
//! and broadcasts a [`GameEvent`] to every subscriber for each change it
//! commits.

use std::sync::mpsc::{self, Receiver, Sender};

use tracing::{info, warn};

use crate::engines::ai_player::{AiPlayer, Difficulty, SearchConfig};
use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_rules::promotion_rank;
use crate::game_state::chess_types::{Color, PieceId, PieceKind, Square, SquareSet};
use crate::game_state::game_state::GameState;
use crate::game_state::move_record::Move;
use crate::move_generation::legal_move_apply::{apply_move, is_legal, review_backward, review_forward, undo_move};
use crate::move_generation::legal_move_checks::is_in_check;
use crate::move_generation::legal_move_generator::{has_any_legal_move, legal_moves_for_piece};
use crate::session::game_events::{GameEvent, GameStatus, MoveOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingPromotion {
    pawn: PieceId,
    to: Square,
}

pub struct GameSession {
    game: GameState,
    ai: AiPlayer,
    status: GameStatus,
    pending_promotion: Option<PendingPromotion>,
    subscribers: Vec<Sender<GameEvent>>,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}

impl GameSession {
    /// New game from the standard position.
    pub fn new(config: SearchConfig) -> Self {
        Self {
            game: GameState::new_game(),
            ai: AiPlayer::new(config),
            status: GameStatus::Ongoing,
            pending_promotion: None,
            subscribers: Vec::new(),
        }
    }

    /// Session over a composed position.
    pub fn from_game(game: GameState, ai: AiPlayer) -> ChessResult<Self> {
        game.board.validate_kings()?;
        let mut session = Self {
            game,
            ai,
            status: GameStatus::Ongoing,
            pending_promotion: None,
            subscribers: Vec::new(),
        };
        session.status = compute_status(&mut session.game)?;
        Ok(session)
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn subscribe(&mut self) -> Receiver<GameEvent> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    fn emit(&mut self, event: GameEvent) {
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }

    fn ensure_accepting_moves(&self) -> ChessResult<()> {
        if let Some(pending) = self.pending_promotion {
            return Err(ChessError::PromotionPending { pawn: pending.pawn });
        }
        if self.game.history.is_reviewing() {
            return Err(ChessError::ReviewActive);
        }
        if self.status.is_over() {
            return Err(ChessError::GameOver);
        }
        Ok(())
    }

    /// Moves a piece for the side to move. A pawn reaching its last rank is
    /// held until [`GameSession::request_promotion_choice`].
    pub fn request_move(&mut self, piece_id: PieceId, target: Square) -> ChessResult<MoveOutcome> {
        self.ensure_accepting_moves()?;

        let (_, piece) = self
            .game
            .board
            .piece_by_id(piece_id)
            .ok_or(ChessError::UnknownPiece { piece: piece_id })?;
        let promotes = piece.kind == PieceKind::Pawn && target.rank() == promotion_rank(piece.color);

        if !promotes {
            let mv = apply_move(&mut self.game, piece_id, target, None)?;
            self.after_commit(&mv)?;
            return Ok(MoveOutcome::Committed(mv));
        }

        if piece.color != self.game.side_to_move {
            return Err(ChessError::NotYourTurn { color: piece.color });
        }
        if !is_legal(&mut self.game, piece_id, target) {
            warn!(piece = %piece_id, %target, "promotion move rejected");
            return Err(ChessError::IllegalMove {
                piece: piece_id,
                to: target,
            });
        }
        self.pending_promotion = Some(PendingPromotion {
            pawn: piece_id,
            to: target,
        });
        self.emit(GameEvent::PromotionPending {
            pawn: piece_id,
            to: target,
        });
        Ok(MoveOutcome::PromotionPending {
            pawn: piece_id,
            to: target,
        })
    }

    /// Completes a pending promotion with the chosen kind.
    pub fn request_promotion_choice(&mut self, pawn: PieceId, kind: PieceKind) -> ChessResult<Move> {
        let pending = self
            .pending_promotion
            .filter(|pending| pending.pawn == pawn)
            .ok_or(ChessError::NoPendingPromotion { pawn })?;
        if !kind.is_promotion_target() {
            return Err(ChessError::InvalidPromotion { kind });
        }

        let mv = apply_move(&mut self.game, pawn, pending.to, Some(kind))?;
        self.pending_promotion = None;
        self.after_commit(&mv)?;
        Ok(mv)
    }

    /// Takes back the last move. A pending promotion is cancelled instead,
    /// since it has not touched the board yet.
    pub fn request_undo(&mut self) -> bool {
        if self.pending_promotion.take().is_some() {
            return true;
        }
        match undo_move(&mut self.game) {
            Ok(mv) => {
                self.emit(GameEvent::MoveUndone(mv));
                self.refresh_status(true).is_ok()
            }
            Err(err) => {
                warn!(%err, "undo rejected");
                false
            }
        }
    }

    pub fn request_review_backward(&mut self) -> bool {
        if self.pending_promotion.is_some() {
            return false;
        }
        review_backward(&mut self.game).is_ok() && self.refresh_status(false).is_ok()
    }

    pub fn request_review_forward(&mut self) -> bool {
        review_forward(&mut self.game).is_ok() && self.refresh_status(false).is_ok()
    }

    /// Legal destinations of a piece; empty for unknown pieces and once the
    /// game is over.
    pub fn query_legal_moves(&mut self, piece_id: PieceId) -> SquareSet {
        if self.status.is_over() {
            return SquareSet::EMPTY;
        }
        legal_moves_for_piece(&mut self.game, piece_id).unwrap_or_else(|err| {
            warn!(%err, piece = %piece_id, "legal move query failed");
            SquareSet::EMPTY
        })
    }

    /// Status of the position currently on the board.
    pub fn query_game_status(&self) -> GameStatus {
        self.status
    }

    /// Lets the AI play one move for `color`. `Ok(None)` when it has no
    /// legal move.
    pub fn request_ai_move(&mut self, difficulty: Difficulty, color: Color) -> ChessResult<Option<Move>> {
        self.ensure_accepting_moves()?;
        if color != self.game.side_to_move {
            return Err(ChessError::NotYourTurn { color });
        }

        let Some(choice) = self.ai.choose_move(&mut self.game, difficulty, color)? else {
            return Ok(None);
        };
        let mv = apply_move(&mut self.game, choice.mover.id, choice.to, choice.promotion)?;
        self.after_commit(&mv)?;
        Ok(Some(mv))
    }

    fn after_commit(&mut self, mv: &Move) -> ChessResult<()> {
        self.emit(GameEvent::MoveCommitted(*mv));
        if let Some((piece, square)) = mv.captured {
            self.emit(GameEvent::PieceCaptured { piece, square });
        }
        self.refresh_status(true)
    }

    fn refresh_status(&mut self, notify: bool) -> ChessResult<()> {
        let previous = self.status;
        self.status = compute_status(&mut self.game)?;
        if !notify {
            return Ok(());
        }

        if previous.checked_color() != self.status.checked_color() {
            self.emit(GameEvent::CheckStateChanged {
                checked: self.status.checked_color(),
            });
        }
        if self.status.is_over() && !previous.is_over() {
            info!(status = ?self.status, moves = self.game.history.len(), "game over");
            self.emit(GameEvent::GameOver(self.status));
        }
        Ok(())
    }
}

fn compute_status(game: &mut GameState) -> ChessResult<GameStatus> {
    let color = game.side_to_move;
    let in_check = is_in_check(color, &game.board);
    let can_move = has_any_legal_move(game, color)?;
    Ok(match (in_check, can_move) {
        (true, false) => GameStatus::Checkmate {
            winner: color.opposite(),
        },
        (false, false) => GameStatus::Stalemate,
        (true, true) => GameStatus::Check(color),
        (false, true) => GameStatus::Ongoing,
    })
}

#[cfg(test)]
mod tests {
    use super::GameSession;
    use crate::engines::ai_player::{AiPlayer, Difficulty, SearchConfig};
    use crate::errors::ChessError;
    use crate::game_state::board_state::BoardState;
    use crate::game_state::chess_types::{Color, PieceId, PieceKind, Square};
    use crate::game_state::game_state::GameState;
    use crate::session::game_events::{GameEvent, GameStatus, MoveOutcome};

    fn sq(name: &str) -> Square {
        name.parse().expect("test square should parse")
    }

    fn id_on(session: &GameSession, name: &str) -> PieceId {
        session.game().board.occupant_at(sq(name)).expect("occupied").id
    }

    fn promotion_session() -> GameSession {
        let mut board = BoardState::empty();
        board.spawn(sq("e1"), Color::White, PieceKind::King).expect("free");
        board.spawn(sq("h6"), Color::Black, PieceKind::King).expect("free");
        board.spawn(sq("b7"), Color::White, PieceKind::Pawn).expect("free");
        GameSession::from_game(
            GameState::from_board(board, Color::White),
            AiPlayer::with_seed(SearchConfig::default(), 1),
        )
        .expect("valid position")
    }

    #[test]
    fn committed_move_is_broadcast() {
        let mut session = GameSession::default();
        let events = session.subscribe();
        let pawn = id_on(&session, "e2");

        let outcome = session.request_move(pawn, sq("e4")).expect("legal");
        let MoveOutcome::Committed(mv) = outcome else {
            panic!("expected a committed move, got {outcome:?}");
        };
        assert_eq!(events.try_recv(), Ok(GameEvent::MoveCommitted(mv)));
        assert!(events.try_recv().is_err());
        assert_eq!(session.query_game_status(), GameStatus::Ongoing);
    }

    #[test]
    fn promotion_waits_for_a_choice() {
        let mut session = promotion_session();
        let events = session.subscribe();
        let pawn = id_on(&session, "b7");
        let before = session.game().clone();

        let outcome = session.request_move(pawn, sq("b8")).expect("legal promotion");
        assert_eq!(outcome, MoveOutcome::PromotionPending { pawn, to: sq("b8") });
        assert_eq!(session.game(), &before);
        assert_eq!(
            events.try_recv(),
            Ok(GameEvent::PromotionPending { pawn, to: sq("b8") })
        );

        let king = id_on(&session, "e1");
        assert_eq!(
            session.request_move(king, sq("e2")),
            Err(ChessError::PromotionPending { pawn })
        );
        assert_eq!(
            session.request_promotion_choice(pawn, PieceKind::King),
            Err(ChessError::InvalidPromotion {
                kind: PieceKind::King
            })
        );

        let mv = session
            .request_promotion_choice(pawn, PieceKind::Knight)
            .expect("knight promotion");
        assert_eq!(mv.promotion, Some(PieceKind::Knight));
        assert_eq!(
            session.game().board.occupant_at(sq("b8")).map(|p| p.kind),
            Some(PieceKind::Knight)
        );
        assert_eq!(
            session.request_promotion_choice(pawn, PieceKind::Queen),
            Err(ChessError::NoPendingPromotion { pawn })
        );
    }

    #[test]
    fn mate_ends_the_game() {
        let mut board = BoardState::empty();
        board.spawn(sq("g1"), Color::White, PieceKind::King).expect("free");
        let rook = board.spawn(sq("a1"), Color::White, PieceKind::Rook).expect("free");
        board.spawn(sq("h8"), Color::Black, PieceKind::King).expect("free");
        board.spawn(sq("g7"), Color::Black, PieceKind::Pawn).expect("free");
        board.spawn(sq("h7"), Color::Black, PieceKind::Pawn).expect("free");
        let mut session = GameSession::from_game(
            GameState::from_board(board, Color::White),
            AiPlayer::default(),
        )
        .expect("valid position");
        let events = session.subscribe();

        session.request_move(rook, sq("a8")).expect("mating move");
        let winner = GameStatus::Checkmate {
            winner: Color::White,
        };
        assert_eq!(session.query_game_status(), winner);

        let received: Vec<GameEvent> = events.try_iter().collect();
        assert!(received.contains(&GameEvent::CheckStateChanged {
            checked: Some(Color::Black)
        }));
        assert_eq!(received.last(), Some(&GameEvent::GameOver(winner)));

        let black_king = id_on(&session, "h8");
        assert_eq!(
            session.request_move(black_king, sq("g8")),
            Err(ChessError::GameOver)
        );
        assert_eq!(
            session.request_ai_move(Difficulty::MAX, Color::Black),
            Err(ChessError::GameOver)
        );

        assert!(session.request_undo());
        assert_eq!(session.query_game_status(), GameStatus::Ongoing);
    }

    #[test]
    fn review_steps_report_the_reviewed_position() {
        let mut session = GameSession::default();
        for (from, to) in [("e2", "e4"), ("f7", "f5"), ("e4", "f5"), ("g7", "g5"), ("d1", "h5")] {
            let piece = id_on(&session, from);
            session.request_move(piece, sq(to)).expect("legal");
        }
        let mate = GameStatus::Checkmate {
            winner: Color::White,
        };
        assert_eq!(session.query_game_status(), mate);
        let knight = id_on(&session, "b1");
        assert!(session.query_legal_moves(knight).is_empty());

        assert!(session.request_review_backward());
        assert_eq!(session.game().history.cursor(), 4);
        assert_eq!(session.query_game_status(), GameStatus::Ongoing);
        let targets = session.query_legal_moves(knight);
        assert_eq!(targets.len(), 3);
        assert!(targets.contains(sq("a3")) && targets.contains(sq("c3")) && targets.contains(sq("e2")));

        assert!(session.request_review_backward());
        assert_eq!(session.game().history.cursor(), 3);
        assert_eq!(session.game().side_to_move, Color::Black);
        assert_eq!(session.query_game_status(), GameStatus::Ongoing);
        assert_eq!(session.game().history.len(), 5);

        let black_pawn = id_on(&session, "g7");
        assert_eq!(
            session.request_move(black_pawn, sq("g5")),
            Err(ChessError::ReviewActive)
        );

        assert!(session.request_review_forward());
        assert!(session.request_review_forward());
        assert!(!session.request_review_forward());
        assert_eq!(session.query_game_status(), mate);
        assert_eq!(session.game().history.len(), 5);
    }

    #[test]
    fn ai_plays_for_the_side_to_move_only() {
        let mut session = GameSession::new(SearchConfig {
            time_budget_ms: 200,
            ..SearchConfig::default()
        });
        assert_eq!(
            session.request_ai_move(Difficulty::MIN, Color::Black),
            Err(ChessError::NotYourTurn {
                color: Color::Black
            })
        );
        let mv = session
            .request_ai_move(Difficulty::MIN, Color::White)
            .expect("ai runs")
            .expect("white has moves");
        assert_eq!(mv.mover.color, Color::White);
        assert_eq!(session.game().side_to_move, Color::Black);
    }

    #[test]
    fn dropped_subscribers_are_pruned() {
        let mut session = GameSession::default();
        let kept = session.subscribe();
        drop(session.subscribe());
        let knight = id_on(&session, "g1");
        session.request_move(knight, sq("f3")).expect("legal");
        assert_eq!(kept.try_iter().count(), 1);
    }
}
