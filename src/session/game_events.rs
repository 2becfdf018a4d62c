use crate::game_state::chess_types::{Color, Piece, PieceId, Square};
use crate::game_state::move_record::Move;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    /// The given color is in check and has a way out.
    Check(Color),
    Checkmate { winner: Color },
    Stalemate,
}

impl GameStatus {
    pub fn is_over(self) -> bool {
        matches!(self, GameStatus::Checkmate { .. } | GameStatus::Stalemate)
    }

    /// Color whose king is attacked, if any.
    pub fn checked_color(self) -> Option<Color> {
        match self {
            GameStatus::Check(color) => Some(color),
            GameStatus::Checkmate { winner } => Some(winner.opposite()),
            GameStatus::Ongoing | GameStatus::Stalemate => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Committed(Move),
    /// The pawn may reach `to`, but the board waits for a promotion choice.
    PromotionPending { pawn: PieceId, to: Square },
}

/// Notifications delivered to every subscriber of a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    MoveCommitted(Move),
    PieceCaptured { piece: Piece, square: Square },
    PromotionPending { pawn: PieceId, to: Square },
    /// The check state of the position changed; `checked` is the color now
    /// in check, if any.
    CheckStateChanged { checked: Option<Color> },
    GameOver(GameStatus),
    MoveUndone(Move),
}
