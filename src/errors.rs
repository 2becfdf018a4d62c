//! Errors used throughout the chess engine.
//!
//! `ChessError` is the single error type returned by board storage, move
//! execution, history traversal, search and the game session. Variants fall
//! into three groups:
//!
//! - recoverable user-facing rejections (`IllegalMove`, `NotYourTurn`,
//!   `InvalidCastle`, `EmptyHistory`, ...). These are guaranteed to leave the
//!   board, turn and history untouched;
//! - placement violations (`OccupiedSquare`) which indicate a caller bug;
//! - `Inconsistent`, raised when a revert finds the board in a state the move
//!   record does not describe. This means the apply/undo pairing was broken
//!   somewhere and the game should be discarded.

use thiserror::Error;

use crate::game_state::chess_types::{Color, PieceId, PieceKind, Square};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChessError {
    #[error("square {square} is already occupied")]
    OccupiedSquare { square: Square },

    #[error("illegal move: piece {piece} cannot move to {to}")]
    IllegalMove { piece: PieceId, to: Square },

    #[error("not {color}'s turn")]
    NotYourTurn { color: Color },

    #[error("{target} is not an available castling destination")]
    InvalidCastle { target: Square },

    #[error("there is no move to undo")]
    EmptyHistory,

    #[error("already at the latest move")]
    NothingToReplay,

    #[error("no piece with id {piece} is on the board")]
    UnknownPiece { piece: PieceId },

    #[error("cannot promote to {kind:?}")]
    InvalidPromotion { kind: PieceKind },

    #[error("pawn {pawn} is waiting for a promotion choice")]
    PromotionPending { pawn: PieceId },

    #[error("no promotion is pending for piece {pawn}")]
    NoPendingPromotion { pawn: PieceId },

    #[error("move history is being reviewed; return to the live position first")]
    ReviewActive,

    #[error("the game is over")]
    GameOver,

    #[error("invalid square name: {0:?}")]
    InvalidSquareName(String),

    #[error("internal board inconsistency: {message}")]
    Inconsistent { message: String },
}

impl ChessError {
    pub(crate) fn inconsistent(message: impl Into<String>) -> Self {
        ChessError::Inconsistent {
            message: message.into(),
        }
    }
}

pub type ChessResult<T> = Result<T, ChessError>;
