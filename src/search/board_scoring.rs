//! Pluggable static evaluation.
//!
//! Scores are always from White's point of view; search converts them to the
//! perspective of the side it is searching for.

use crate::game_state::board_state::BoardState;
use crate::game_state::chess_types::{Color, PieceKind};

pub trait BoardScorer: Send + Sync {
    /// Positive when White is better.
    fn score(&self, board: &BoardState) -> i32;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialScorer;

impl MaterialScorer {
    /// The king carries a large finite value so that positions missing one
    /// still order sensibly.
    #[inline]
    pub const fn piece_value(piece: PieceKind) -> i32 {
        match piece {
            PieceKind::Pawn => 1,
            PieceKind::Knight => 3,
            PieceKind::Bishop => 3,
            PieceKind::Rook => 5,
            PieceKind::Queen => 9,
            PieceKind::King => 1000,
        }
    }
}

impl BoardScorer for MaterialScorer {
    fn score(&self, board: &BoardState) -> i32 {
        board
            .pieces()
            .map(|(_, piece)| match piece.color {
                Color::White => Self::piece_value(piece.kind),
                Color::Black => -Self::piece_value(piece.kind),
            })
            .sum()
    }
}

/// Material balance of `board`, positive for White.
#[inline]
pub fn evaluate(board: &BoardState) -> i32 {
    MaterialScorer.score(board)
}

/// Converts a White-relative score to `color`'s point of view.
#[inline]
pub const fn relative_to(color: Color, white_score: i32) -> i32 {
    match color {
        Color::White => white_score,
        Color::Black => -white_score,
    }
}
