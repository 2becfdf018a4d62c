use std::fmt;

use crate::game_state::chess_types::{Piece, PieceKind, Square};

/// Rook half of a castling move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastlingRecord {
    /// Rook as it stood before castling.
    pub rook: Piece,
    pub rook_from: Square,
    pub rook_to: Square,
}

/// A fully resolved move.
///
/// Holds pre-move snapshots of every piece it touches, so reverting or
/// replaying it never needs to re-derive anything from the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    /// Moving piece as it stood on `from`.
    pub mover: Piece,
    pub from: Square,
    pub to: Square,
    /// Captured piece and the square it was taken from (differs from `to`
    /// for en passant).
    pub captured: Option<(Piece, Square)>,
    pub castling: Option<CastlingRecord>,
    pub is_en_passant: bool,
    pub promotion: Option<PieceKind>,
}

impl Move {
    #[inline]
    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    #[inline]
    pub fn is_castle(&self) -> bool {
        self.castling.is_some()
    }

    pub fn rook_from(&self) -> Option<Square> {
        self.castling.map(|c| c.rook_from)
    }

    pub fn rook_to(&self) -> Option<Square> {
        self.castling.map(|c| c.rook_to)
    }

    pub fn is_double_pawn_push(&self) -> bool {
        self.mover.kind == PieceKind::Pawn && self.from.rank().abs_diff(self.to.rank()) == 2
    }

    /// The piece standing on `to` once the move is played.
    pub fn placed_piece(&self) -> Piece {
        Piece {
            kind: self.promotion.unwrap_or(self.mover.kind),
            has_moved: true,
            ..self.mover
        }
    }
}

impl fmt::Display for Move {
    /// Long algebraic form, e.g. `e2e4`, `e7e8q`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(kind) = self.promotion {
            write!(f, "{}", kind.letter())?;
        }
        Ok(())
    }
}
