//! Canonical chess-rule constants.
//!
//! Home ranks, promotion ranks, castling geometry and the standard starting
//! layout used to seed a new game.

use crate::game_state::chess_types::{Color, PieceKind, Square};

/// Back-rank order from the a-file to the h-file.
pub const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

pub const KING_HOME_FILE: u8 = 4;
pub const KINGSIDE_ROOK_FILE: u8 = 7;
pub const QUEENSIDE_ROOK_FILE: u8 = 0;

#[inline]
pub const fn home_rank(color: Color) -> u8 {
    match color {
        Color::White => 0,
        Color::Black => 7,
    }
}

#[inline]
pub const fn pawn_start_rank(color: Color) -> u8 {
    match color {
        Color::White => 1,
        Color::Black => 6,
    }
}

#[inline]
pub const fn promotion_rank(color: Color) -> u8 {
    match color {
        Color::White => 7,
        Color::Black => 0,
    }
}

#[inline]
pub const fn king_home(color: Color) -> Square {
    Square::at(KING_HOME_FILE, home_rank(color))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastlingSide {
    Kingside,
    Queenside,
}

impl CastlingSide {
    pub const BOTH: [CastlingSide; 2] = [CastlingSide::Kingside, CastlingSide::Queenside];

    /// Corner square the participating rook starts on.
    pub const fn rook_home(self, color: Color) -> Square {
        match self {
            CastlingSide::Kingside => Square::at(KINGSIDE_ROOK_FILE, home_rank(color)),
            CastlingSide::Queenside => Square::at(QUEENSIDE_ROOK_FILE, home_rank(color)),
        }
    }

    /// Where the king lands: two files toward the rook.
    pub const fn king_target(self, color: Color) -> Square {
        match self {
            CastlingSide::Kingside => Square::at(KING_HOME_FILE + 2, home_rank(color)),
            CastlingSide::Queenside => Square::at(KING_HOME_FILE - 2, home_rank(color)),
        }
    }

    /// Where the rook lands: the square the king passed over.
    pub const fn rook_target(self, color: Color) -> Square {
        match self {
            CastlingSide::Kingside => Square::at(KING_HOME_FILE + 1, home_rank(color)),
            CastlingSide::Queenside => Square::at(KING_HOME_FILE - 1, home_rank(color)),
        }
    }

    /// Files strictly between the king and the rook.
    pub const fn between_files(self) -> &'static [u8] {
        match self {
            CastlingSide::Kingside => &[5, 6],
            CastlingSide::Queenside => &[1, 2, 3],
        }
    }
}
