//! Authoritative square-to-piece storage.
//!
//! `BoardState` is the only place a piece's location is recorded. It knows
//! nothing about chess rules: it enforces "at most one piece per square" and
//! answers occupancy queries for the rule, check and search layers.

use std::fmt;

use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_rules::{home_rank, pawn_start_rank, BACK_RANK};
use crate::game_state::chess_types::{Color, Piece, PieceId, PieceKind, Square, SquareSet};
use crate::utils::render_game_state::render_board;

#[derive(Debug, Clone)]
pub struct BoardState {
    squares: [Option<Piece>; 64],
    next_id: u16,
}

impl Default for BoardState {
    fn default() -> Self {
        Self::empty()
    }
}

impl PartialEq for BoardState {
    /// Boards are equal when every square holds the same occupant.
    fn eq(&self, other: &Self) -> bool {
        self.squares == other.squares
    }
}

impl Eq for BoardState {}

impl BoardState {
    pub fn empty() -> Self {
        Self {
            squares: [None; 64],
            next_id: 0,
        }
    }

    /// Standard 32-piece starting layout. White pieces get ids `0..16`.
    pub fn standard() -> Self {
        let mut board = Self::empty();
        for color in [Color::White, Color::Black] {
            for (file, kind) in BACK_RANK.iter().enumerate() {
                board.seed(Square::at(file as u8, home_rank(color)), color, *kind);
            }
            for file in 0..8 {
                board.seed(Square::at(file, pawn_start_rank(color)), color, PieceKind::Pawn);
            }
        }
        board
    }

    fn seed(&mut self, square: Square, color: Color, kind: PieceKind) {
        let id = self.allocate_id();
        self.squares[square.index() as usize] = Some(Piece::new(id, color, kind));
    }

    fn allocate_id(&mut self) -> PieceId {
        let id = PieceId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Creates a fresh, unmoved piece on `square` and returns its id.
    pub fn spawn(&mut self, square: Square, color: Color, kind: PieceKind) -> ChessResult<PieceId> {
        if self.is_occupied(square) {
            return Err(ChessError::OccupiedSquare { square });
        }
        let id = self.allocate_id();
        self.squares[square.index() as usize] = Some(Piece::new(id, color, kind));
        Ok(id)
    }

    #[inline]
    pub fn occupant_at(&self, square: Square) -> Option<Piece> {
        self.squares[square.index() as usize]
    }

    #[inline]
    pub fn is_occupied(&self, square: Square) -> bool {
        self.squares[square.index() as usize].is_some()
    }

    pub fn place(&mut self, square: Square, piece: Piece) -> ChessResult<()> {
        let slot = &mut self.squares[square.index() as usize];
        if slot.is_some() {
            return Err(ChessError::OccupiedSquare { square });
        }
        *slot = Some(piece);
        Ok(())
    }

    /// Removes and returns the occupant; empty squares are left alone.
    pub fn remove(&mut self, square: Square) -> Option<Piece> {
        self.squares[square.index() as usize].take()
    }

    /// Moves whatever stands on `from` to `to`. Overwriting is an error:
    /// captures must remove the victim first.
    pub fn relocate(&mut self, from: Square, to: Square) -> ChessResult<()> {
        if from == to {
            return Ok(());
        }
        if self.is_occupied(to) {
            return Err(ChessError::OccupiedSquare { square: to });
        }
        if let Some(piece) = self.remove(from) {
            self.squares[to.index() as usize] = Some(piece);
        }
        Ok(())
    }

    /// Overwrites the occupant of an occupied square in place, returning the
    /// previous value. Used for flag and kind updates that keep identity.
    pub(crate) fn update_occupant(&mut self, square: Square, piece: Piece) -> ChessResult<Piece> {
        let slot = &mut self.squares[square.index() as usize];
        let previous = slot
            .ok_or_else(|| ChessError::inconsistent(format!("no occupant to update on {square}")))?;
        *slot = Some(piece);
        Ok(previous)
    }

    pub fn set_has_moved(&mut self, square: Square, has_moved: bool) -> ChessResult<()> {
        let mut piece = self
            .occupant_at(square)
            .ok_or_else(|| ChessError::inconsistent(format!("no piece on {square} to mark")))?;
        piece.has_moved = has_moved;
        self.update_occupant(square, piece).map(|_| ())
    }

    /// Changes the kind of the occupant of `square`, keeping its identity.
    /// Returns the piece as it was before.
    pub fn replace_kind(&mut self, square: Square, kind: PieceKind) -> ChessResult<Piece> {
        let mut piece = self
            .occupant_at(square)
            .ok_or_else(|| ChessError::inconsistent(format!("no piece on {square} to replace")))?;
        piece.kind = kind;
        self.update_occupant(square, piece)
    }

    pub fn square_of(&self, id: PieceId) -> Option<Square> {
        self.pieces()
            .find(|(_, piece)| piece.id == id)
            .map(|(square, _)| square)
    }

    pub fn piece_by_id(&self, id: PieceId) -> Option<(Square, Piece)> {
        self.pieces().find(|(_, piece)| piece.id == id)
    }

    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces_of(color)
            .find(|(_, piece)| piece.kind == PieceKind::King)
            .map(|(square, _)| square)
    }

    /// All occupied squares with their pieces, a1 first.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.squares.iter().enumerate().filter_map(|(index, slot)| {
            slot.map(|piece| (Square::at(index as u8 % 8, index as u8 / 8), piece))
        })
    }

    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.pieces().filter(move |(_, piece)| piece.color == color)
    }

    pub fn occupancy(&self) -> SquareSet {
        self.pieces().map(|(square, _)| square).collect()
    }

    pub fn occupancy_of(&self, color: Color) -> SquareSet {
        self.pieces_of(color).map(|(square, _)| square).collect()
    }

    /// Verifies the one-king-per-side invariant of a position in play.
    pub fn validate_kings(&self) -> ChessResult<()> {
        for color in [Color::White, Color::Black] {
            let kings = self
                .pieces_of(color)
                .filter(|(_, piece)| piece.kind == PieceKind::King)
                .count();
            if kings != 1 {
                return Err(ChessError::inconsistent(format!(
                    "{color} has {kings} kings on the board"
                )));
            }
        }
        Ok(())
    }
}

impl fmt::Display for BoardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_board(self))
    }
}
