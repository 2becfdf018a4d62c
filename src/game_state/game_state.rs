//! Game state owned by a session: board, side to move and move history.
//!
//! There are no global accessors; every rule, check and search routine takes
//! a `GameState` (or its board) explicitly.

use crate::errors::ChessResult;
use crate::game_state::board_state::BoardState;
use crate::game_state::chess_types::Color;
use crate::game_state::move_history::MoveHistory;
use crate::game_state::move_record::Move;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub board: BoardState,
    pub side_to_move: Color,
    pub history: MoveHistory,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new_game()
    }
}

impl GameState {
    /// Standard starting position, White to move.
    pub fn new_game() -> Self {
        Self::from_board(BoardState::standard(), Color::White)
    }

    /// Composed position with an empty history.
    pub fn from_board(board: BoardState, side_to_move: Color) -> Self {
        Self {
            board,
            side_to_move,
            history: MoveHistory::new(),
        }
    }

    /// Like [`GameState::from_board`], but rejects boards without exactly one
    /// king per side.
    pub fn from_position(board: BoardState, side_to_move: Color) -> ChessResult<Self> {
        board.validate_kings()?;
        Ok(Self::from_board(board, side_to_move))
    }

    /// Last move reflected on the board; the en passant context.
    #[inline]
    pub fn last_move(&self) -> Option<&Move> {
        self.history.last()
    }

    #[inline]
    pub(crate) fn flip_turn(&mut self) {
        self.side_to_move = self.side_to_move.opposite();
    }
}
