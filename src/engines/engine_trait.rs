//! Engine abstraction used by the AI player.
//!
//! Engines choose a move for a given color on the live game. They may
//! simulate moves while thinking but must hand the game back unchanged.

use crate::errors::ChessResult;
use crate::game_state::chess_types::Color;
use crate::game_state::game_state::GameState;
use crate::game_state::move_record::Move;

#[derive(Debug, Clone, Default)]
pub struct EngineOutput {
    pub best_move: Option<Move>,
    /// Search score from the engine color's point of view, when searched.
    pub score: Option<i32>,
    pub info_lines: Vec<String>,
}

pub trait Engine: Send {
    fn name(&self) -> &str;

    fn choose_move(&mut self, game: &mut GameState, color: Color) -> ChessResult<EngineOutput>;
}
