//! Scope guard pairing a simulated move with its undo.

use std::ops::{Deref, DerefMut};

use tracing::error;

use crate::errors::ChessResult;
use crate::game_state::game_state::GameState;
use crate::game_state::move_record::Move;
use crate::move_generation::legal_move_apply::{make_move_in_place, unmake_move_in_place};

/// A move played on the live game that is taken back when the guard goes
/// away.
///
/// Call [`SimulatedMove::finish`] to revert and observe revert errors. If the
/// guard is dropped instead (early return, `?`, unwinding) the move is still
/// reverted and any failure is logged.
#[must_use = "dropping the guard immediately reverts the move"]
pub struct SimulatedMove<'a> {
    game: &'a mut GameState,
    active: bool,
}

impl<'a> SimulatedMove<'a> {
    pub fn new(game: &'a mut GameState, mv: &Move) -> ChessResult<Self> {
        make_move_in_place(game, mv)?;
        Ok(Self { game, active: true })
    }

    pub fn finish(mut self) -> ChessResult<Move> {
        self.active = false;
        unmake_move_in_place(&mut *self.game)
    }
}

impl Deref for SimulatedMove<'_> {
    type Target = GameState;

    fn deref(&self) -> &GameState {
        &*self.game
    }
}

impl DerefMut for SimulatedMove<'_> {
    fn deref_mut(&mut self) -> &mut GameState {
        &mut *self.game
    }
}

impl Drop for SimulatedMove<'_> {
    fn drop(&mut self) {
        if self.active {
            if let Err(err) = unmake_move_in_place(&mut *self.game) {
                error!(%err, "failed to revert simulated move");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::SimulatedMove;
    use crate::errors::{ChessError, ChessResult};
    use crate::game_state::chess_types::Square;
    use crate::game_state::game_state::GameState;
    use crate::move_generation::legal_move_apply::build_move;

    fn sq(name: &str) -> Square {
        name.parse().expect("test square should parse")
    }

    #[test]
    fn finish_reverts_the_move() {
        let mut game = GameState::new_game();
        let before = game.clone();
        let mv = build_move(&game.board, sq("g1"), sq("f3"), None).expect("knight move");

        let simulated = SimulatedMove::new(&mut game, &mv).expect("playable");
        assert!(simulated.board.is_occupied(sq("f3")));
        assert_eq!(simulated.history.len(), 1);
        simulated.finish().expect("revertible");

        assert_eq!(game, before);
    }

    #[test]
    fn early_return_still_reverts() {
        fn probe(game: &mut GameState) -> ChessResult<()> {
            let mv = build_move(&game.board, sq("e2"), sq("e4"), None)?;
            let _simulated = SimulatedMove::new(game, &mv)?;
            Err(ChessError::GameOver)
        }

        let mut game = GameState::new_game();
        let before = game.clone();
        assert_eq!(probe(&mut game), Err(ChessError::GameOver));
        assert_eq!(game, before);
    }
}
