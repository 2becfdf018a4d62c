//! Leaf-node counting over the legal move tree, for generator verification.

use crate::errors::ChessResult;
use crate::game_state::chess_types::Color;
use crate::game_state::game_state::GameState;
use crate::game_state::move_record::Move;
use crate::move_generation::legal_move_checks::is_in_check;
use crate::move_generation::legal_move_generator::{has_any_legal_move, legal_moves};
use crate::move_generation::simulation::SimulatedMove;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: usize,
    pub captures: usize,
    pub en_passant: usize,
    pub castles: usize,
    pub promotions: usize,
    pub checks: usize,
    pub checkmates: usize,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
        self.checkmates += rhs.checkmates;
    }
}

/// Counts leaf nodes `depth` plies below the current position, starting with
/// the side to move. The game is left as it was found.
pub fn perft(game: &mut GameState, depth: u8) -> ChessResult<PerftCounts> {
    if depth == 0 {
        return Ok(PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        });
    }
    let color = game.side_to_move;
    perft_recurse(game, color, depth)
}

fn perft_recurse(game: &mut GameState, color: Color, depth: u8) -> ChessResult<PerftCounts> {
    let mut total = PerftCounts::default();

    for mv in legal_moves(game, color)? {
        let mut child = SimulatedMove::new(game, &mv)?;
        if depth == 1 {
            total.merge(leaf_counts(&mut child, &mv)?);
        } else {
            total.merge(perft_recurse(&mut child, color.opposite(), depth - 1)?);
        }
        child.finish()?;
    }

    Ok(total)
}

fn leaf_counts(game: &mut GameState, mv: &Move) -> ChessResult<PerftCounts> {
    let opponent = mv.mover.color.opposite();
    let gives_check = is_in_check(opponent, &game.board);
    let mated = gives_check && !has_any_legal_move(game, opponent)?;

    Ok(PerftCounts {
        nodes: 1,
        captures: usize::from(mv.is_capture()),
        en_passant: usize::from(mv.is_en_passant),
        castles: usize::from(mv.is_castle()),
        promotions: usize::from(mv.promotion.is_some()),
        checks: usize::from(gives_check),
        checkmates: usize::from(mated),
    })
}
