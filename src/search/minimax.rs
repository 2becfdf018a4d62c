//! Negamax alpha-beta search with a captures-only quiescence extension.
//!
//! The search runs on the live game through [`SimulatedMove`], so every
//! explored move is reverted before control returns, including on errors.
//! Scores are from the perspective of the color searched for at each node.

use std::time::{Duration, Instant};

use tracing::trace;

use crate::errors::ChessResult;
use crate::game_state::chess_types::Color;
use crate::game_state::game_state::GameState;
use crate::game_state::move_record::Move;
use crate::move_generation::legal_move_checks::is_in_check;
use crate::move_generation::legal_move_generator::{capture_moves, has_any_legal_move, legal_moves};
use crate::move_generation::simulation::SimulatedMove;
use crate::search::board_scoring::{relative_to, BoardScorer, MaterialScorer};

pub const MATE_SCORE: i32 = 100_000;
pub const INFINITY: i32 = 1_000_000;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub nodes: u64,
    pub quiescence_nodes: u64,
    pub deadline_hit: bool,
}

/// Per-search settings and counters threaded through the recursion.
pub struct SearchContext<'a> {
    pub scorer: &'a dyn BoardScorer,
    pub deadline: Option<Instant>,
    pub quiescence_depth: u8,
    pub stats: SearchStats,
}

impl<'a> SearchContext<'a> {
    pub fn new(scorer: &'a dyn BoardScorer, deadline: Option<Instant>, quiescence_depth: u8) -> Self {
        Self {
            scorer,
            deadline,
            quiescence_depth,
            stats: SearchStats::default(),
        }
    }

    fn expired(&mut self) -> bool {
        let expired = self.deadline.is_some_and(|deadline| Instant::now() >= deadline);
        self.stats.deadline_hit |= expired;
        expired
    }

    fn static_score(&self, game: &GameState, color: Color) -> i32 {
        relative_to(color, self.scorer.score(&game.board))
    }
}

impl Default for SearchContext<'static> {
    fn default() -> Self {
        Self::new(&MaterialScorer, None, 4)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SearchResult {
    pub best_move: Option<Move>,
    pub score: i32,
    pub depth: u8,
    pub nodes: u64,
    pub elapsed: Duration,
}

/// Score of a position where `color` has no legal move.
fn terminal_score(game: &GameState, color: Color, ply: u8) -> i32 {
    if is_in_check(color, &game.board) {
        -MATE_SCORE + i32::from(ply)
    } else {
        0
    }
}

/// Alpha-beta value of the position for `color`, searching `depth` plies
/// before handing over to quiescence. Once the deadline passes, nodes return
/// their static evaluation.
pub fn minimax(
    game: &mut GameState,
    depth: u8,
    alpha: i32,
    beta: i32,
    color: Color,
    ctx: &mut SearchContext<'_>,
) -> ChessResult<i32> {
    negamax(game, depth, alpha, beta, color, 0, ctx)
}

fn negamax(
    game: &mut GameState,
    depth: u8,
    mut alpha: i32,
    beta: i32,
    color: Color,
    ply: u8,
    ctx: &mut SearchContext<'_>,
) -> ChessResult<i32> {
    ctx.stats.nodes += 1;

    if ctx.expired() {
        return Ok(ctx.static_score(game, color));
    }
    if depth == 0 {
        let quiescence_depth = ctx.quiescence_depth;
        return quiescence(game, alpha, beta, color, quiescence_depth, ply, ctx);
    }

    let moves = legal_moves(game, color)?;
    if moves.is_empty() {
        return Ok(terminal_score(game, color, ply));
    }

    let mut best = -INFINITY;
    for mv in moves {
        let mut child = SimulatedMove::new(game, &mv)?;
        let score = -negamax(
            &mut child,
            depth - 1,
            -beta,
            -alpha,
            color.opposite(),
            ply.saturating_add(1),
            ctx,
        )?;
        child.finish()?;

        best = best.max(score);
        alpha = alpha.max(score);
        if alpha >= beta {
            break;
        }
    }

    Ok(best)
}

/// Captures-only search with a stand-pat bound, at most `max_depth` plies.
pub fn quiescence_search(
    game: &mut GameState,
    alpha: i32,
    beta: i32,
    color: Color,
    max_depth: u8,
    ctx: &mut SearchContext<'_>,
) -> ChessResult<i32> {
    quiescence(game, alpha, beta, color, max_depth, 0, ctx)
}

fn quiescence(
    game: &mut GameState,
    mut alpha: i32,
    beta: i32,
    color: Color,
    depth_left: u8,
    ply: u8,
    ctx: &mut SearchContext<'_>,
) -> ChessResult<i32> {
    ctx.stats.quiescence_nodes += 1;

    if !has_any_legal_move(game, color)? {
        return Ok(terminal_score(game, color, ply));
    }

    let stand_pat = ctx.static_score(game, color);
    if depth_left == 0 || ctx.expired() || stand_pat >= beta {
        return Ok(stand_pat);
    }
    alpha = alpha.max(stand_pat);

    let mut best = stand_pat;
    for mv in capture_moves(game, color)? {
        let mut child = SimulatedMove::new(game, &mv)?;
        let score = -quiescence(
            &mut child,
            -beta,
            -alpha,
            color.opposite(),
            depth_left - 1,
            ply.saturating_add(1),
            ctx,
        )?;
        child.finish()?;

        best = best.max(score);
        alpha = alpha.max(score);
        if alpha >= beta {
            break;
        }
    }

    Ok(best)
}

/// Picks the highest scoring legal move for `color` at the given depth.
/// Ties keep the first move in generation order.
pub fn search_best_move(
    game: &mut GameState,
    color: Color,
    depth: u8,
    ctx: &mut SearchContext<'_>,
) -> ChessResult<SearchResult> {
    let started = Instant::now();
    let depth = depth.max(1);
    let moves = legal_moves(game, color)?;

    let mut result = SearchResult {
        depth,
        ..SearchResult::default()
    };
    if moves.is_empty() {
        result.score = terminal_score(game, color, 0);
        result.elapsed = started.elapsed();
        return Ok(result);
    }

    let mut alpha = -INFINITY;
    let mut best_score = -INFINITY;
    for mv in moves {
        let mut child = SimulatedMove::new(game, &mv)?;
        let score = -negamax(&mut child, depth - 1, -INFINITY, -alpha, color.opposite(), 1, ctx)?;
        child.finish()?;

        if score > best_score {
            best_score = score;
            result.best_move = Some(mv);
        }
        alpha = alpha.max(score);
    }

    result.score = best_score;
    result.nodes = ctx.stats.nodes + ctx.stats.quiescence_nodes;
    result.elapsed = started.elapsed();
    trace!(
        depth,
        score = result.score,
        nodes = ctx.stats.nodes,
        quiescence_nodes = ctx.stats.quiescence_nodes,
        deadline_hit = ctx.stats.deadline_hit,
        elapsed_ms = result.elapsed.as_millis() as u64,
        "search finished"
    );
    Ok(result)
}
