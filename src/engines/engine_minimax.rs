//! Fixed-depth alpha-beta engine with a wall-clock budget.

use std::time::{Duration, Instant};

use crate::engines::ai_player::SearchConfig;
use crate::engines::engine_trait::{Engine, EngineOutput};
use crate::errors::ChessResult;
use crate::game_state::chess_types::Color;
use crate::game_state::game_state::GameState;
use crate::search::board_scoring::{BoardScorer, MaterialScorer};
use crate::search::minimax::{search_best_move, SearchContext};

pub struct MinimaxEngine<S: BoardScorer = MaterialScorer> {
    scorer: S,
    depth: u8,
    config: SearchConfig,
}

impl MinimaxEngine<MaterialScorer> {
    pub fn new(depth: u8, config: SearchConfig) -> Self {
        Self::with_scorer(MaterialScorer, depth, config)
    }
}

impl<S: BoardScorer> MinimaxEngine<S> {
    pub fn with_scorer(scorer: S, depth: u8, config: SearchConfig) -> Self {
        Self {
            scorer,
            depth: depth.max(1),
            config,
        }
    }

    pub fn depth(&self) -> u8 {
        self.depth
    }
}

impl<S: BoardScorer> Engine for MinimaxEngine<S> {
    fn name(&self) -> &str {
        "Minimax"
    }

    fn choose_move(&mut self, game: &mut GameState, color: Color) -> ChessResult<EngineOutput> {
        let deadline = Instant::now() + Duration::from_millis(self.config.time_budget_ms);
        let mut ctx = SearchContext::new(&self.scorer, Some(deadline), self.config.quiescence_depth);
        let result = search_best_move(game, color, self.depth, &mut ctx)?;

        Ok(EngineOutput {
            best_move: result.best_move,
            score: Some(result.score),
            info_lines: vec![format!(
                "info depth {} score {} nodes {} time {}",
                result.depth,
                result.score,
                result.nodes,
                result.elapsed.as_millis()
            )],
        })
    }
}
