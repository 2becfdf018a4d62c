//! Difficulty levels and the move-selection policy built on them.

use std::fmt;

use tracing::debug;

use crate::engines::engine_minimax::MinimaxEngine;
use crate::engines::engine_random::RandomEngine;
use crate::engines::engine_trait::Engine;
use crate::errors::ChessResult;
use crate::game_state::chess_types::Color;
use crate::game_state::game_state::GameState;
use crate::game_state::move_record::Move;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Wall-clock budget for one search.
    pub time_budget_ms: u64,
    /// Maximum plies of captures explored past the nominal depth.
    pub quiescence_depth: u8,
    /// Levels below this play random legal moves.
    pub easy_threshold: u8,
    pub max_depth: u8,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            time_budget_ms: 2000,
            quiescence_depth: 4,
            easy_threshold: 4,
            max_depth: 4,
        }
    }
}

/// Playing strength from 1 (weakest) to 10.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Difficulty(u8);

impl Difficulty {
    pub const MIN: Difficulty = Difficulty(1);
    pub const MAX: Difficulty = Difficulty(10);

    pub const fn new(level: u8) -> Option<Self> {
        if level >= Self::MIN.0 && level <= Self::MAX.0 {
            Some(Self(level))
        } else {
            None
        }
    }

    /// Clamps out-of-range levels into `1..=10`.
    pub fn saturating(level: u8) -> Self {
        Self(level.clamp(Self::MIN.0, Self::MAX.0))
    }

    #[inline]
    pub const fn level(self) -> u8 {
        self.0
    }

    pub const fn label(self) -> &'static str {
        match self.0 {
            1 => "Extremely Easy",
            2 => "Very Easy",
            3 | 4 => "Easy",
            5 => "Normal",
            6 => "Hard",
            7 => "Very Hard",
            8 => "Extremely Hard",
            9 => "Master",
            _ => "Champion",
        }
    }

    pub fn plays_randomly(self, config: &SearchConfig) -> bool {
        self.0 < config.easy_threshold
    }

    /// Search depth for this level; never decreases as the level rises.
    pub fn search_depth(self, config: &SearchConfig) -> u8 {
        let above = self.0.saturating_sub(config.easy_threshold);
        (above / 2 + 1).min(config.max_depth.max(1))
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Difficulty(5)
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label(), self.0)
    }
}

/// Chooses computer moves according to a [`Difficulty`].
pub struct AiPlayer {
    config: SearchConfig,
    random: RandomEngine,
}

impl AiPlayer {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            random: RandomEngine::new(),
        }
    }

    /// Seeds the random engine used at the easy levels.
    pub fn with_seed(config: SearchConfig, seed: u64) -> Self {
        Self {
            config,
            random: RandomEngine::with_seed(seed),
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// The move `color` would play, or `None` when it has no legal move.
    pub fn choose_move(
        &mut self,
        game: &mut GameState,
        difficulty: Difficulty,
        color: Color,
    ) -> ChessResult<Option<Move>> {
        let output = if difficulty.plays_randomly(&self.config) {
            self.random.choose_move(game, color)?
        } else {
            let depth = difficulty.search_depth(&self.config);
            MinimaxEngine::new(depth, self.config).choose_move(game, color)?
        };

        for line in &output.info_lines {
            debug!(%difficulty, "{line}");
        }
        Ok(output.best_move)
    }
}

impl Default for AiPlayer {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}
