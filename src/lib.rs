//! Crate root module declarations for the Gambit chess core.
//!
//! This file exposes all subsystems (game state, per-piece rules, move
//! generation and execution, search, engines, the game session and utility
//! helpers) so tests, benches and host applications can import stable module
//! paths.

pub mod errors;

pub mod game_state {
    pub mod board_state;
    pub mod chess_rules;
    pub mod chess_types;
    pub mod game_state;
    pub mod move_history;
    pub mod move_record;
}

pub mod moves {
    pub mod bishop_moves;
    pub mod king_moves;
    pub mod knight_moves;
    pub mod pawn_moves;
    pub mod queen_moves;
    pub mod rook_moves;
    pub mod sliding_moves;
}

pub mod move_generation {
    pub mod legal_move_apply;
    pub mod legal_move_checks;
    pub mod legal_move_generator;
    pub mod perft;
    pub mod pseudo_legal;
    pub mod simulation;
    pub mod special_moves;
}

pub mod search {
    pub mod board_scoring;
    pub mod minimax;
}

pub mod engines {
    pub mod ai_player;
    pub mod engine_minimax;
    pub mod engine_random;
    pub mod engine_trait;
}

pub mod session {
    pub mod game_events;
    pub mod game_session;
}

pub mod utils {
    pub mod render_game_state;
}
