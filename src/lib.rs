//! Crate root module declarations for the Plum Checkers rules engine.
//!
//! Exposes the game state and engine, move generation, position notation and
//! rendering helpers, and the console front end so binaries, tests, benches
//! and renderers can import stable module paths.

pub mod errors;

pub mod game_state {
    pub mod board;
    pub mod checkers_rules;
    pub mod checkers_types;
    pub mod game_snapshot;
    pub mod game_state;
    pub mod turn_state;
}

pub mod move_generation {
    pub mod legal_move_apply;
    pub mod legal_move_generator;
    pub mod move_generator;
    pub mod perft;
    pub mod piece_moves;
}

pub mod console {
    pub mod console_config;
    pub mod console_top;
}

pub mod utils {
    pub mod position_generator;
    pub mod position_parser;
    pub mod render_game_state;
}
