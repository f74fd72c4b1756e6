//! Serializable copy of everything a renderer reads from the engine.

use serde::{Deserialize, Serialize};

use crate::game_state::checkers_types::*;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub board: Board,
    pub current_player: Color,
    pub selected_piece: Option<Position>,
    pub valid_moves: Vec<Move>,
    pub is_game_over: bool,
    pub winner: Option<Color>,
}

impl GameSnapshot {
    pub fn capture(game: &CheckersGame) -> Self {
        Self {
            board: game.board().clone(),
            current_player: game.current_player(),
            selected_piece: game.selected_piece(),
            valid_moves: game.valid_moves().to_vec(),
            is_game_over: game.is_game_over(),
            winner: game.winner(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
