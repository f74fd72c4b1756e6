//! Single-piece move generation.
//!
//! Produces the raw step and jump candidates of one piece, ignoring the
//! force-jump rule. Side-wide filtering lives in `legal_move_generator`.

use crate::game_state::checkers_types::*;

/// Every one-hop move of the piece on `from`: simple steps and jumps.
///
/// Order follows the piece's direction table; for each direction the step
/// (if any) precedes the jump (if any).
pub fn generate_piece_moves(board: &Board, from: Position, out: &mut Vec<Move>) {
    let Some(piece) = board.piece_at(from) else {
        return;
    };

    for &(d_row, d_col) in piece.directions() {
        let Some(next) = from.offset(d_row, d_col, 1) else {
            continue;
        };

        match board.piece_at(next) {
            None => out.push(Move::step(next)),
            Some(other) if other.owner != piece.owner => {
                if let Some(landing) = from.offset(d_row, d_col, 2) {
                    if board.is_empty_at(landing) {
                        out.push(Move::jump(landing, next));
                    }
                }
            }
            Some(_) => {}
        }
    }
}

/// Jumps only.
pub fn generate_piece_jumps(board: &Board, from: Position, out: &mut Vec<Move>) {
    let Some(piece) = board.piece_at(from) else {
        return;
    };

    for &(d_row, d_col) in piece.directions() {
        let (Some(over), Some(landing)) =
            (from.offset(d_row, d_col, 1), from.offset(d_row, d_col, 2))
        else {
            continue;
        };

        let captures_enemy = board
            .piece_at(over)
            .is_some_and(|other| other.owner != piece.owner);
        if captures_enemy && board.is_empty_at(landing) {
            out.push(Move::jump(landing, over));
        }
    }
}

#[inline]
pub fn piece_can_jump(board: &Board, from: Position) -> bool {
    let mut jumps = Vec::with_capacity(4);
    generate_piece_jumps(board, from, &mut jumps);
    !jumps.is_empty()
}
