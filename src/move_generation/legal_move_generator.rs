//! Side-wide legal move generation.
//!
//! Applies the force-jump rule on top of single-piece generation and expands
//! jump chains into complete turns for perft and benchmarking.

use tracing::trace;

use crate::game_state::checkers_types::*;
use crate::move_generation::legal_move_apply::apply_move;
use crate::move_generation::move_generator::{GeneratedTurn, TurnGenerator};
use crate::move_generation::piece_moves::{
    generate_piece_jumps, generate_piece_moves, piece_can_jump,
};

pub struct LegalTurnGenerator;

impl TurnGenerator for LegalTurnGenerator {
    fn generate_turns(&self, board: &Board, side: Color) -> Vec<GeneratedTurn> {
        let must_jump = side_has_jump(board, side);
        let mut turns = Vec::with_capacity(16);

        for (from, _) in board.pieces_of(side) {
            if must_jump {
                expand_jump_chains(board, from, from, Vec::new(), false, &mut turns);
                continue;
            }

            let mut steps = Vec::with_capacity(4);
            generate_piece_moves(board, from, &mut steps);
            for mv in steps {
                let mut next = board.clone();
                if let Ok(applied) = apply_move(&mut next, from, mv) {
                    turns.push(GeneratedTurn {
                        from,
                        hops: vec![mv],
                        board_after: next,
                        promoted: applied.promoted,
                    });
                }
            }
        }

        turns
    }
}

fn expand_jump_chains(
    board: &Board,
    origin: Position,
    at: Position,
    hops: Vec<Move>,
    promoted: bool,
    out: &mut Vec<GeneratedTurn>,
) {
    let mut jumps = Vec::with_capacity(4);
    generate_piece_jumps(board, at, &mut jumps);

    if jumps.is_empty() {
        if !hops.is_empty() {
            out.push(GeneratedTurn {
                from: origin,
                hops,
                board_after: board.clone(),
                promoted,
            });
        }
        return;
    }

    for mv in jumps {
        let mut next = board.clone();
        let Ok(applied) = apply_move(&mut next, at, mv) else {
            continue;
        };
        let mut chain = hops.clone();
        chain.push(mv);
        expand_jump_chains(
            &next,
            origin,
            applied.to,
            chain,
            promoted || applied.promoted,
            out,
        );
    }
}

/// True when any piece of `side` has a jump available.
pub fn side_has_jump(board: &Board, side: Color) -> bool {
    board
        .pieces_of(side)
        .any(|(from, _)| piece_can_jump(board, from))
}

/// Moves of the piece on `from` with the force-jump rule applied for `side`.
///
/// Empty when the square is empty, holds an opposing piece, or when a
/// teammate can jump and this piece cannot.
pub fn legal_moves_for_piece(board: &Board, from: Position, side: Color) -> Vec<Move> {
    match board.piece_at(from) {
        Some(piece) if piece.owner == side => {}
        _ => return Vec::new(),
    }

    let mut moves = Vec::with_capacity(4);
    if side_has_jump(board, side) {
        generate_piece_jumps(board, from, &mut moves);
    } else {
        generate_piece_moves(board, from, &mut moves);
    }

    trace!(%from, count = moves.len(), "generated piece moves");
    moves
}

/// Jumps still open to a piece that just landed from a capture.
pub fn continuation_jumps(board: &Board, at: Position) -> Vec<Move> {
    let mut jumps = Vec::with_capacity(4);
    generate_piece_jumps(board, at, &mut jumps);
    jumps
}

/// Every piece of `side` with a non-empty legal move list.
pub fn all_legal_moves(board: &Board, side: Color) -> Vec<(Position, Vec<Move>)> {
    let must_jump = side_has_jump(board, side);

    board
        .pieces_of(side)
        .filter_map(|(from, _)| {
            let mut moves = Vec::with_capacity(4);
            if must_jump {
                generate_piece_jumps(board, from, &mut moves);
            } else {
                generate_piece_moves(board, from, &mut moves);
            }
            (!moves.is_empty()).then_some((from, moves))
        })
        .collect()
}

pub fn has_any_legal_move(board: &Board, side: Color) -> bool {
    let mut scratch = Vec::with_capacity(4);
    board.pieces_of(side).any(|(from, _)| {
        scratch.clear();
        generate_piece_moves(board, from, &mut scratch);
        !scratch.is_empty()
    })
}
