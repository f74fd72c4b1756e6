use std::sync::Arc;
use std::thread;

use crate::game_state::checkers_types::*;
use crate::move_generation::legal_move_generator::LegalTurnGenerator;
use crate::move_generation::move_generator::{GeneratedTurn, TurnGenerator};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: usize,
    pub captures: usize,
    pub multi_jumps: usize,
    pub promotions: usize,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.multi_jumps += rhs.multi_jumps;
        self.promotions += rhs.promotions;
    }
}

/// Perft with the crate's own rules.
pub fn perft_legal(board: &Board, side: Color, depth: u8) -> PerftCounts {
    perft(&LegalTurnGenerator, board, side, depth)
}

pub fn perft<G: TurnGenerator>(generator: &G, board: &Board, side: Color, depth: u8) -> PerftCounts {
    if depth == 0 {
        return PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        };
    }

    let mut total = PerftCounts::default();
    for turn in generator.generate_turns(board, side) {
        perft_recurse(generator, &turn, side, depth, 1, &mut total);
    }
    total
}

/// Splits the root turns across worker threads.
pub fn perft_multi_threaded(
    generator: Arc<dyn TurnGenerator>,
    board: &Board,
    side: Color,
    depth: u8,
) -> PerftCounts {
    if depth == 0 {
        return PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        };
    }

    let root_turns = generator.generate_turns(board, side);
    thread::scope(|scope| {
        let handles: Vec<_> = root_turns
            .iter()
            .map(|turn| {
                let generator_ref = Arc::clone(&generator);
                scope.spawn(move || {
                    let mut local = PerftCounts::default();
                    perft_recurse(generator_ref.as_ref(), turn, side, depth, 1, &mut local);
                    local
                })
            })
            .collect();

        let mut total = PerftCounts::default();
        for handle in handles {
            match handle.join() {
                Ok(local) => total.merge(local),
                Err(payload) => std::panic::resume_unwind(payload),
            }
        }
        total
    })
}

fn perft_recurse<G: TurnGenerator + ?Sized>(
    generator: &G,
    turn: &GeneratedTurn,
    mover: Color,
    search_depth: u8,
    current_depth: u8,
    counts: &mut PerftCounts,
) {
    if current_depth == search_depth {
        counts.nodes += 1;
        if turn.captures() > 0 {
            counts.captures += 1;
        }
        if turn.is_multi_jump() {
            counts.multi_jumps += 1;
        }
        if turn.promoted {
            counts.promotions += 1;
        }
        return;
    }

    let next_side = mover.opponent();
    for child in generator.generate_turns(&turn.board_after, next_side) {
        perft_recurse(
            generator,
            &child,
            next_side,
            search_depth,
            current_depth + 1,
            counts,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockTurnGenerator;

    impl TurnGenerator for MockTurnGenerator {
        fn generate_turns(&self, board: &Board, side: Color) -> Vec<GeneratedTurn> {
            let from = Position { row: 5, col: 0 };
            match (side, board.count(Color::Black)) {
                (Color::Red, 1) => vec![
                    mock_turn(board, from, 1, false),
                    mock_turn(board, from, 0, true),
                ],
                (Color::Black, _) => vec![
                    mock_turn(board, from, 2, false),
                    mock_turn(board, from, 0, false),
                    mock_turn(board, from, 0, false),
                ],
                _ => Vec::new(),
            }
        }
    }

    fn mock_turn(board: &Board, from: Position, captures: usize, promoted: bool) -> GeneratedTurn {
        let over = Position { row: 4, col: 1 };
        let to = Position { row: 3, col: 2 };
        let mut hops = vec![Move::jump(to, over); captures];
        if hops.is_empty() {
            hops.push(Move::step(to));
        }
        GeneratedTurn {
            from,
            hops,
            board_after: board.clone(),
            promoted,
        }
    }

    fn one_black_board() -> Board {
        let mut board = Board::new_empty();
        board.place(Position { row: 0, col: 1 }, Piece::man(Color::Black));
        board
    }

    #[test]
    fn perft_depth_zero_counts_single_node() {
        let counts = perft(&MockTurnGenerator, &one_black_board(), Color::Red, 0);
        assert_eq!(
            counts,
            PerftCounts {
                nodes: 1,
                ..PerftCounts::default()
            }
        );
    }

    #[test]
    fn perft_depth_two_aggregates_leaf_metrics() {
        let counts = perft(&MockTurnGenerator, &one_black_board(), Color::Red, 2);
        assert_eq!(
            counts,
            PerftCounts {
                nodes: 6,
                captures: 2,
                multi_jumps: 2,
                promotions: 0,
            }
        );

        let root = perft(&MockTurnGenerator, &one_black_board(), Color::Red, 1);
        assert_eq!(root.promotions, 1);
        assert_eq!(root.captures, 1);
    }

    #[test]
    fn opening_perft_matches_known_counts() {
        let board = Board::starting();
        let expected = [7usize, 49, 302];
        for (idx, nodes) in expected.iter().enumerate() {
            let depth = (idx + 1) as u8;
            assert_eq!(
                perft_legal(&board, Color::Red, depth).nodes,
                *nodes,
                "perft depth {depth}"
            );
        }
    }

    #[test]
    fn threaded_perft_matches_single_thread() {
        let board = Board::starting();
        let single = perft_legal(&board, Color::Red, 3);
        let threaded = perft_multi_threaded(Arc::new(LegalTurnGenerator), &board, Color::Red, 3);
        assert_eq!(single, threaded);
    }
}
