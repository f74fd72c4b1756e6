//! The rules engine.
//!
//! `CheckersGame` owns the board, the side to move and the turn state, and is
//! the only thing allowed to mutate them. Renderers read through the accessor
//! methods and drive play with `select_piece`, `make_move`, `deselect_piece`
//! and `reset`, or with `click`, which bundles the three in the order a board
//! UI dispatches a click.

use tracing::{debug, info};

use crate::errors::{PositionParseError, RuleViolation};
use crate::game_state::checkers_types::*;
use crate::game_state::game_snapshot::GameSnapshot;
use crate::game_state::turn_state::TurnState;
use crate::move_generation::legal_move_apply::{apply_move, AppliedMove};
use crate::move_generation::legal_move_generator::{
    all_legal_moves, continuation_jumps, has_any_legal_move, legal_moves_for_piece,
};
use crate::move_generation::piece_moves::generate_piece_moves;
use crate::utils::position_generator::generate_position;
use crate::utils::position_parser::parse_position;

/// How an accepted move left the turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The mover's turn is over and the other side is to move.
    TurnPassed,
    /// The piece captured and can capture again; the same side moves on.
    ContinueJumping,
    /// The turn passed to a side with no legal move.
    GameOver { winner: Color },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveReport {
    pub applied: AppliedMove,
    pub outcome: MoveOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckersGame {
    board: Board,
    current_player: Color,
    turn: TurnState,
}

impl Default for CheckersGame {
    fn default() -> Self {
        Self::new()
    }
}

impl CheckersGame {
    pub fn new() -> Self {
        Self {
            board: Board::starting(),
            current_player: Color::Red,
            turn: TurnState::Idle,
        }
    }

    /// Start from an arbitrary position. Game over is evaluated immediately.
    pub fn from_position(board: Board, current_player: Color) -> Self {
        let mut game = Self {
            board,
            current_player,
            turn: TurnState::Idle,
        };
        game.refresh_game_over();
        game
    }

    pub fn from_position_str(position: &str) -> Result<Self, PositionParseError> {
        let (board, current_player) = parse_position(position)?;
        Ok(Self::from_position(board, current_player))
    }

    /// Back to the opening position, Red to move, nothing selected.
    pub fn reset(&mut self) {
        *self = Self::new();
        info!("game reset");
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn current_player(&self) -> Color {
        self.current_player
    }

    #[inline]
    pub fn selected_piece(&self) -> Option<Position> {
        self.turn.selected_piece()
    }

    /// Cached legal moves of the selected piece.
    #[inline]
    pub fn valid_moves(&self) -> &[Move] {
        self.turn.moves()
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.turn.is_game_over()
    }

    #[inline]
    pub fn turn_state(&self) -> &TurnState {
        &self.turn
    }

    pub fn winner(&self) -> Option<Color> {
        self.is_game_over().then(|| self.current_player.opponent())
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::capture(self)
    }

    pub fn position_string(&self) -> String {
        generate_position(&self.board, self.current_player)
    }

    /// Raw one-hop moves of whatever stands on `(row, col)`, ignoring the
    /// force-jump rule and whose turn it is. Empty for empty or off-board squares.
    pub fn get_legal_moves(&self, row: i32, col: i32) -> Vec<Move> {
        let Some(from) = Position::new(row, col) else {
            return Vec::new();
        };
        let mut moves = Vec::with_capacity(4);
        generate_piece_moves(&self.board, from, &mut moves);
        moves
    }

    /// Every movable piece of the side to move, with pending jump chains honored.
    pub fn all_legal_moves(&self) -> Vec<(Position, Vec<Move>)> {
        match &self.turn {
            TurnState::GameOver => Vec::new(),
            TurnState::Continuing { piece, .. } | TurnState::ContinuationPending { piece } => {
                vec![(*piece, continuation_jumps(&self.board, *piece))]
            }
            TurnState::Idle | TurnState::Selected { .. } => {
                all_legal_moves(&self.board, self.current_player)
            }
        }
    }

    pub fn select_piece(&mut self, row: i32, col: i32) -> bool {
        match self.try_select_piece(row, col) {
            Ok(_) => true,
            Err(reason) => {
                debug!(row, col, %reason, "selection rejected");
                false
            }
        }
    }

    pub fn try_select_piece(&mut self, row: i32, col: i32) -> Result<&[Move], RuleViolation> {
        if self.is_game_over() {
            return Err(RuleViolation::GameOver);
        }
        let pos = Position::new(row, col).ok_or(RuleViolation::OutOfBounds { row, col })?;
        let piece = self
            .board
            .piece_at(pos)
            .ok_or(RuleViolation::EmptySquare(pos))?;
        if piece.owner != self.current_player {
            return Err(RuleViolation::NotYourPiece(pos));
        }

        self.turn = match self.turn.pending_jumper() {
            Some(jumper) if jumper != pos => {
                return Err(RuleViolation::ContinuationRequired(jumper));
            }
            Some(jumper) => TurnState::Continuing {
                piece: jumper,
                moves: continuation_jumps(&self.board, jumper),
            },
            None => TurnState::Selected {
                piece: pos,
                moves: legal_moves_for_piece(&self.board, pos, self.current_player),
            },
        };

        self.debug_check_move_cache();
        debug!(%pos, moves = self.turn.moves().len(), "piece selected");
        Ok(self.turn.moves())
    }

    /// Drop the selection. A pending jump chain stays owed.
    pub fn deselect_piece(&mut self) {
        self.turn = std::mem::take(&mut self.turn).deselected();
    }

    pub fn make_move(&mut self, row: i32, col: i32) -> bool {
        match self.try_make_move(row, col) {
            Ok(_) => true,
            Err(reason) => {
                debug!(row, col, %reason, "move rejected");
                false
            }
        }
    }

    pub fn try_make_move(&mut self, row: i32, col: i32) -> Result<MoveReport, RuleViolation> {
        let (from, moves) = match &self.turn {
            TurnState::Selected { piece, moves } | TurnState::Continuing { piece, moves } => {
                (*piece, moves)
            }
            TurnState::ContinuationPending { piece } => {
                return Err(RuleViolation::ContinuationRequired(*piece));
            }
            TurnState::GameOver => return Err(RuleViolation::GameOver),
            TurnState::Idle => return Err(RuleViolation::NoSelection),
        };
        let to = Position::new(row, col).ok_or(RuleViolation::OutOfBounds { row, col })?;
        let mv = moves
            .iter()
            .find(|mv| mv.lands_on(row, col))
            .copied()
            .ok_or(RuleViolation::IllegalDestination(to))?;

        let applied = apply_move(&mut self.board, from, mv)?;
        debug!(%from, %to, capture = applied.captured.is_some(), promoted = applied.promoted, "move applied");

        if applied.captured.is_some() {
            let further = continuation_jumps(&self.board, applied.to);
            if !further.is_empty() {
                self.turn = TurnState::Continuing {
                    piece: applied.to,
                    moves: further,
                };
                self.debug_check_move_cache();
                return Ok(MoveReport {
                    applied,
                    outcome: MoveOutcome::ContinueJumping,
                });
            }
        }

        self.turn = TurnState::Idle;
        self.switch_player();
        self.refresh_game_over();

        let outcome = match self.winner() {
            Some(winner) => MoveOutcome::GameOver { winner },
            None => MoveOutcome::TurnPassed,
        };
        Ok(MoveReport { applied, outcome })
    }

    /// Renderer click contract: try to select, else try to move, else deselect.
    pub fn click(&mut self, row: i32, col: i32) -> bool {
        if self.is_game_over() {
            return false;
        }
        if self.select_piece(row, col) || self.make_move(row, col) {
            return true;
        }
        self.deselect_piece();
        false
    }

    fn switch_player(&mut self) {
        self.current_player = self.current_player.opponent();
        info!(player = %self.current_player, "turn passed");
    }

    fn refresh_game_over(&mut self) {
        if !has_any_legal_move(&self.board, self.current_player) {
            self.turn = TurnState::GameOver;
            info!(loser = %self.current_player, "game over");
        }
    }

    fn debug_check_move_cache(&self) {
        debug_assert_eq!(
            self.turn.moves(),
            self.fresh_moves_for_selection().as_slice(),
            "move cache out of sync with board"
        );
    }

    fn fresh_moves_for_selection(&self) -> Vec<Move> {
        match &self.turn {
            TurnState::Selected { piece, .. } => {
                legal_moves_for_piece(&self.board, *piece, self.current_player)
            }
            TurnState::Continuing { piece, .. } => continuation_jumps(&self.board, *piece),
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::checkers_rules::STARTING_POSITION;

    fn pos(row: u8, col: u8) -> Position {
        Position { row, col }
    }

    fn game_with(pieces: &[(u8, u8, Piece)], to_move: Color) -> CheckersGame {
        let mut board = Board::new_empty();
        for &(row, col, piece) in pieces {
            assert!(board.place(pos(row, col), piece));
        }
        CheckersGame::from_position(board, to_move)
    }

    #[test]
    fn new_game_is_opening_position() {
        let game = CheckersGame::new();
        assert_eq!(game.board(), &Board::starting());
        assert_eq!(game.current_player(), Color::Red);
        assert_eq!(game.selected_piece(), None);
        assert!(game.valid_moves().is_empty());
        assert!(!game.is_game_over());
        assert_eq!(game.position_string(), STARTING_POSITION);
    }

    #[test]
    fn select_rejects_empty_foreign_and_off_board_squares() {
        let mut game = CheckersGame::new();
        let before = game.clone();

        assert!(!game.select_piece(4, 1));
        assert!(!game.select_piece(2, 1));
        assert!(!game.select_piece(-1, 0));
        assert!(!game.select_piece(8, 3));
        assert_eq!(game, before);

        assert_eq!(
            game.try_select_piece(2, 1),
            Err(RuleViolation::NotYourPiece(pos(2, 1)))
        );
        assert_eq!(
            game.try_select_piece(3, 0),
            Err(RuleViolation::EmptySquare(pos(3, 0)))
        );
    }

    #[test]
    fn select_caches_forward_steps() {
        let mut game = CheckersGame::new();
        assert!(game.select_piece(5, 2));
        assert_eq!(game.selected_piece(), Some(pos(5, 2)));
        assert_eq!(
            game.valid_moves(),
            &[Move::step(pos(4, 1)), Move::step(pos(4, 3))]
        );

        assert!(game.select_piece(5, 0));
        assert_eq!(game.valid_moves(), &[Move::step(pos(4, 1))]);

        assert!(game.select_piece(6, 1));
        assert!(game.valid_moves().is_empty());
    }

    #[test]
    fn simple_move_passes_turn() {
        let mut game = CheckersGame::new();
        assert!(game.select_piece(5, 2));
        assert!(!game.make_move(3, 2));
        assert!(game.make_move(4, 3));

        assert_eq!(game.current_player(), Color::Black);
        assert_eq!(game.selected_piece(), None);
        assert!(game.board().get(5, 2).is_none());
        assert_eq!(game.board().get(4, 3), Some(Piece::man(Color::Red)));
    }

    #[test]
    fn make_move_without_selection_fails() {
        let mut game = CheckersGame::new();
        let before = game.clone();
        assert!(!game.make_move(4, 1));
        assert_eq!(game.try_make_move(4, 1), Err(RuleViolation::NoSelection));
        assert_eq!(game, before);
    }

    #[test]
    fn capture_removes_piece_without_crowning_short_of_back_row() {
        let mut game = game_with(
            &[
                (3, 4, Piece::man(Color::Red)),
                (2, 3, Piece::man(Color::Black)),
                (0, 7, Piece::man(Color::Black)),
            ],
            Color::Red,
        );

        assert!(game.select_piece(3, 4));
        assert!(game.make_move(1, 2));

        assert!(game.board().get(2, 3).is_none());
        assert_eq!(game.board().get(1, 2), Some(Piece::man(Color::Red)));
        assert_eq!(game.current_player(), Color::Black);
    }

    #[test]
    fn reaching_back_row_crowns_permanently() {
        let mut game = game_with(
            &[
                (1, 2, Piece::man(Color::Red)),
                (5, 6, Piece::man(Color::Black)),
            ],
            Color::Red,
        );

        assert!(game.select_piece(1, 2));
        let report = game.try_make_move(0, 1).expect("step to back row");
        assert!(report.applied.promoted);
        assert_eq!(game.board().get(0, 1), Some(Piece::king(Color::Red)));

        assert!(game.select_piece(5, 6));
        assert!(game.make_move(6, 7));
        assert!(game.select_piece(0, 1));
        assert!(game.make_move(1, 0));
        assert_eq!(game.board().get(1, 0), Some(Piece::king(Color::Red)));
    }

    #[test]
    fn force_jump_leaves_other_pieces_without_moves() {
        let mut game = game_with(
            &[
                (3, 4, Piece::man(Color::Red)),
                (2, 3, Piece::man(Color::Black)),
                (6, 1, Piece::man(Color::Red)),
            ],
            Color::Red,
        );

        assert!(game.select_piece(6, 1));
        assert!(game.valid_moves().is_empty());
        assert!(!game.make_move(5, 0));

        assert!(game.select_piece(3, 4));
        assert_eq!(game.valid_moves(), &[Move::jump(pos(1, 2), pos(2, 3))]);
    }

    #[test]
    fn multi_jump_keeps_turn_until_chain_ends() {
        let mut game = game_with(
            &[
                (5, 0, Piece::man(Color::Red)),
                (4, 1, Piece::man(Color::Black)),
                (2, 3, Piece::man(Color::Black)),
                (0, 7, Piece::man(Color::Black)),
                (7, 6, Piece::man(Color::Red)),
            ],
            Color::Red,
        );

        assert!(game.select_piece(5, 0));
        let first = game.try_make_move(3, 2).expect("first hop");
        assert_eq!(first.outcome, MoveOutcome::ContinueJumping);
        assert_eq!(game.current_player(), Color::Red);
        assert_eq!(game.selected_piece(), Some(pos(3, 2)));
        assert_eq!(game.valid_moves(), &[Move::jump(pos(1, 4), pos(2, 3))]);

        assert!(!game.select_piece(7, 6));
        assert_eq!(
            game.try_select_piece(7, 6),
            Err(RuleViolation::ContinuationRequired(pos(3, 2)))
        );

        let last = game.try_make_move(1, 4).expect("second hop");
        assert_eq!(last.outcome, MoveOutcome::TurnPassed);
        assert_eq!(game.current_player(), Color::Black);
        assert_eq!(game.selected_piece(), None);
        assert_eq!(game.board().count(Color::Black), 1);
    }

    #[test]
    fn deselect_mid_chain_keeps_obligation() {
        let mut game = game_with(
            &[
                (5, 0, Piece::man(Color::Red)),
                (4, 1, Piece::man(Color::Black)),
                (2, 3, Piece::man(Color::Black)),
                (0, 7, Piece::man(Color::Black)),
                (7, 6, Piece::man(Color::Red)),
            ],
            Color::Red,
        );
        assert!(game.select_piece(5, 0));
        assert!(game.make_move(3, 2));

        game.deselect_piece();
        assert_eq!(game.selected_piece(), None);
        assert!(game.valid_moves().is_empty());
        assert!(!game.make_move(1, 4));
        assert!(!game.select_piece(7, 6));

        assert!(game.select_piece(3, 2));
        assert_eq!(game.valid_moves(), &[Move::jump(pos(1, 4), pos(2, 3))]);
        assert_eq!(game.all_legal_moves().len(), 1);
    }

    #[test]
    fn jump_onto_back_row_continues_as_king() {
        let mut game = game_with(
            &[
                (2, 1, Piece::man(Color::Red)),
                (1, 2, Piece::man(Color::Black)),
                (1, 4, Piece::man(Color::Black)),
                (7, 0, Piece::man(Color::Red)),
            ],
            Color::Red,
        );

        assert!(game.select_piece(2, 1));
        let report = game.try_make_move(0, 3).expect("crowning jump");
        assert!(report.applied.promoted);
        assert_eq!(report.outcome, MoveOutcome::ContinueJumping);
        assert_eq!(game.valid_moves(), &[Move::jump(pos(2, 5), pos(1, 4))]);

        let report = game.try_make_move(2, 5).expect("king keeps jumping");
        assert_eq!(report.outcome, MoveOutcome::GameOver { winner: Color::Red });
        assert!(game.is_game_over());
    }

    #[test]
    fn deselect_is_idempotent() {
        let mut game = CheckersGame::new();
        let before = game.clone();
        game.deselect_piece();
        game.deselect_piece();
        assert_eq!(game, before);

        assert!(game.select_piece(5, 2));
        game.deselect_piece();
        assert_eq!(game, before);
    }

    #[test]
    fn side_without_moves_is_game_over_and_frozen() {
        let mut game = game_with(
            &[
                (3, 2, Piece::man(Color::Red)),
                (2, 1, Piece::man(Color::Black)),
                (7, 0, Piece::man(Color::Black)),
            ],
            Color::Red,
        );

        assert!(game.select_piece(3, 2));
        let report = game.try_make_move(1, 0).expect("capture");
        assert_eq!(report.outcome, MoveOutcome::GameOver { winner: Color::Red });
        assert!(game.is_game_over());
        assert_eq!(game.winner(), Some(Color::Red));

        let frozen = game.clone();
        assert!(!game.select_piece(7, 0));
        assert!(!game.make_move(6, 1));
        assert!(!game.click(7, 0));
        assert_eq!(game, frozen);
        assert!(game.all_legal_moves().is_empty());
    }

    #[test]
    fn position_with_no_moves_starts_game_over() {
        let game = game_with(&[(0, 1, Piece::man(Color::Red))], Color::Red);
        assert!(game.is_game_over());
        assert_eq!(game.winner(), Some(Color::Black));

        let empty = CheckersGame::from_position(Board::new_empty(), Color::Black);
        assert!(empty.is_game_over());
    }

    #[test]
    fn get_legal_moves_is_pure_and_ignores_turn() {
        let game = CheckersGame::new();
        let before = game.clone();

        assert_eq!(
            game.get_legal_moves(2, 1),
            vec![Move::step(pos(3, 0)), Move::step(pos(3, 2))]
        );
        assert!(game.get_legal_moves(4, 1).is_empty());
        assert!(game.get_legal_moves(-3, 12).is_empty());
        assert_eq!(game, before);
    }

    #[test]
    fn click_dispatches_select_move_then_deselect() {
        let mut game = CheckersGame::new();

        assert!(game.click(5, 2));
        assert_eq!(game.selected_piece(), Some(pos(5, 2)));

        assert!(!game.click(3, 3));
        assert_eq!(game.selected_piece(), None);

        assert!(game.click(5, 2));
        assert!(game.click(4, 1));
        assert_eq!(game.current_player(), Color::Black);
    }

    #[test]
    fn reset_restores_opening_exactly() {
        let mut game = CheckersGame::new();
        assert!(game.click(5, 2));
        assert!(game.click(4, 3));
        assert!(game.click(2, 1));
        assert!(game.click(3, 2));
        assert!(game.click(4, 3));

        game.reset();
        assert_eq!(game, CheckersGame::new());
    }

    #[test]
    fn position_string_parses_into_game() {
        let game = CheckersGame::from_position_str("B:RK18:B14").expect("position parses");
        assert_eq!(game.current_player(), Color::Black);
        assert_eq!(game.board().count(Color::Red), 1);
        assert_eq!(game.board().king_count(Color::Red), 1);
        assert!(CheckersGame::from_position_str("X:R1:B2").is_err());
    }

    #[test]
    fn valid_moves_reads_the_cache_built_on_transition() {
        let mut game = game_with(
            &[
                (5, 0, Piece::man(Color::Red)),
                (4, 1, Piece::man(Color::Black)),
                (2, 3, Piece::man(Color::Black)),
                (0, 7, Piece::man(Color::Black)),
            ],
            Color::Red,
        );

        assert!(game.select_piece(5, 0));
        assert!(std::ptr::eq(game.valid_moves(), game.turn_state().moves()));
        assert_eq!(game.valid_moves(), game.fresh_moves_for_selection().as_slice());

        assert!(game.make_move(3, 2));
        assert!(std::ptr::eq(game.valid_moves(), game.turn_state().moves()));
        assert_eq!(game.valid_moves(), game.fresh_moves_for_selection().as_slice());
        assert_eq!(game.valid_moves(), &[Move::jump(pos(1, 4), pos(2, 3))]);
    }
}
