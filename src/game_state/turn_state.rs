use crate::game_state::checkers_types::{Move, Position};

/// Selection and jump-chain state of the side to move.
///
/// The move cache only exists inside the variants that own a selection, so a
/// stale list cannot outlive its selection. `Continuing` and
/// `ContinuationPending` carry the obligation to finish a jump chain with one
/// specific piece; the turn cannot pass while either is active.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TurnState {
    #[default]
    Idle,
    Selected {
        piece: Position,
        moves: Vec<Move>,
    },
    Continuing {
        piece: Position,
        moves: Vec<Move>,
    },
    ContinuationPending {
        piece: Position,
    },
    GameOver,
}

impl TurnState {
    pub fn selected_piece(&self) -> Option<Position> {
        match self {
            TurnState::Selected { piece, .. } | TurnState::Continuing { piece, .. } => Some(*piece),
            _ => None,
        }
    }

    pub fn moves(&self) -> &[Move] {
        match self {
            TurnState::Selected { moves, .. } | TurnState::Continuing { moves, .. } => moves,
            _ => &[],
        }
    }

    /// Piece that owes further jumps this turn, selected or not.
    pub fn pending_jumper(&self) -> Option<Position> {
        match self {
            TurnState::Continuing { piece, .. } | TurnState::ContinuationPending { piece } => {
                Some(*piece)
            }
            _ => None,
        }
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        matches!(self, TurnState::GameOver)
    }

    /// State after a deselect: the selection goes, any jump obligation stays.
    pub(crate) fn deselected(self) -> Self {
        match self {
            TurnState::Selected { .. } => TurnState::Idle,
            TurnState::Continuing { piece, .. } => TurnState::ContinuationPending { piece },
            other => other,
        }
    }
}
