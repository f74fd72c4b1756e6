use crate::game_state::checkers_types::*;

/// One complete turn: a simple step, a single jump, or a whole jump chain.
#[derive(Debug, Clone)]
pub struct GeneratedTurn {
    pub from: Position,
    pub hops: Vec<Move>,
    pub board_after: Board,
    pub promoted: bool,
}

impl GeneratedTurn {
    #[inline]
    pub fn captures(&self) -> usize {
        self.hops.iter().filter(|hop| hop.is_jump()).count()
    }

    #[inline]
    pub fn is_multi_jump(&self) -> bool {
        self.captures() > 1
    }

    #[inline]
    pub fn destination(&self) -> Position {
        self.hops.last().map(Move::destination).unwrap_or(self.from)
    }
}

pub trait TurnGenerator: Send + Sync {
    fn generate_turns(&self, board: &Board, side: Color) -> Vec<GeneratedTurn>;
}
