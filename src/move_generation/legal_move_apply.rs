use crate::errors::RuleViolation;
use crate::game_state::checkers_types::*;

/// What a single hop did to the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppliedMove {
    pub from: Position,
    pub to: Position,
    pub piece: Piece,
    pub captured: Option<(Position, Piece)>,
    pub promoted: bool,
}

/// Move the piece on `from` according to `mv`, removing any captured piece
/// and crowning on the far row. The board is untouched on error.
pub fn apply_move(board: &mut Board, from: Position, mv: Move) -> Result<AppliedMove, RuleViolation> {
    let to = mv.destination();
    let piece = board.piece_at(from).ok_or(RuleViolation::EmptySquare(from))?;
    if !board.is_empty_at(to) {
        return Err(RuleViolation::OccupiedDestination(to));
    }
    if let Some(over) = mv.capture {
        match board.piece_at(over) {
            Some(victim) if victim.owner != piece.owner => {}
            _ => return Err(RuleViolation::IllegalDestination(to)),
        }
    }

    board.take(from);
    board.place(to, piece);

    let captured = mv
        .capture
        .and_then(|over| board.take(over).map(|victim| (over, victim)));

    let promoted = !piece.is_king && to.row == piece.owner.crowning_row();
    if promoted {
        if let Some(landed) = board.piece_at_mut(to) {
            landed.is_king = true;
        }
    }

    Ok(AppliedMove {
        from,
        to,
        piece,
        captured,
        promoted,
    })
}
