//! Terminal board renderer.
//!
//! Creates a human-readable board view for debugging, tests, and the console
//! front end.

use crate::game_state::checkers_types::*;

/// Render the board with row labels on the left and column labels on top.
///
/// Row 0 is printed first, so Red plays up the screen.
pub fn render_board(board: &Board) -> String {
    render_with_marks(board, None, &[])
}

/// Like [`render_board`], plus `[ ]` around the selected piece and `*` on
/// each legal destination.
pub fn render_game_state(game: &CheckersGame) -> String {
    let mut out = render_with_marks(game.board(), game.selected_piece(), game.valid_moves());
    out.push('\n');

    if let Some(winner) = game.winner() {
        out.push_str(&format!("game over, {winner} wins"));
    } else {
        out.push_str(&format!("{} to move", game.current_player()));
    }

    out
}

fn render_with_marks(board: &Board, selected: Option<Position>, targets: &[Move]) -> String {
    let mut out = String::new();

    out.push_str("   0  1  2  3  4  5  6  7\n");

    for row in 0..BOARD_SIZE {
        out.push(char::from(b'0' + row));
        out.push(' ');

        for col in 0..BOARD_SIZE {
            let pos = Position { row, col };
            let glyph = square_glyph(board, pos);
            let is_target = targets.iter().any(|mv| mv.destination() == pos);

            if selected == Some(pos) {
                out.push('[');
                out.push(glyph);
                out.push(']');
            } else if is_target {
                out.push(' ');
                out.push('*');
                out.push(' ');
            } else {
                out.push(' ');
                out.push(glyph);
                out.push(' ');
            }
        }

        out.push('\n');
    }

    out.pop();
    out
}

fn square_glyph(board: &Board, pos: Position) -> char {
    match board.piece_at(pos) {
        Some(piece) => piece_glyph(piece),
        None if pos.is_dark() => '.',
        None => ' ',
    }
}

fn piece_glyph(piece: Piece) -> char {
    match (piece.owner, piece.is_king) {
        (Color::Red, false) => 'r',
        (Color::Red, true) => 'R',
        (Color::Black, false) => 'b',
        (Color::Black, true) => 'B',
    }
}
