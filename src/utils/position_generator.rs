use crate::game_state::checkers_types::*;

pub fn generate_position(board: &Board, side: Color) -> String {
    let turn = match side {
        Color::Red => 'R',
        Color::Black => 'B',
    };

    format!(
        "{}:R{}:B{}",
        turn,
        generate_piece_list(board, Color::Red),
        generate_piece_list(board, Color::Black)
    )
}

fn generate_piece_list(board: &Board, owner: Color) -> String {
    let mut squares: Vec<(u8, bool)> = board
        .pieces_of(owner)
        .filter_map(|(pos, piece)| pos.square_number().map(|n| (n, piece.is_king)))
        .collect();
    squares.sort_unstable();

    squares
        .iter()
        .map(|(number, is_king)| {
            if *is_king {
                format!("K{number}")
            } else {
                number.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(",")
}
