//! Position-string to board parser.
//!
//! Reads the draughts FEN style `<turn>:R<squares>:B<squares>` where squares
//! are standard numbers 1..=32, optionally prefixed `K` for kings.

use std::collections::HashSet;

use crate::errors::PositionParseError;
use crate::game_state::checkers_types::*;

pub fn parse_position(text: &str) -> Result<(Board, Color), PositionParseError> {
    let mut parts = text.trim().split(':');

    let turn_part = parts
        .next()
        .filter(|part| !part.is_empty())
        .ok_or(PositionParseError::MissingField("side to move"))?;
    let red_part = parts
        .next()
        .ok_or(PositionParseError::MissingField("red pieces"))?;
    let black_part = parts
        .next()
        .ok_or(PositionParseError::MissingField("black pieces"))?;

    if parts.next().is_some() {
        return Err(PositionParseError::TrailingFields);
    }

    let side = parse_turn(turn_part)?;
    let mut board = Board::new_empty();
    let mut seen = HashSet::new();

    parse_piece_list(red_part, 'R', Color::Red, &mut board, &mut seen)?;
    parse_piece_list(black_part, 'B', Color::Black, &mut board, &mut seen)?;

    Ok((board, side))
}

fn parse_turn(turn_part: &str) -> Result<Color, PositionParseError> {
    match turn_part.trim() {
        "R" | "r" => Ok(Color::Red),
        "B" | "b" => Ok(Color::Black),
        other => Err(PositionParseError::InvalidTurn(other.to_owned())),
    }
}

fn parse_piece_list(
    part: &str,
    prefix: char,
    owner: Color,
    board: &mut Board,
    seen: &mut HashSet<u8>,
) -> Result<(), PositionParseError> {
    let part = part.trim();
    let squares = part
        .strip_prefix(prefix)
        .ok_or_else(|| PositionParseError::InvalidPrefix {
            expected: prefix,
            found: part.to_owned(),
        })?;

    for token in squares.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        let (is_king, digits) = match token.strip_prefix('K') {
            Some(rest) => (true, rest),
            None => (false, token),
        };

        let number = digits
            .parse::<u8>()
            .map_err(|_| PositionParseError::InvalidSquare(token.to_owned()))?;
        let pos = Position::from_square_number(number)
            .ok_or_else(|| PositionParseError::InvalidSquare(token.to_owned()))?;

        if !seen.insert(number) {
            return Err(PositionParseError::DuplicateSquare(number));
        }

        board.place(pos, Piece { owner, is_king });
    }

    Ok(())
}
