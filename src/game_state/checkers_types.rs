//! Core value types shared by the board, move generation and the engine.
//!
//! Coordinates are `(row, col)` with row 0 on Black's side of the board and
//! column 0 on the left. Only dark squares (`row + col` odd) ever hold pieces.

use serde::{Deserialize, Serialize};

pub use crate::game_state::board::Board;
pub use crate::game_state::game_state::CheckersGame;

/// Board edge length.
pub const BOARD_SIZE: u8 = 8;

/// Number of playable (dark) squares.
pub const PLAYABLE_SQUARES: u8 = 32;

/// Side to move / piece owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Black,
}

impl Color {
    #[inline]
    pub const fn opponent(self) -> Self {
        match self {
            Color::Red => Color::Black,
            Color::Black => Color::Red,
        }
    }

    /// Row on which this side's men are crowned.
    #[inline]
    pub const fn crowning_row(self) -> u8 {
        match self {
            Color::Red => 0,
            Color::Black => BOARD_SIZE - 1,
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Color::Red => write!(f, "red"),
            Color::Black => write!(f, "black"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub owner: Color,
    pub is_king: bool,
}

impl Piece {
    #[inline]
    pub const fn man(owner: Color) -> Self {
        Self {
            owner,
            is_king: false,
        }
    }

    #[inline]
    pub const fn king(owner: Color) -> Self {
        Self {
            owner,
            is_king: true,
        }
    }

    /// Diagonal directions this piece may step or jump along.
    pub fn directions(self) -> &'static [(i8, i8)] {
        const RED_MAN: [(i8, i8); 2] = [(-1, -1), (-1, 1)];
        const BLACK_MAN: [(i8, i8); 2] = [(1, -1), (1, 1)];
        const KING: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

        match (self.is_king, self.owner) {
            (true, _) => &KING,
            (false, Color::Red) => &RED_MAN,
            (false, Color::Black) => &BLACK_MAN,
        }
    }
}

/// A square on the board. Always in range once constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: u8,
    pub col: u8,
}

impl Position {
    /// Checked constructor; `None` for anything off the board.
    #[inline]
    pub fn new(row: i32, col: i32) -> Option<Self> {
        if is_on_board(row, col) {
            Some(Self {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    #[inline]
    pub const fn is_dark(self) -> bool {
        (self.row + self.col) % 2 == 1
    }

    /// Square `distance` steps away along `(d_row, d_col)`, if still on the board.
    #[inline]
    pub fn offset(self, d_row: i8, d_col: i8, distance: i8) -> Option<Self> {
        Self::new(
            self.row as i32 + (d_row * distance) as i32,
            self.col as i32 + (d_col * distance) as i32,
        )
    }

    /// Standard draughts numbering: 1..=32 over dark squares, row by row.
    pub fn from_square_number(number: u8) -> Option<Self> {
        if !(1..=PLAYABLE_SQUARES).contains(&number) {
            return None;
        }
        let index = number - 1;
        let row = index / 4;
        let col = 2 * (index % 4) + if row % 2 == 0 { 1 } else { 0 };
        Some(Self { row, col })
    }

    /// Inverse of [`Position::from_square_number`]; `None` on light squares.
    pub fn square_number(self) -> Option<u8> {
        if !self.is_dark() {
            return None;
        }
        Some(self.row * 4 + self.col / 2 + 1)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[inline]
pub fn is_on_board(row: i32, col: i32) -> bool {
    (0..BOARD_SIZE as i32).contains(&row) && (0..BOARD_SIZE as i32).contains(&col)
}

/// Candidate destination for the selected piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub row: u8,
    pub col: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capture: Option<Position>,
}

impl Move {
    #[inline]
    pub const fn step(to: Position) -> Self {
        Self {
            row: to.row,
            col: to.col,
            capture: None,
        }
    }

    #[inline]
    pub const fn jump(to: Position, captured: Position) -> Self {
        Self {
            row: to.row,
            col: to.col,
            capture: Some(captured),
        }
    }

    #[inline]
    pub const fn destination(&self) -> Position {
        Position {
            row: self.row,
            col: self.col,
        }
    }

    #[inline]
    pub const fn is_jump(&self) -> bool {
        self.capture.is_some()
    }

    #[inline]
    pub fn lands_on(&self, row: i32, col: i32) -> bool {
        self.row as i32 == row && self.col as i32 == col
    }
}
