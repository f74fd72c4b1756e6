//! 8x8 draughts board.
//!
//! `Board` is a plain grid of optional pieces. All reads take signed
//! coordinates and treat anything off the board as empty, so callers never
//! index out of bounds.

use serde::{Deserialize, Serialize};

use crate::errors::BoardError;
use crate::game_state::checkers_rules::{BLACK_START_ROWS, RED_START_ROWS};
use crate::game_state::checkers_types::*;

type Grid = [[Option<Piece>; BOARD_SIZE as usize]; BOARD_SIZE as usize];

/// Serialized as the bare 8x8 grid. Deserializing rejects pieces on light squares.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "Grid", into = "Grid")]
pub struct Board {
    squares: Grid,
}

impl TryFrom<Grid> for Board {
    type Error = BoardError;

    fn try_from(squares: Grid) -> Result<Self, Self::Error> {
        let board = Self { squares };
        let misplaced = board.occupied().find(|(pos, _)| !pos.is_dark());
        match misplaced {
            Some((pos, _)) => Err(BoardError::PieceOnLightSquare(pos)),
            None => Ok(board),
        }
    }
}

impl From<Board> for Grid {
    fn from(board: Board) -> Self {
        board.squares
    }
}

impl Board {
    #[inline]
    pub fn new_empty() -> Self {
        Self::default()
    }

    /// Standard opening layout: Black on rows 0-2, Red on rows 5-7, dark squares only.
    pub fn starting() -> Self {
        let mut board = Self::new_empty();
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                let pos = Position { row, col };
                if !pos.is_dark() {
                    continue;
                }
                if BLACK_START_ROWS.contains(&row) {
                    board.squares[row as usize][col as usize] = Some(Piece::man(Color::Black));
                } else if RED_START_ROWS.contains(&row) {
                    board.squares[row as usize][col as usize] = Some(Piece::man(Color::Red));
                }
            }
        }
        board
    }

    #[inline]
    pub fn piece_at(&self, pos: Position) -> Option<Piece> {
        self.squares[pos.row as usize][pos.col as usize]
    }

    /// Bounds-checked lookup for raw caller coordinates.
    #[inline]
    pub fn get(&self, row: i32, col: i32) -> Option<Piece> {
        Position::new(row, col).and_then(|pos| self.piece_at(pos))
    }

    #[inline]
    pub fn is_empty_at(&self, pos: Position) -> bool {
        self.piece_at(pos).is_none()
    }

    /// Place a piece. Light squares are refused so the dark-square invariant holds.
    pub fn place(&mut self, pos: Position, piece: Piece) -> bool {
        if !pos.is_dark() {
            return false;
        }
        self.squares[pos.row as usize][pos.col as usize] = Some(piece);
        true
    }

    #[inline]
    pub fn take(&mut self, pos: Position) -> Option<Piece> {
        self.squares[pos.row as usize][pos.col as usize].take()
    }

    #[inline]
    pub(crate) fn piece_at_mut(&mut self, pos: Position) -> Option<&mut Piece> {
        self.squares[pos.row as usize][pos.col as usize].as_mut()
    }

    /// Every occupied square in row-major order.
    pub fn occupied(&self) -> impl Iterator<Item = (Position, Piece)> + '_ {
        self.squares.iter().enumerate().flat_map(|(row, cells)| {
            cells.iter().enumerate().filter_map(move |(col, cell)| {
                cell.map(|piece| {
                    (
                        Position {
                            row: row as u8,
                            col: col as u8,
                        },
                        piece,
                    )
                })
            })
        })
    }

    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Position, Piece)> + '_ {
        self.occupied().filter(move |(_, piece)| piece.owner == color)
    }

    pub fn count(&self, color: Color) -> usize {
        self.pieces_of(color).count()
    }

    pub fn king_count(&self, color: Color) -> usize {
        self.pieces_of(color).filter(|(_, piece)| piece.is_king).count()
    }
}
