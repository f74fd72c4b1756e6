//! Canonical draughts rule constants.
//!
//! Stores the opening layout in position notation and the row bands each
//! side occupies at the start of a game.

/// Opening position in position notation (Red to move).
pub const STARTING_POSITION: &str =
    "R:R21,22,23,24,25,26,27,28,29,30,31,32:B1,2,3,4,5,6,7,8,9,10,11,12";

/// Rows holding Black men at the start.
pub const BLACK_START_ROWS: std::ops::Range<u8> = 0..3;

/// Rows holding Red men at the start.
pub const RED_START_ROWS: std::ops::Range<u8> = 5..8;

/// Men per side at the start.
pub const PIECES_PER_SIDE: usize = 12;
