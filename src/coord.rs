use std::fmt;

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use static_assertions::const_assert;


// Must match the server board.
pub const BOARD_SIZE: u8 = 15;

const_assert!(BOARD_SIZE > 0);


// Coordinates come straight from the wire, so they are allowed to be out of range. Use
// `is_on_board` before indexing anything with them.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub const fn new(x: i32, y: i32) -> Self { Self { x, y } }

    pub fn is_on_board(self) -> bool {
        (0..BOARD_SIZE as i32).contains(&self.x) && (0..BOARD_SIZE as i32).contains(&self.y)
    }

    // Row-major, matching the order in which the grid cells are created.
    pub fn cell_index(self) -> Option<usize> {
        self.is_on_board()
            .then(|| self.y as usize * BOARD_SIZE as usize + self.x as usize)
    }

    pub fn all() -> impl Iterator<Item = Coord> {
        (0..BOARD_SIZE as i32)
            .cartesian_product(0..BOARD_SIZE as i32)
            .map(|(y, x)| Coord { x, y })
    }
}

impl fmt::Debug for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Coord({}, {})", self.x, self.y)
    }
}
