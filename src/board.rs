use std::fmt;

use ndarray::{Array, Array2};

use crate::coord::{BOARD_SIZE, Coord};
use crate::stone::StoneColor;


#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum InvalidPlacement {
    OutOfBounds(Coord),
    Occupied { coord: Coord, by: StoneColor },
}

// Stones confirmed by the server. A stone is never moved or removed while the game lasts, so the
// only way to clear a cell is `reset`, which happens when a new game starts.
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    data: Array2<Option<StoneColor>>,
    num_stones: usize,
}

impl Board {
    pub fn new() -> Self {
        Board {
            data: Array::from_elem((BOARD_SIZE as usize, BOARD_SIZE as usize), None),
            num_stones: 0,
        }
    }

    pub fn num_stones(&self) -> usize { self.num_stones }

    pub fn get(&self, coord: Coord) -> Option<StoneColor> {
        coord_to_index(coord).and_then(|idx| self.data[idx])
    }

    pub fn is_empty_at(&self, coord: Coord) -> bool {
        coord.is_on_board() && self.get(coord).is_none()
    }

    pub fn check_placement(&self, coord: Coord) -> Result<(), InvalidPlacement> {
        let idx = coord_to_index(coord).ok_or(InvalidPlacement::OutOfBounds(coord))?;
        match self.data[idx] {
            Some(by) => Err(InvalidPlacement::Occupied { coord, by }),
            None => Ok(()),
        }
    }

    pub fn place(&mut self, coord: Coord, color: StoneColor) -> Result<(), InvalidPlacement> {
        self.check_placement(coord)?;
        let idx = coord_to_index(coord).ok_or(InvalidPlacement::OutOfBounds(coord))?;
        self.data[idx] = Some(color);
        self.num_stones += 1;
        Ok(())
    }

    pub fn reset(&mut self) {
        self.data.fill(None);
        self.num_stones = 0;
    }

    pub fn stones(&self) -> impl Iterator<Item = (Coord, StoneColor)> + '_ {
        Coord::all().filter_map(|coord| self.get(coord).map(|color| (coord, color)))
    }
}

fn coord_to_index(coord: Coord) -> Option<[usize; 2]> {
    coord.is_on_board().then(|| [coord.y as usize, coord.x as usize])
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Board ")?;
        f.debug_map().entries(self.stones()).finish()
    }
}
