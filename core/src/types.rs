use core::fmt;

use serde::{Deserialize, Serialize};

use crate::*;

/// Smallest supported board size.
pub const MIN_SIZE: usize = 2;

/// Largest supported board size.
pub const MAX_SIZE: usize = 10;

/// Owner of a cell. `White` marks a cell nobody has played on yet.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    White,
    Red,
    Blue,
}

impl Side {
    /// The other player. White has no opponent.
    pub const fn opposite(self) -> Self {
        match self {
            Self::Red => Self::Blue,
            Self::Blue => Self::Red,
            Self::White => Self::White,
        }
    }

    pub const fn is_player(self) -> bool {
        !matches!(self, Self::White)
    }

    /// Single-letter code used by the board dump.
    pub const fn code(self) -> char {
        match self {
            Self::White => '-',
            Self::Red => 'r',
            Self::Blue => 'b',
        }
    }
}

impl Default for Side {
    fn default() -> Self {
        Self::White
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::White => "white",
            Self::Red => "red",
            Self::Blue => "blue",
        })
    }
}

/// One-based `(row, col)` coordinates.
pub type Square = (usize, usize);

/// Anything that names a square on a board of a given size: a flat
/// row-major index or one-based `(row, col)` coordinates.
pub trait SquareIndex: Copy {
    fn to_index(self, size: usize) -> Result<usize>;
}

impl SquareIndex for usize {
    fn to_index(self, size: usize) -> Result<usize> {
        if self < size * size {
            Ok(self)
        } else {
            Err(JumpError::InvalidSquare)
        }
    }
}

impl SquareIndex for Square {
    fn to_index(self, size: usize) -> Result<usize> {
        let (row, col) = self;
        if (1..=size).contains(&row) && (1..=size).contains(&col) {
            Ok(sq_num(size, row, col))
        } else {
            Err(JumpError::InvalidSquare)
        }
    }
}

/// Flat index of `(row, col)` on a board with `size` squares on a side.
pub const fn sq_num(size: usize, row: usize, col: usize) -> usize {
    (col - 1) + (row - 1) * size
}

/// Number of orthogonal neighbors of square `n`: 2 in corners, 3 on edges,
/// 4 elsewhere.
pub const fn neighbor_count(size: usize, n: usize) -> u8 {
    let (r, c) = (n / size, n % size);
    let mut count = 0;
    if r > 0 {
        count += 1;
    }
    if r + 1 < size {
        count += 1;
    }
    if c > 0 {
        count += 1;
    }
    if c + 1 < size {
        count += 1;
    }
    count
}

/// Up, down, left, right. Cascades spread in this order.
const DISPLACEMENTS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Applies `delta` to square `n`, returning a value only when it remains on the board.
fn apply_delta(n: usize, delta: (isize, isize), size: usize) -> Option<usize> {
    let (r, c) = (n / size, n % size);
    let (dr, dc) = delta;

    let next_r = r.checked_add_signed(dr)?;
    if next_r >= size {
        return None;
    }

    let next_c = c.checked_add_signed(dc)?;
    if next_c >= size {
        return None;
    }

    Some(next_r * size + next_c)
}

/// Orthogonal neighbors of a square, as flat indices, in cascade order.
#[derive(Clone, Debug)]
pub struct NeighborIter {
    center: usize,
    size: usize,
    index: u8,
}

impl NeighborIter {
    pub fn new(center: usize, size: usize) -> Self {
        Self {
            center,
            size,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if usize::from(self.index) >= DISPLACEMENTS.len() {
                return None;
            }

            let next_item = apply_delta(self.center, DISPLACEMENTS[self.index as usize], self.size);
            self.index += 1;

            if next_item.is_some() {
                return next_item;
            }
        }
    }
}
