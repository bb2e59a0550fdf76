use serde::{Deserialize, Serialize};

use crate::Side;

/// Contents of one square: its owner and how many spots it holds.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    side: Side,
    spots: u8,
}

impl Cell {
    /// A square nobody has played on. It carries one latent spot so that
    /// `num_pieces() + size` starts out even on every board.
    pub const INITIAL: Self = Self {
        side: Side::White,
        spots: 1,
    };

    /// A cell with `spots` spots owned by `side`; zero spots is always white.
    pub const fn new(side: Side, spots: u8) -> Self {
        if spots == 0 {
            Self {
                side: Side::White,
                spots: 0,
            }
        } else {
            Self { side, spots }
        }
    }

    pub const fn side(self) -> Side {
        self.side
    }

    pub const fn spots(self) -> u8 {
        self.spots
    }

    pub const fn is_white(self) -> bool {
        matches!(self.side, Side::White)
    }

    /// This cell with one more spot, now owned by `side`.
    pub const fn with_spot(self, side: Side) -> Self {
        Self {
            side,
            spots: self.spots.saturating_add(1),
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::INITIAL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_spots_is_always_white() {
        assert_eq!(Cell::new(Side::Red, 0), Cell::new(Side::Blue, 0));
        assert!(Cell::new(Side::Red, 0).is_white());
    }

    #[test]
    fn adding_a_spot_takes_ownership() {
        let cell = Cell::new(Side::Blue, 2).with_spot(Side::Red);
        assert_eq!(cell.side(), Side::Red);
        assert_eq!(cell.spots(), 3);
        assert_eq!(Cell::INITIAL.with_spot(Side::Blue), Cell::new(Side::Blue, 2));
    }
}
