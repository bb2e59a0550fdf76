use alloc::boxed::Box;
use alloc::string::{String, ToString};
use alloc::vec;
use alloc::vec::Vec;
use core::fmt;
use core::mem;
use core::ops::Index;

use ndarray::Array2;

use crate::*;

/// Callback run after every externally visible change to a [`Board`].
pub type Notifier = Box<dyn FnMut(&Board) + Send>;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The spot landed without overflowing.
    Placed,
    /// At least one square overflowed.
    Jumped,
    /// The move left one side owning every square.
    Won,
}

impl MoveOutcome {
    pub const fn is_won(self) -> bool {
        matches!(self, Self::Won)
    }
}

/// State of a Jump61 game. Squares are numbered in row-major order from 0,
/// or named by one-based `(row, col)`.
pub struct Board {
    cells: Array2<Cell>,
    red_count: usize,
    blue_count: usize,
    moves: usize,
    last_jumps: usize,
    history: Vec<Array2<Cell>>,
    /// Pending overflow frames, kept between moves to reuse the allocation.
    work: Vec<(usize, NeighborIter)>,
    notifier: Option<Notifier>,
}

impl Board {
    /// A fresh `size`×`size` board.
    pub fn new(size: usize) -> Result<Self> {
        let size = validate_size(size)?;
        let cells = Array2::from_elem((size, size), Cell::INITIAL);
        Ok(Self {
            history: vec![cells.clone()],
            cells,
            red_count: 0,
            blue_count: 0,
            moves: 0,
            last_jumps: 0,
            work: Vec::new(),
            notifier: None,
        })
    }

    /// Resets to a fresh `size`×`size` board and forgets the undo history.
    pub fn clear(&mut self, size: usize) -> Result<()> {
        let size = validate_size(size)?;
        self.cells = Array2::from_elem((size, size), Cell::INITIAL);
        self.red_count = 0;
        self.blue_count = 0;
        self.moves = 0;
        self.last_jumps = 0;
        self.history = vec![self.cells.clone()];
        self.announce();
        Ok(())
    }

    /// Copies the contents of `other` into this board. The notifier stays,
    /// and the copied position replaces the one an undo would return to.
    pub fn copy_from(&mut self, other: &Board) {
        self.cells = other.cells.clone();
        self.red_count = other.red_count;
        self.blue_count = other.blue_count;
        self.moves = other.moves;
        self.last_jumps = other.last_jumps;
        self.refresh_undo();
        self.announce();
    }

    pub fn size(&self) -> usize {
        self.cells.nrows()
    }

    pub fn get(&self, square: impl SquareIndex) -> Result<Cell> {
        let n = square.to_index(self.size())?;
        Ok(self.at(n))
    }

    /// Copy of every cell, indexed by zero-based `[row, col]`.
    pub fn snapshot(&self) -> Array2<Cell> {
        self.cells.clone()
    }

    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells.iter().copied()
    }

    /// Total number of spots on the board.
    pub fn num_pieces(&self) -> usize {
        self.cells.iter().map(|cell| usize::from(cell.spots())).sum()
    }

    /// Number of squares owned by `side`.
    pub fn num_of_side(&self, side: Side) -> usize {
        match side {
            Side::Red => self.red_count,
            Side::Blue => self.blue_count,
            Side::White => self.cells.len() - self.red_count - self.blue_count,
        }
    }

    /// Number of `add_spot` calls since the board was created or cleared,
    /// less any undone.
    pub fn move_count(&self) -> usize {
        self.moves
    }

    /// Number of overflows resolved by the most recent move.
    pub fn last_jumps(&self) -> usize {
        self.last_jumps
    }

    /// Side to move next. Once the game is won this is the loser.
    pub fn whose_move(&self) -> Side {
        if (self.num_pieces() + self.size()) % 2 == 0 {
            Side::Red
        } else {
            Side::Blue
        }
    }

    /// The side owning every square, if there is one.
    pub fn winner(&self) -> Option<Side> {
        let total = self.cells.len();
        if self.red_count == total {
            Some(Side::Red)
        } else if self.blue_count == total {
            Some(Side::Blue)
        } else {
            None
        }
    }

    pub fn exists(&self, row: usize, col: usize) -> bool {
        (row, col).to_index(self.size()).is_ok()
    }

    pub fn exists_index(&self, n: usize) -> bool {
        n.to_index(self.size()).is_ok()
    }

    /// One-based row of square `n`.
    pub fn row(&self, n: usize) -> usize {
        n / self.size() + 1
    }

    /// One-based column of square `n`.
    pub fn col(&self, n: usize) -> usize {
        n % self.size() + 1
    }

    pub fn sq_num(&self, row: usize, col: usize) -> usize {
        sq_num(self.size(), row, col)
    }

    /// Number of orthogonal neighbors of square `n`.
    pub fn neighbors(&self, n: usize) -> u8 {
        neighbor_count(self.size(), n)
    }

    /// Move `n` written as `"row col"`.
    pub fn move_string(&self, n: usize) -> String {
        alloc::format!("{} {}", self.row(n), self.col(n))
    }

    /// True iff `side` may add a spot to `square`: it is unowned or already
    /// belongs to `side`. Out-of-range squares are never legal.
    pub fn is_legal(&self, side: Side, square: impl SquareIndex) -> bool {
        match square.to_index(self.size()) {
            Ok(n) => side.is_player() && self.is_legal_index(side, n),
            Err(_) => false,
        }
    }

    /// True iff it is `side`'s turn.
    pub fn is_legal_turn(&self, side: Side) -> bool {
        side == self.whose_move()
    }

    /// Squares `side` may play on, in increasing order.
    pub fn legal_moves(&self, side: Side) -> impl Iterator<Item = usize> + '_ {
        (0..self.cells.len()).filter(move |&n| side.is_player() && self.is_legal_index(side, n))
    }

    /// Adds a spot for `side` at `square` and resolves every overflow it
    /// causes before returning.
    pub fn add_spot(&mut self, side: Side, square: impl SquareIndex) -> Result<MoveOutcome> {
        let outcome = self.add_spot_quiet(side, square)?;
        self.mark_undo();
        self.announce();
        Ok(outcome)
    }

    /// [`Board::add_spot`] without recording history or notifying. Used on
    /// the throwaway boards explored by the search.
    pub(crate) fn add_spot_quiet(
        &mut self,
        side: Side,
        square: impl SquareIndex,
    ) -> Result<MoveOutcome> {
        let n = square.to_index(self.size())?;
        if !side.is_player() || !self.is_legal_index(side, n) {
            return Err(JumpError::IllegalMove { side, square: n });
        }
        if self.winner().is_some() {
            return Err(JumpError::GameOver);
        }
        if !self.is_legal_turn(side) {
            return Err(JumpError::IllegalMove { side, square: n });
        }

        self.put(n, self.at(n).with_spot(side));
        self.last_jumps = if self.is_overfull(n) && self.winner().is_none() {
            self.jump(n)
        } else {
            0
        };
        self.moves += 1;

        Ok(if self.winner().is_some() {
            MoveOutcome::Won
        } else if self.last_jumps > 0 {
            MoveOutcome::Jumped
        } else {
            MoveOutcome::Placed
        })
    }

    /// Replaces the square with `spots` spots owned by `side` (white when
    /// `spots` is zero). No overflow is resolved and no move is recorded;
    /// the edit becomes part of the position an undo returns to.
    pub fn set(&mut self, square: impl SquareIndex, spots: u8, side: Side) -> Result<()> {
        let n = square.to_index(self.size())?;
        self.put(n, Cell::new(side, spots));
        self.refresh_undo();
        self.announce();
        Ok(())
    }

    /// Takes back the last move. Does nothing when no move is left to undo.
    pub fn undo(&mut self) {
        if self.history.len() <= 1 {
            log::debug!("Nothing to undo");
            return;
        }

        self.history.pop();
        if let Some(previous) = self.history.last() {
            self.cells = previous.clone();
        }
        self.recount();
        self.moves = self.moves.saturating_sub(1);
        self.last_jumps = 0;
        self.announce();
    }

    /// Installs `notify`, which is called immediately and then after every
    /// change to the board.
    pub fn set_notifier(&mut self, notify: impl FnMut(&Board) + Send + 'static) {
        self.notifier = Some(Box::new(notify));
        self.announce();
    }

    /// Multi-line rendition with row and column numbers, for people.
    pub fn to_display_string(&self) -> String {
        Grid(self).to_string()
    }

    /// Overflows square `start` and everything it sets off, depth first.
    /// Stops the moment one side owns the whole board. Returns the number of
    /// squares that overflowed.
    fn jump(&mut self, start: usize) -> usize {
        let size = self.size();
        let mut stack = mem::take(&mut self.work);
        stack.clear();

        self.overflow(start);
        stack.push((start, NeighborIter::new(start, size)));
        let mut jumps = 1;

        loop {
            let Some((source, neighbors)) = stack.last_mut() else {
                break;
            };
            let source = *source;
            let Some(n) = neighbors.next() else {
                stack.pop();
                continue;
            };

            let side = self.at(source).side();
            self.put(n, self.at(n).with_spot(side));

            if self.winner().is_some() {
                if self.overfull_squares().next().is_some() {
                    log::debug!("Cascade from {start} stopped on a won board with overfull squares");
                }
                stack.clear();
                break;
            }

            if self.is_overfull(n) {
                self.overflow(n);
                stack.push((n, NeighborIter::new(n, size)));
                jumps += 1;
            }
        }

        log::trace!("Move at {start} overflowed {jumps} squares");
        self.work = stack;
        jumps
    }

    /// Leaves one spot on `n`, ready to hand the rest to its neighbors.
    fn overflow(&mut self, n: usize) {
        let side = self.at(n).side();
        self.put(n, Cell::new(side, 1));
    }

    fn is_overfull(&self, n: usize) -> bool {
        self.at(n).spots() > self.neighbors(n)
    }

    fn overfull_squares(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.cells.len()).filter(|&n| self.is_overfull(n))
    }

    fn is_legal_index(&self, side: Side, n: usize) -> bool {
        let owner = self.at(n).side();
        owner == side || owner == Side::White
    }

    fn at(&self, n: usize) -> Cell {
        let size = self.size();
        self.cells[[n / size, n % size]]
    }

    /// Stores `cell` at `n`, keeping the per-side counts in step.
    fn put(&mut self, n: usize, cell: Cell) {
        let size = self.size();
        let old = mem::replace(&mut self.cells[[n / size, n % size]], cell);
        match old.side() {
            Side::Red => self.red_count -= 1,
            Side::Blue => self.blue_count -= 1,
            Side::White => {}
        }
        match cell.side() {
            Side::Red => self.red_count += 1,
            Side::Blue => self.blue_count += 1,
            Side::White => {}
        }
    }

    fn recount(&mut self) {
        self.red_count = self.cells.iter().filter(|cell| cell.side() == Side::Red).count();
        self.blue_count = self.cells.iter().filter(|cell| cell.side() == Side::Blue).count();
    }

    fn mark_undo(&mut self) {
        self.history.push(self.cells.clone());
    }

    /// Makes the current cells the position the next undo lands on.
    fn refresh_undo(&mut self) {
        if let Some(top) = self.history.last_mut() {
            *top = self.cells.clone();
        }
    }

    fn announce(&mut self) {
        if let Some(mut notify) = self.notifier.take() {
            notify(self);
            self.notifier = Some(notify);
        }
    }
}

fn validate_size(size: usize) -> Result<usize> {
    if (MIN_SIZE..=MAX_SIZE).contains(&size) {
        Ok(size)
    } else {
        Err(JumpError::InvalidSize(size))
    }
}

/// Clones share no state with the original: the copy gets its own cells, an
/// empty undo history and no notifier.
impl Clone for Board {
    fn clone(&self) -> Self {
        Self {
            cells: self.cells.clone(),
            red_count: self.red_count,
            blue_count: self.blue_count,
            moves: self.moves,
            last_jumps: self.last_jumps,
            history: Vec::new(),
            work: Vec::new(),
            notifier: None,
        }
    }
}

impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.cells == other.cells
    }
}

impl Eq for Board {}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Board")
            .field("cells", &self.cells)
            .field("moves", &self.moves)
            .field("history", &self.history.len())
            .finish_non_exhaustive()
    }
}

/// Dumped form, one row per line between `===` markers.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "===")?;
        for row in self.cells.rows() {
            f.write_str("   ")?;
            for cell in row {
                write!(f, " {}{}", cell.spots(), cell.side().code())?;
            }
            writeln!(f)?;
        }
        write!(f, "===")
    }
}

/// Labeled grid behind [`Board::to_display_string`].
struct Grid<'a>(&'a Board);

impl fmt::Display for Grid<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let board = self.0;
        for (i, row) in board.cells.rows().into_iter().enumerate() {
            write!(f, "{:2}", i + 1)?;
            for cell in row {
                write!(f, " {}{}", cell.spots(), cell.side().code())?;
            }
            writeln!(f)?;
        }
        f.write_str("  ")?;
        for col in 1..=board.size() {
            write!(f, "{col:3}")?;
        }
        Ok(())
    }
}

impl Index<usize> for Board {
    type Output = Cell;

    fn index(&self, n: usize) -> &Self::Output {
        let size = self.size();
        &self.cells[[n / size, n % size]]
    }
}

impl Index<Square> for Board {
    type Output = Cell;

    fn index(&self, (row, col): Square) -> &Self::Output {
        &self.cells[[row - 1, col - 1]]
    }
}
