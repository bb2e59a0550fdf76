//! Move selection for automated players.
//!
//! Minimax with alpha-beta pruning. Red maximizes and Blue minimizes the
//! same score, so positive values favor Red. Every explored move is played
//! on a clone; the board handed in is never touched.
//!
//! Moves are tried in increasing square order and the recorded move only
//! changes on a strictly better value, so among equally good moves the
//! lowest-numbered square wins. A win found nearer the root outscores a
//! later one.

use serde::{Deserialize, Serialize};

use crate::*;

/// Score of a won board. Larger than any difference in owned squares.
pub const WINNING_VALUE: i32 = 1_000_000;

/// Deepest search [`SearchConfig::new`] allows.
pub const MAX_DEPTH: u8 = 6;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Plies to look ahead. One means "pick the best immediate result".
    pub depth: u8,
}

impl SearchConfig {
    pub const fn new_unchecked(depth: u8) -> Self {
        Self { depth }
    }

    pub fn new(depth: u8) -> Self {
        Self::new_unchecked(depth.clamp(1, MAX_DEPTH))
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self::new_unchecked(1)
    }
}

/// Result of a search: the move to play and what it cost to find it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SearchReport {
    pub square: usize,
    pub value: i32,
    pub nodes: u64,
    pub cutoffs: u64,
}

/// Best square for `side` on `board`, looking `depth` plies ahead.
pub fn choose_move(board: &Board, side: Side, depth: u8) -> Result<usize> {
    search(board, side, &SearchConfig::new_unchecked(depth)).map(|report| report.square)
}

/// Searches `board` for `side`, which must be on move in an undecided game.
pub fn search(board: &Board, side: Side, config: &SearchConfig) -> Result<SearchReport> {
    if board.winner().is_some() {
        return Err(JumpError::SearchPrecondition(Precondition::AlreadyWon));
    }
    if !board.is_legal_turn(side) {
        return Err(JumpError::SearchPrecondition(Precondition::WrongSide));
    }
    if config.depth == 0 {
        return Err(JumpError::SearchPrecondition(Precondition::ZeroDepth));
    }

    let work = board.clone();
    let mut searcher = Searcher::default();
    let value = searcher.min_max(&work, config.depth, true, i32::MIN, i32::MAX)?;
    let square = searcher
        .found
        .expect("an undecided board always has a legal move");

    log::trace!(
        "Searched {} nodes with {} cutoffs at depth {}",
        searcher.nodes,
        searcher.cutoffs,
        config.depth
    );
    log::debug!("{side} plays {} (value {value})", board.move_string(square));

    Ok(SearchReport {
        square,
        value,
        nodes: searcher.nodes,
        cutoffs: searcher.cutoffs,
    })
}

/// Heuristic value of `board`: `±WINNING_VALUE` once decided, otherwise
/// squares owned by Red minus squares owned by Blue.
pub fn static_eval(board: &Board) -> i32 {
    match board.winner() {
        Some(Side::Red) => WINNING_VALUE,
        Some(_) => -WINNING_VALUE,
        None => board.num_of_side(Side::Red) as i32 - board.num_of_side(Side::Blue) as i32,
    }
}

/// Value of a won position reached with `depth` plies still to search.
/// Wins closer to the root score higher so the quickest one is preferred.
fn decided_value(winner: Side, depth: u8) -> i32 {
    let value = WINNING_VALUE + i32::from(depth);
    if winner == Side::Red { value } else { -value }
}

#[derive(Debug, Default)]
struct Searcher {
    found: Option<usize>,
    nodes: u64,
    cutoffs: u64,
}

impl Searcher {
    /// Value of `board` searched `depth` plies deep, recording the chosen
    /// move in `found` when `save_move` is set. Decided boards and depth
    /// zero are scored without expanding and record nothing.
    fn min_max(
        &mut self,
        board: &Board,
        depth: u8,
        save_move: bool,
        mut alpha: i32,
        mut beta: i32,
    ) -> Result<i32> {
        self.nodes += 1;
        match board.winner() {
            Some(winner) => return Ok(decided_value(winner, depth)),
            None if depth == 0 => return Ok(static_eval(board)),
            None => {}
        }

        let side = board.whose_move();
        let maximizing = side == Side::Red;
        let mut best = if maximizing { i32::MIN } else { i32::MAX };

        for n in board.legal_moves(side) {
            let mut child = board.clone();
            child.add_spot_quiet(side, n)?;
            let value = self.min_max(&child, depth - 1, false, alpha, beta)?;

            let improved = if maximizing { value > best } else { value < best };
            if improved {
                best = value;
                if save_move {
                    self.found = Some(n);
                }
            }

            if maximizing {
                alpha = alpha.max(value);
            } else {
                beta = beta.min(value);
            }
            if beta <= alpha {
                self.cutoffs += 1;
                break;
            }
        }

        Ok(best)
    }
}
