use alloc::collections::VecDeque;
use alloc::string::String;
use core::fmt;

use crate::search::{self, SearchConfig};
use crate::*;

/// Where a human player's input comes from: a terminal, a GUI event queue,
/// a script.
pub trait CommandSource {
    /// Next line of input for `side`, or `None` once input is exhausted.
    fn next_command(&mut self, side: Side) -> Option<String>;
}

impl CommandSource for VecDeque<String> {
    fn next_command(&mut self, _side: Side) -> Option<String> {
        self.pop_front()
    }
}

/// What a player produced for its turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlayerMove {
    /// A square picked by the engine.
    Square { row: usize, col: usize },
    /// Raw input, for the command interpreter to make sense of.
    Command(String),
}

impl PlayerMove {
    pub fn square(&self) -> Option<Square> {
        match *self {
            Self::Square { row, col } => Some((row, col)),
            Self::Command(_) => None,
        }
    }
}

impl fmt::Display for PlayerMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Square { row, col } => write!(f, "{row} {col}"),
            Self::Command(text) => f.write_str(text),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Player {
    Human { side: Side },
    Automated { side: Side, config: SearchConfig },
}

impl Player {
    pub const fn human(side: Side) -> Self {
        Self::Human { side }
    }

    pub const fn automated(side: Side, config: SearchConfig) -> Self {
        Self::Automated { side, config }
    }

    pub const fn side(&self) -> Side {
        match *self {
            Self::Human { side } | Self::Automated { side, .. } => side,
        }
    }

    pub const fn is_automated(&self) -> bool {
        matches!(self, Self::Automated { .. })
    }

    /// This player's next move on `board`. Humans read from `input` and
    /// yield `None` when it runs dry; automated players search the board and
    /// never read `input`.
    pub fn get_move(
        &self,
        board: &Board,
        input: &mut dyn CommandSource,
    ) -> Result<Option<PlayerMove>> {
        match *self {
            Self::Human { side } => Ok(input.next_command(side).map(PlayerMove::Command)),
            Self::Automated { side, config } => {
                let report = search::search(board, side, &config)?;
                Ok(Some(PlayerMove::Square {
                    row: board.row(report.square),
                    col: board.col(report.square),
                }))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use alloc::string::ToString;

    fn script(lines: &[&str]) -> VecDeque<String> {
        lines.iter().map(|line| line.to_string()).collect()
    }

    #[test]
    fn human_relays_input_verbatim() {
        let board = Board::new(3).unwrap();
        let player = Player::human(Side::Red);
        let mut input = script(&["size 4", "2 2"]);

        assert_eq!(
            player.get_move(&board, &mut input),
            Ok(Some(PlayerMove::Command("size 4".to_string())))
        );
        assert_eq!(
            player.get_move(&board, &mut input),
            Ok(Some(PlayerMove::Command("2 2".to_string())))
        );
        assert_eq!(player.get_move(&board, &mut input), Ok(None));
    }

    #[test]
    fn automated_plays_search_result() {
        let mut board = Board::new(2).unwrap();
        board.add_spot(Side::Red, (1, 1)).unwrap();
        board.add_spot(Side::Blue, (2, 2)).unwrap();
        board.add_spot(Side::Red, (1, 1)).unwrap();

        // Blue's only square is (2, 2), and it wins the game.
        let player = Player::automated(Side::Blue, SearchConfig::default());
        let mut input = script(&["ignored"]);
        let mv = player.get_move(&board, &mut input).unwrap().unwrap();

        assert_eq!(mv.square(), Some((2, 2)));
        assert_eq!(mv.to_string(), "2 2");
        assert_eq!(input.len(), 1);

        let outcome = board.add_spot(player.side(), mv.square().unwrap()).unwrap();
        assert!(outcome.is_won());
    }

    #[test]
    fn automated_refuses_out_of_turn() {
        let board = Board::new(3).unwrap();
        let player = Player::automated(Side::Blue, SearchConfig::new(2));
        let mut input: VecDeque<String> = VecDeque::new();

        assert_eq!(
            player.get_move(&board, &mut input),
            Err(JumpError::SearchPrecondition(Precondition::WrongSide))
        );
        assert!(player.is_automated());
    }

    #[test]
    fn search_on_another_thread_is_revalidated() {
        let mut live = Board::new(3).unwrap();
        live.add_spot(Side::Red, 0).unwrap();

        let snapshot = live.clone();
        let handle = std::thread::spawn(move || search::choose_move(&snapshot, Side::Blue, 2));

        // The live game moves on while the search runs.
        live.undo();
        live.add_spot(Side::Red, 1).unwrap();

        let square = handle.join().unwrap().unwrap();
        if live.is_legal(Side::Blue, square) {
            live.add_spot(Side::Blue, square).unwrap();
            assert_eq!(live.num_pieces(), 11);
        } else {
            assert_eq!(square, 1);
            assert_eq!(live.num_pieces(), 10);
        }
    }
}
