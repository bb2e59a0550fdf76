//! Game engine and move search for Jump61, a chain-reaction game played on
//! an N×N board.
//!
//! A [`Board`] holds the cells and resolves cascades, [`search`] picks moves
//! for an automated [`Player`].

#![no_std]

extern crate alloc;

pub use board::*;
pub use cell::*;
pub use error::*;
pub use player::*;
pub use types::*;

mod board;
mod cell;
mod error;
mod player;
pub mod search;
mod types;
