//! Classic single-player snake on a wrapping grid.
//!
//! The core (`board`, `snake`, `food`, `game`) has no terminal dependency;
//! `term` and `clock` are the shells the binary plugs into `Game::run`.

pub mod board;
pub mod clock;
pub mod config;
pub mod food;
pub mod game;
pub mod snake;
pub mod term;

/// Terminal column and row.
pub type Coords = (u16, u16);

pub use board::{Board, Cell};
pub use config::GameConfig;
pub use game::Game;
pub use snake::{Direction, Snake};
