//! Battle engine for a two-player grid-combat game: fleet placement, attack
//! resolution, a hunt/target computer opponent and the match state machine
//! that ties them together.

extern crate alloc;

mod ai;
mod attack;
mod board;
mod common;
mod config;
mod game;
mod logging;
mod placement;
mod player;
mod ship;
#[cfg(feature = "cli")]
pub mod cli;

pub use ai::*;
pub use board::*;
pub use common::*;
pub use config::*;
pub use game::*;
pub use logging::{init_logging, init_logging_with, log_level, LOG_ENV};
pub use player::*;
pub use ship::*;
