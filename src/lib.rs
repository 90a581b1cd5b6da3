//! Fixed-tick snake simulation with wraparound edges.
//!
//! The core ([`game`], [`snake`], [`food`], [`input`]) is plain data advanced
//! by [`game::GameState::tick`]. The terminal front end reads that state each
//! frame and never mutates it except through inputs and ticks.

pub mod clock;
pub mod config;
pub mod error;
pub mod food;
pub mod game;
pub mod input;
pub mod renderer;
pub mod snake;
pub mod terminal_runtime;
pub mod ui;
