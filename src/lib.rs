//! Grid Snake: a discrete, tick-driven Snake engine with a terminal front-end.
//!
//! The engine ([`game::GameState`]) owns all session state and advances one
//! cell per [`game::GameState::step`]. Everything else in the crate is a
//! collaborator: the tick scheduler decides *when* to step, the renderer
//! draws a [`game::Snapshot`], and the score and palette modules handle
//! persistence and optional theme generation.

pub mod collision;
pub mod config;
pub mod direction_buffer;
pub mod food;
pub mod game;
pub mod grid;
pub mod input;
pub mod logging;
pub mod palette;
pub mod renderer;
pub mod scheduler;
pub mod score;
pub mod snake;
pub mod terminal_runtime;
pub mod theme;
pub mod ui;
