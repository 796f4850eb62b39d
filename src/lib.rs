//! Snake on a wrap-around or walled grid with a growing obstacle field.
//!
//! The simulation (`game`, `difficulty`, `grid`, `snake`, `obstacles`) is
//! free of terminal concerns; `session` connects it to a [`score`] store and
//! a [`scheduler`], and `renderer`/`ui` draw snapshots with ratatui.

pub mod config;
pub mod difficulty;
pub mod error;
pub mod game;
pub mod grid;
pub mod input;
pub mod logging;
pub mod obstacles;
pub mod renderer;
pub mod scheduler;
pub mod score;
pub mod session;
pub mod snake;
pub mod terminal_runtime;
pub mod ui;
