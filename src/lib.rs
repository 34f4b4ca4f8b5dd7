#![warn(missing_docs)]
//! Utilities for grid world reinforcement learning demos

pub mod constants;
pub mod display;
pub mod grid;
pub mod grid_setup;
pub mod settings;
pub mod standard_grids;
pub mod util;
