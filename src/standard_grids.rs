//! A set of pre-made grid worlds

use crate::grid::GridValue::{Empty as E, Exit as X, Start as S, Wall as W};
use crate::grid::{Grid, Gridworld};
use anyhow::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Names the pre-made grids
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StandardGrid {
    /// [`BOOK_GRID`]
    BookGrid,
    /// [`BRIDGE_GRID`]
    BridgeGrid,
    /// [`CLIFF_GRID`]
    #[default]
    CliffGrid,
    /// [`CLIFF_GRID2`]
    CliffGrid2,
    /// [`CLIFF_GRID3`]
    CliffGrid3,
    /// [`DISCOUNT_GRID`]
    DiscountGrid,
    /// [`MAZE_GRID`]
    MazeGrid,
}

impl StandardGrid {
    /// Get a list of all available grids
    pub fn get_all() -> [Self; 7] {
        [
            Self::BookGrid,
            Self::BridgeGrid,
            Self::CliffGrid,
            Self::CliffGrid2,
            Self::CliffGrid3,
            Self::DiscountGrid,
            Self::MazeGrid,
        ]
    }

    /// Get the [`Grid`] associated with this enum
    pub fn get_grid(&self) -> Grid {
        match self {
            Self::BookGrid => BOOK_GRID,
            Self::BridgeGrid => BRIDGE_GRID,
            Self::CliffGrid => CLIFF_GRID,
            Self::CliffGrid2 => CLIFF_GRID2,
            Self::CliffGrid3 => CLIFF_GRID3,
            Self::DiscountGrid => DISCOUNT_GRID,
            Self::MazeGrid => MAZE_GRID,
        }
    }

    /// Get the name used to select this grid
    pub fn name(&self) -> &'static str {
        match self {
            Self::BookGrid => "BookGrid",
            Self::BridgeGrid => "BridgeGrid",
            Self::CliffGrid => "CliffGrid",
            Self::CliffGrid2 => "CliffGrid2",
            Self::CliffGrid3 => "CliffGrid3",
            Self::DiscountGrid => "DiscountGrid",
            Self::MazeGrid => "MazeGrid",
        }
    }

    /// Get the [`Gridworld`] associated with this enum
    pub fn compute_grid(self) -> Result<Gridworld, Error> {
        Gridworld::try_from(self.get_grid())
    }
}

impl fmt::Display for StandardGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StandardGrid {
    type Err = Error;

    /// Names are case sensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::get_all()
            .into_iter()
            .find(|grid| grid.name() == s)
            .ok_or_else(|| {
                let names: Vec<&str> = Self::get_all().iter().map(|g| g.name()).collect();
                Error::msg(format!(
                    "Unknown grid type '{}', expected one of {}",
                    s,
                    names.join(", ")
                ))
            })
    }
}

/// A cliff along the bottom edge, with a small and a large exit
///
/// ```
/// use gridworld_util::standard_grids::CLIFF_GRID;
/// use gridworld_util::grid::Gridworld;
///
/// let grid = Gridworld::try_from(CLIFF_GRID).unwrap();
/// assert_eq!(grid.exits().len(), 2);
/// ```
#[rustfmt::skip]
pub const CLIFF_GRID: Grid = &[
    &[E, E,         E],
    &[E, E,         E],
    &[E, E,         E],
    &[S, X(-100.0), X(100.0)],
];

/// A cliff along the bottom row with a close low-reward exit and a distant high-reward one
#[rustfmt::skip]
pub const CLIFF_GRID2: Grid = &[
    &[E,         E,         E,         E,         E],
    &[X(8.0),    S,         E,         E,         X(10.0)],
    &[X(-100.0), X(-100.0), X(-100.0), X(-100.0), X(-100.0)],
];

/// Like [`CLIFF_GRID2`], without the close exit
#[rustfmt::skip]
pub const CLIFF_GRID3: Grid = &[
    &[E,         E,         E,         E,         E],
    &[S,         E,         E,         E,         X(10.0)],
    &[X(-100.0), X(-100.0), X(-100.0), X(-100.0), X(-100.0)],
];

/// Two exits guarded by walls and a penalty row, for experimenting with the discount
#[rustfmt::skip]
pub const DISCOUNT_GRID: Grid = &[
    &[E,        E,        E,        E,        E],
    &[E,        W,        E,        E,        E],
    &[E,        W,        X(1.0),   W,        X(10.0)],
    &[S,        E,        E,        E,        E],
    &[X(-10.0), X(-10.0), X(-10.0), X(-10.0), X(-10.0)],
];

/// A narrow bridge lined with penalty exits on both sides
#[rustfmt::skip]
pub const BRIDGE_GRID: Grid = &[
    &[W,      X(-100.0), X(-100.0), X(-100.0), X(-100.0), X(-100.0), W],
    &[X(1.0), S,         E,         E,         E,         E,         X(10.0)],
    &[W,      X(-100.0), X(-100.0), X(-100.0), X(-100.0), X(-100.0), W],
];

/// The classic 4x3 grid from the textbook
///
/// ```
/// use gridworld_util::standard_grids::BOOK_GRID;
/// use gridworld_util::grid::Gridworld;
///
/// let grid = Gridworld::try_from(BOOK_GRID).unwrap();
/// assert_eq!(grid.walkable_states().len(), 11);
/// ```
#[rustfmt::skip]
pub const BOOK_GRID: Grid = &[
    &[E, E, E, X(1.0)],
    &[E, W, E, X(-1.0)],
    &[S, E, E, E],
];

/// A small maze with a single exit
#[rustfmt::skip]
pub const MAZE_GRID: Grid = &[
    &[E, E, E, X(1.0)],
    &[W, W, E, W],
    &[E, W, E, E],
    &[E, W, W, E],
    &[S, E, E, E],
];
