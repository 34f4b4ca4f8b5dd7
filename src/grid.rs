//! Logical grid structs and utilities.

use crate::constants::{NUM_ACTIONS, TERMINAL_STATE};
use anyhow::{anyhow, Error};
use nalgebra::Point2;
use num_enum::{IntoPrimitive, TryFromPrimitive};
use std::fmt;

/// Enum for agent actions.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum Action {
    /// Up, towards larger `y`
    North = 0,
    /// Down, towards `y = 0`
    South = 1,
    /// Towards larger `x`
    East = 2,
    /// Towards `x = 0`
    West = 3,
}

impl Action {
    /// Get a list of all available actions, in index order
    pub fn get_all() -> [Self; NUM_ACTIONS] {
        [Self::North, Self::South, Self::East, Self::West]
    }
}

/// Enum for [`Grid`] cell values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GridValue {
    /// Open cell
    Empty,
    /// Wall
    Wall,
    /// Where the agent spawns; otherwise an open cell
    Start,
    /// Exit cell with the reward received when leaving through it
    Exit(f64),
}

impl GridValue {
    /// Returns whether this [`GridValue`] can be occupied by the agent.
    pub fn walkable(self) -> bool {
        self != GridValue::Wall
    }

    /// Returns the exit reward, if this is an exit.
    pub fn reward(self) -> Option<f64> {
        match self {
            GridValue::Exit(reward) => Some(reward),
            _ => None,
        }
    }
}

/// A grid literal, written as rows from top to bottom.
pub type Grid = &'static [&'static [GridValue]];

/// A state of a [`Gridworld`]: either a walkable cell or the terminal state.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum State {
    /// The absorbing state entered after exiting
    Terminal,
    /// The agent stands on this cell
    Cell(Point2<u8>),
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            State::Terminal => write!(f, "{TERMINAL_STATE}"),
            State::Cell(p) => write!(f, "({}, {})", p.x, p.y),
        }
    }
}

/// The moves an agent may choose from
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ActionSpace {
    /// Number of actions
    pub n: usize,
}

impl Default for ActionSpace {
    fn default() -> Self {
        Self { n: NUM_ACTIONS }
    }
}

/// The states an agent may observe
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ObservationSpace {
    /// Number of states
    pub n: usize,
}

/// Validates grid rows.
///
/// A valid grid must satisfy the following conditions:
/// - There must be at least one row and one column.
/// - All rows must have the same length.
/// - It must fit in `u8` coordinates.
/// - There must be exactly one start cell.
/// - There must be at least one exit, and every exit reward must be finite.
fn validate_grid(rows: &[&[GridValue]]) -> Result<(), Error> {
    let width = rows.first().map(|row| row.len()).unwrap_or(0);
    if width == 0 {
        return Err(anyhow!("Grid has no cells"));
    }
    for (i, row) in rows.iter().enumerate() {
        if row.len() != width {
            return Err(Error::msg(format!(
                "Row {} has {} cells, expected {}",
                i,
                row.len(),
                width
            )));
        }
    }
    if width > u8::MAX as usize || rows.len() > u8::MAX as usize {
        return Err(anyhow!("Grid is too large"));
    }

    let starts = rows
        .iter()
        .flat_map(|row| row.iter())
        .filter(|cell| **cell == GridValue::Start)
        .count();
    match starts {
        0 => return Err(anyhow!("Grid has no start cell")),
        1 => {}
        n => return Err(Error::msg(format!("Grid has {} start cells", n))),
    }

    let mut exits = 0;
    for (i, row) in rows.iter().enumerate() {
        for (j, cell) in row.iter().enumerate() {
            if let Some(reward) = cell.reward() {
                if !reward.is_finite() {
                    return Err(Error::msg(format!(
                        "Exit in row {}, column {} has a non-finite reward",
                        i, j
                    )));
                }
                exits += 1;
            }
        }
    }
    if exits == 0 {
        return Err(anyhow!("Grid has no exit cells"));
    }

    Ok(())
}

/// A validated grid together with the parameters of the decision process played on it.
///
/// This struct is created by [`Gridworld::try_from`].
///
/// Cells are indexed by `(x, y)`, where `x` is the column and `y` counts rows upwards from the
/// bottom row of the literal.
///
/// # Examples
///
/// ```
/// use gridworld_util::grid::Gridworld;
/// use gridworld_util::standard_grids::BOOK_GRID;
///
/// let grid = Gridworld::try_from(BOOK_GRID).unwrap();
/// assert_eq!((grid.width(), grid.height()), (4, 3));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Gridworld {
    /// indexed by `grid[x][y]`
    grid: Vec<Vec<GridValue>>,
    width: u8,
    height: u8,

    start: Point2<u8>,
    exits: Vec<Point2<u8>>,
    walkable_states: Vec<Point2<u8>>,

    living_reward: f64,
    noise: f64,
}

impl TryFrom<&[&[GridValue]]> for Gridworld {
    type Error = Error;

    fn try_from(rows: &[&[GridValue]]) -> Result<Self, Self::Error> {
        validate_grid(rows)?;

        let height = rows.len();
        let width = rows[0].len();

        let mut grid = vec![vec![GridValue::Wall; height]; width];
        let mut start = Point2::new(0, 0);
        let mut exits = vec![];
        let mut walkable_states = vec![];

        for x in 0..width {
            for y in 0..height {
                // the first literal row is the top of the grid
                let cell = rows[height - 1 - y][x];
                let pos = Point2::new(x as u8, y as u8);
                grid[x][y] = cell;
                match cell {
                    GridValue::Start => start = pos,
                    GridValue::Exit(_) => exits.push(pos),
                    _ => {}
                }
                if cell.walkable() {
                    walkable_states.push(pos);
                }
            }
        }

        Ok(Gridworld {
            grid,
            width: width as u8,
            height: height as u8,
            start,
            exits,
            walkable_states,
            living_reward: 0.0,
            noise: 0.0,
        })
    }
}

impl Gridworld {
    /// Returns the underlying cells, indexed by `grid[x][y]`.
    pub fn grid(&self) -> &Vec<Vec<GridValue>> {
        &self.grid
    }

    /// Returns the number of columns.
    pub fn width(&self) -> u8 {
        self.width
    }

    /// Returns the number of rows.
    pub fn height(&self) -> u8 {
        self.height
    }

    /// Returns the [`GridValue`] at the given position, or `None` if the position is out of bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// use nalgebra::Point2;
    /// use gridworld_util::grid::{GridValue, Gridworld};
    /// use gridworld_util::standard_grids::BOOK_GRID;
    ///
    /// let grid = Gridworld::try_from(BOOK_GRID).unwrap();
    /// assert_eq!(grid.at(&Point2::new(0, 0)), Some(GridValue::Start));
    /// assert_eq!(grid.at(&Point2::new(3, 2)), Some(GridValue::Exit(1.0)));
    /// assert_eq!(grid.at(&Point2::new(4, 0)), None);
    /// ```
    pub fn at(&self, p: &Point2<u8>) -> Option<GridValue> {
        if p.x >= self.width || p.y >= self.height {
            return None;
        }
        Some(self.grid[p.x as usize][p.y as usize])
    }

    /// Returns the position the agent spawns at.
    pub fn start(&self) -> Point2<u8> {
        self.start
    }

    /// Returns the positions of all exits.
    pub fn exits(&self) -> &Vec<Point2<u8>> {
        &self.exits
    }

    /// Returns the reward for leaving through the given position, or `None` if it is not an exit.
    pub fn exit_reward(&self, p: &Point2<u8>) -> Option<f64> {
        self.at(p)?.reward()
    }

    /// Returns the positions of all cells the agent can occupy.
    pub fn walkable_states(&self) -> &Vec<Point2<u8>> {
        &self.walkable_states
    }

    /// Returns every [`State`]: the terminal state followed by the walkable cells.
    pub fn states(&self) -> Vec<State> {
        std::iter::once(State::Terminal)
            .chain(self.walkable_states.iter().map(|&p| State::Cell(p)))
            .collect()
    }

    /// Returns whether the given state is the terminal state.
    pub fn is_terminal(&self, state: &State) -> bool {
        *state == State::Terminal
    }

    /// Returns the position one step away in the given direction, or `None` if the position is
    /// out of bounds.
    ///
    /// Walls are not considered.
    ///
    /// # Examples
    ///
    /// ```
    /// use nalgebra::Point2;
    /// use gridworld_util::grid::{Action, Gridworld};
    /// use gridworld_util::standard_grids::BOOK_GRID;
    ///
    /// let grid = Gridworld::try_from(BOOK_GRID).unwrap();
    /// assert_eq!(grid.next(&Point2::new(0, 0), Action::North), Some(Point2::new(0, 1)));
    /// assert_eq!(grid.next(&Point2::new(0, 0), Action::West), None);
    /// ```
    pub fn next(&self, p: &Point2<u8>, action: Action) -> Option<Point2<u8>> {
        match action {
            Action::North => {
                let y = p.y.checked_add(1).filter(|&y| y < self.height)?;
                Some(Point2::new(p.x, y))
            }
            Action::South => {
                if p.y == 0 {
                    return None;
                }
                Some(Point2::new(p.x, p.y - 1))
            }
            Action::East => {
                let x = p.x.checked_add(1).filter(|&x| x < self.width)?;
                Some(Point2::new(x, p.y))
            }
            Action::West => {
                if p.x == 0 {
                    return None;
                }
                Some(Point2::new(p.x - 1, p.y))
            }
        }
    }

    /// Returns the reward received on every non-exit step.
    pub fn living_reward(&self) -> f64 {
        self.living_reward
    }

    /// Sets the reward received on every non-exit step.
    pub fn set_living_reward(&mut self, living_reward: f64) {
        self.living_reward = living_reward;
    }

    /// Returns the probability of moving in an unintended direction.
    pub fn noise(&self) -> f64 {
        self.noise
    }

    /// Sets the probability of moving in an unintended direction.
    ///
    /// Fails if `noise` is not within `[0, 1]`.
    pub fn set_noise(&mut self, noise: f64) -> Result<(), Error> {
        if !(0.0..=1.0).contains(&noise) {
            return Err(Error::msg(format!("Noise {} is not within [0, 1]", noise)));
        }
        self.noise = noise;
        Ok(())
    }

    /// Returns the [`ObservationSpace`] covering every [`State`].
    pub fn observation_space(&self) -> ObservationSpace {
        ObservationSpace {
            n: self.walkable_states.len() + 1,
        }
    }
}
