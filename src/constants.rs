//! Provides constants for the library.

/// Name of the grid to use, one of the [`StandardGrid`](crate::standard_grids::StandardGrid)
/// names (case sensitive)
pub const GRID_WORLD_TYPE: &str = "CliffGrid";
/// Requested window width in pixels, per grid cell
pub const WINDOW_SIZE: u32 = 150;
/// Use the text-only display instead of the graphical one
pub const TEXT_DISPLAY: bool = false;
/// Pause the display after each time step
pub const PAUSE: bool = false;
/// Skip displaying learning episodes
pub const QUIET: bool = false;
/// Animation speed; above 1.0 is faster, between 0.0 and 1.0 is slower
pub const SPEED: f32 = 2.0;
/// Let the user control the agent manually
pub const MANUAL: bool = false;
/// Display each step of value iteration
pub const VALUE_STEPS: bool = false;

/// Reward received on every non-exit step
pub const LIVING_REWARD: f64 = 0.0;
/// Probability that the agent moves in an unintended direction
pub const NOISE: f64 = 0.2;

/// Label of the absorbing state entered after leaving through an exit
pub const TERMINAL_STATE: &str = "TERMINAL_STATE";
/// Number of moves available to an agent
pub const NUM_ACTIONS: usize = 4;
