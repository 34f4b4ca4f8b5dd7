//! Static information needed to set up a grid world run
use crate::display::{select_display, DisplayMode};
use crate::grid::Gridworld;
use crate::settings::GridworldSettings;
use anyhow::Error;
use log::info;

/// Builds the [`Gridworld`] named by the settings, with their living reward and noise applied.
///
/// ```
/// use gridworld_util::grid_setup::get_grid_world;
/// use gridworld_util::settings::GridworldSettings;
///
/// let grid = get_grid_world(&GridworldSettings::default()).unwrap();
/// assert_eq!(grid.noise(), 0.2);
/// ```
pub fn get_grid_world(settings: &GridworldSettings) -> Result<Gridworld, Error> {
    let mut grid = settings.grid.compute_grid()?;
    grid.set_living_reward(settings.living_reward);
    grid.set_noise(settings.noise)?;
    info!(
        "Loaded {} ({}x{}, {} exits)",
        settings.grid,
        grid.width(),
        grid.height(),
        grid.exits().len()
    );
    Ok(grid)
}

/// Everything a run needs before an agent starts
#[derive(Clone, Debug, PartialEq)]
pub struct GridworldSetup {
    /// The grid
    grid: Gridworld,
    /// How the run should be shown
    display: DisplayMode,
    /// Pause after each time step
    pause: bool,
    /// Skip displaying learning episodes
    quiet: bool,
}

impl GridworldSetup {
    /// Create a new GridworldSetup from settings
    pub fn new(settings: &GridworldSettings) -> Result<Self, Error> {
        settings.validate()?;
        let grid = get_grid_world(settings)?;
        let display = select_display(settings);
        info!("Using {:?} display", display);
        Ok(Self {
            grid,
            display,
            pause: settings.pause,
            quiet: settings.quiet,
        })
    }

    /// Returns the grid
    pub fn grid(&self) -> &Gridworld {
        &self.grid
    }

    /// Returns the display mode
    pub fn display(&self) -> DisplayMode {
        self.display
    }

    /// Returns whether the display should pause after each time step
    pub fn pause(&self) -> bool {
        self.pause
    }

    /// Returns whether learning episodes should be hidden
    pub fn quiet(&self) -> bool {
        self.quiet
    }
}
