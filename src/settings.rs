//! Rarely changed options for a grid world run

use crate::constants::{
    LIVING_REWARD, MANUAL, NOISE, PAUSE, QUIET, SPEED, TEXT_DISPLAY, VALUE_STEPS, WINDOW_SIZE,
};
use crate::standard_grids::StandardGrid;
use anyhow::{anyhow, Context, Error};
use log::debug;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Prefix of the environment variables read by [`GridworldSettings::from_env`]
pub const ENV_PREFIX: &str = "GRIDWORLD_";

/// Options for a grid world run
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridworldSettings {
    /// Which grid to use
    pub grid: StandardGrid,
    /// Requested window width in pixels, per grid cell
    pub window_size: u32,
    /// Use the text-only display
    pub text_display: bool,
    /// Pause the display after each time step
    pub pause: bool,
    /// Skip displaying learning episodes
    pub quiet: bool,
    /// Animation speed; above 1.0 is faster
    pub speed: f32,
    /// Control the agent manually
    pub manual: bool,
    /// Display each step of value iteration
    pub value_steps: bool,
    /// Reward received on every non-exit step
    pub living_reward: f64,
    /// Probability of moving in an unintended direction
    pub noise: f64,
}

impl Default for GridworldSettings {
    fn default() -> Self {
        Self {
            grid: Default::default(),
            window_size: WINDOW_SIZE,
            text_display: TEXT_DISPLAY,
            pause: PAUSE,
            quiet: QUIET,
            speed: SPEED,
            manual: MANUAL,
            value_steps: VALUE_STEPS,
            living_reward: LIVING_REWARD,
            noise: NOISE,
        }
    }
}

fn parse_field<T>(name: &str, value: &str) -> Result<T, Error>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse::<T>()
        .map_err(|e| anyhow!("Invalid value '{}' for {}{}: {}", value, ENV_PREFIX, name, e))
}

impl GridworldSettings {
    /// Builds settings from the defaults, overridden by any `GRIDWORLD_*` environment variables.
    pub fn from_env() -> Result<Self, Error> {
        let mut settings = Self::default();
        settings.apply_overrides(|name| std::env::var(format!("{ENV_PREFIX}{name}")).ok())?;
        Ok(settings)
    }

    /// Overrides fields with the values returned by `lookup`.
    ///
    /// `lookup` receives the variable name without [`ENV_PREFIX`], e.g. `GRID` or `NOISE`, and
    /// returns `None` to keep the current value.
    ///
    /// ```
    /// use gridworld_util::settings::GridworldSettings;
    /// use gridworld_util::standard_grids::StandardGrid;
    ///
    /// let mut settings = GridworldSettings::default();
    /// settings
    ///     .apply_overrides(|name| (name == "GRID").then(|| "MazeGrid".to_string()))
    ///     .unwrap();
    /// assert_eq!(settings.grid, StandardGrid::MazeGrid);
    /// ```
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("GRID") {
            self.grid = v
                .trim()
                .parse()
                .with_context(|| format!("Invalid value for {ENV_PREFIX}GRID"))?;
        }
        if let Some(v) = lookup("WINDOW_SIZE") {
            self.window_size = parse_field("WINDOW_SIZE", &v)?;
        }
        if let Some(v) = lookup("TEXT_DISPLAY") {
            self.text_display = parse_field("TEXT_DISPLAY", &v)?;
        }
        if let Some(v) = lookup("PAUSE") {
            self.pause = parse_field("PAUSE", &v)?;
        }
        if let Some(v) = lookup("QUIET") {
            self.quiet = parse_field("QUIET", &v)?;
        }
        if let Some(v) = lookup("SPEED") {
            self.speed = parse_field("SPEED", &v)?;
        }
        if let Some(v) = lookup("MANUAL") {
            self.manual = parse_field("MANUAL", &v)?;
        }
        if let Some(v) = lookup("VALUE_STEPS") {
            self.value_steps = parse_field("VALUE_STEPS", &v)?;
        }
        if let Some(v) = lookup("LIVING_REWARD") {
            self.living_reward = parse_field("LIVING_REWARD", &v)?;
        }
        if let Some(v) = lookup("NOISE") {
            self.noise = parse_field("NOISE", &v)?;
        }
        debug!("Settings after overrides: {:?}", self);
        self.validate()
    }

    /// Checks that every numeric option is within range.
    pub fn validate(&self) -> Result<(), Error> {
        if self.window_size == 0 {
            return Err(anyhow!("Window size must be positive"));
        }
        if !(self.speed.is_finite() && self.speed > 0.0) {
            return Err(Error::msg(format!("Speed {} must be positive", self.speed)));
        }
        if !self.living_reward.is_finite() {
            return Err(anyhow!("Living reward must be finite"));
        }
        if !(0.0..=1.0).contains(&self.noise) {
            return Err(Error::msg(format!(
                "Noise {} is not within [0, 1]",
                self.noise
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_come_from_constants() {
        let settings = GridworldSettings::default();
        assert_eq!(settings.grid, StandardGrid::CliffGrid);
        assert_eq!(settings.window_size, WINDOW_SIZE);
        assert_eq!(settings.text_display, TEXT_DISPLAY);
        assert_eq!(settings.speed, SPEED);
        assert_eq!(settings.noise, NOISE);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn no_overrides_keeps_defaults() {
        let mut settings = GridworldSettings::default();
        settings.apply_overrides(|_| None).unwrap();
        assert_eq!(settings, GridworldSettings::default());
    }

    #[test]
    fn overrides_parse() {
        let mut settings = GridworldSettings::default();
        settings
            .apply_overrides(lookup_from(&[
                ("GRID", "BridgeGrid"),
                ("WINDOW_SIZE", "80"),
                ("TEXT_DISPLAY", "true"),
                ("SPEED", " 0.5 "),
                ("LIVING_REWARD", "-0.04"),
                ("NOISE", "0"),
                ("QUIET", "true"),
            ]))
            .unwrap();
        assert_eq!(settings.grid, StandardGrid::BridgeGrid);
        assert_eq!(settings.window_size, 80);
        assert!(settings.text_display);
        assert!(settings.quiet);
        assert!(!settings.pause);
        assert_eq!(settings.speed, 0.5);
        assert_eq!(settings.living_reward, -0.04);
        assert_eq!(settings.noise, 0.0);
    }

    #[test]
    fn bad_override_is_error() {
        let mut settings = GridworldSettings::default();
        let err = settings
            .apply_overrides(lookup_from(&[("WINDOW_SIZE", "wide")]))
            .unwrap_err();
        assert!(format!("{}", err).starts_with("Invalid value 'wide' for GRIDWORLD_WINDOW_SIZE"));

        let mut settings = GridworldSettings::default();
        assert!(settings
            .apply_overrides(lookup_from(&[("GRID", "bookgrid")]))
            .is_err());
    }

    #[test]
    fn out_of_range_is_error() {
        let mut settings = GridworldSettings::default();
        assert!(settings
            .apply_overrides(lookup_from(&[("NOISE", "1.5")]))
            .is_err());

        let settings = GridworldSettings {
            speed: 0.0,
            ..Default::default()
        };
        assert!(settings.validate().is_err());

        let settings = GridworldSettings {
            window_size: 0,
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }
}
