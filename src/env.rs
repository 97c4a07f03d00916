use std::{
    collections::BTreeMap,
    ops::{Deref, DerefMut, Index},
};

use strum::{Display, EnumString, VariantArray};

use crate::{
    action::ActionSpace,
    error::{Error, Result},
};

/// Represents a Markov decision process, defining the dynamics of an environment
/// in which an agent can operate.
///
/// This base trait represents the common case of a discrete-time MDP with one agent
/// and a finite state space and action space.
pub trait Environment {
    /// A representation of the state of the environment to be passed to an agent
    type State;

    /// A representation of an action that an agent can take to affect the environment
    type Action;

    /// Update the environment in response to an action taken by an agent
    ///
    /// Once a step reports `done`, the caller is responsible for calling [`reset`](Environment::reset)
    fn step(&mut self, action: Self::Action) -> Step<Self::State>;

    /// Reset the environment to an initial state
    ///
    /// **Returns** the initial observation
    fn reset(&mut self) -> Self::State;

    /// Determine if the state is active or terminal
    fn is_active(&self) -> bool;
}

/// An environment with a finite set of actions
pub trait DiscreteActionSpace: Environment {
    fn action_space(&self) -> ActionSpace;
}

/// An environment that can present its current state
pub trait Render {
    fn render(&mut self, mode: RenderMode) -> Result<Rendered>;
}

/// Auxiliary diagnostics attached to a [`Step`]
pub type Info = BTreeMap<&'static str, f64>;

/// The outcome of a single [`Environment::step`]
#[derive(Debug, Clone, PartialEq)]
pub struct Step<S> {
    /// The agent's observation of the environment after the action
    pub observation: S,
    /// Reward for the action just taken
    pub reward: f64,
    /// Whether the episode has ended
    pub done: bool,
    pub info: Info,
}

/// Ways an environment can be presented
#[derive(EnumString, Display, VariantArray, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RenderMode {
    /// Text grid returned as a string
    #[strum(serialize = "ansi")]
    Ansi,
    /// Pixel grid with one RGB pixel per cell
    #[strum(serialize = "rgb_array")]
    RgbArray,
    /// Text grid printed to stdout
    #[default]
    #[strum(serialize = "human")]
    Human,
    /// Heatmap drawn on an interactive terminal surface
    #[strum(serialize = "human2")]
    Human2,
}

impl RenderMode {
    /// Look a mode up by its name, e.g. `"rgb_array"`
    ///
    /// **Errors** with [`Error::UnsupportedRenderMode`] for unknown names
    pub fn from_name(name: &str) -> Result<Self> {
        name.parse()
            .map_err(|_| Error::UnsupportedRenderMode(name.to_owned()))
    }
}

/// The value produced by [`Render::render`]
#[derive(Debug, Clone, PartialEq)]
pub enum Rendered {
    Text(String),
    Rgb(RgbArray),
    /// The frame went to a display as a side effect
    Shown,
}

/// A `rows x cols x 3` image in row-major order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbArray {
    rows: usize,
    cols: usize,
    pixels: Vec<[u8; 3]>,
}

impl RgbArray {
    /// An all-black image
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            pixels: vec![[0; 3]; rows * cols],
        }
    }

    /// `(rows, cols, channels)`
    pub fn shape(&self) -> (usize, usize, usize) {
        (self.rows, self.cols, 3)
    }

    /// **Panics** if `(row, col)` is out of bounds
    pub fn set(&mut self, (row, col): (usize, usize), rgb: [u8; 3]) {
        assert!(row < self.rows && col < self.cols, "pixel out of bounds");
        self.pixels[row * self.cols + col] = rgb;
    }

    pub fn pixels(&self) -> &[[u8; 3]] {
        &self.pixels
    }
}

impl Index<(usize, usize)> for RgbArray {
    type Output = [u8; 3];

    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        assert!(row < self.rows && col < self.cols, "pixel out of bounds");
        &self.pixels[row * self.cols + col]
    }
}

/// Named per-episode counters kept by an environment
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Report {
    values: BTreeMap<&'static str, f64>,
}

impl Report {
    pub fn new(keys: Vec<&'static str>) -> Self {
        Self {
            values: keys.into_iter().map(|k| (k, 0.0)).collect(),
        }
    }

    pub fn keys(&self) -> Vec<&'static str> {
        self.values.keys().copied().collect()
    }

    /// Return the current values and zero every counter
    pub fn take(&mut self) -> BTreeMap<&'static str, f64> {
        let snapshot = self.values.clone();
        self.reset();
        snapshot
    }

    pub fn reset(&mut self) {
        self.values.values_mut().for_each(|v| *v = 0.0);
    }
}

impl Deref for Report {
    type Target = BTreeMap<&'static str, f64>;

    fn deref(&self) -> &Self::Target {
        &self.values
    }
}

impl DerefMut for Report {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.values
    }
}
