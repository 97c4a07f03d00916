use log::{trace, warn};

use crate::{
    action::{Action, ActionSpace},
    env::{DiscreteActionSpace, Environment, Render, RenderMode, Rendered, Report, RgbArray, Step},
    error::{Error, Result},
};

#[cfg(feature = "viz")]
use crate::viz::Surface;

/// `(row, col)` coordinates on the grid
pub type Pos = (usize, usize);

/// Reward handed out for every step, so shorter paths earn larger returns
pub const STEP_REWARD: f64 = -1.0;

const AGENT_RGB: [u8; 3] = [255, 0, 0];
const GOAL_RGB: [u8; 3] = [0, 255, 0];

/// What an agent sees of a [`GridWorld`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Observation {
    pub position: Pos,
    pub goal: Pos,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Active,
    Terminal,
}

/// Configuration for a [`GridWorld`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridWorldConfig {
    pub rows: usize,
    pub cols: usize,
}

impl Default for GridWorldConfig {
    fn default() -> Self {
        Self { rows: 5, cols: 5 }
    }
}

/// An `n x m` grid where the agent starts in the top-left corner and must reach
/// the bottom-right corner
///
/// Moves that would leave the grid are absorbed: the agent stays put and the
/// step still costs [`STEP_REWARD`].
pub struct GridWorld {
    rows: usize,
    cols: usize,
    position: Pos,
    goal: Pos,
    phase: Phase,
    pub report: Report,
    #[cfg(feature = "viz")]
    surface: Option<Surface>,
}

impl GridWorld {
    /// **Errors** if `rows` or `cols` is zero
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(Error::EmptyGrid { rows, cols });
        }

        Ok(Self {
            rows,
            cols,
            position: (0, 0),
            goal: (rows - 1, cols - 1),
            phase: Phase::Active,
            report: Report::new(vec!["reward", "steps"]),
            #[cfg(feature = "viz")]
            surface: None,
        })
    }

    pub fn from_config(config: GridWorldConfig) -> Result<Self> {
        Self::new(config.rows, config.cols)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn position(&self) -> Pos {
        self.position
    }

    pub fn goal(&self) -> Pos {
        self.goal
    }

    pub fn observation(&self) -> Observation {
        Observation {
            position: self.position,
            goal: self.goal,
        }
    }

    /// Where `action` would take the agent, or `None` if it would leave the grid
    fn translate(&self, action: Action) -> Option<Pos> {
        let (d_row, d_col) = action.delta();
        let row = self.position.0.checked_add_signed(d_row)?;
        let col = self.position.1.checked_add_signed(d_col)?;
        (row < self.rows && col < self.cols).then_some((row, col))
    }

    /// Cell symbols, row by row. The later of agent and goal wins a shared cell.
    fn symbols(&self, goal_on_top: bool) -> Vec<Vec<char>> {
        let mut grid = vec![vec!['·'; self.cols]; self.rows];
        let marks = if goal_on_top {
            [(self.position, 'A'), (self.goal, 'G')]
        } else {
            [(self.goal, 'G'), (self.position, 'A')]
        };
        for ((row, col), symbol) in marks {
            grid[row][col] = symbol;
        }
        grid
    }

    fn ansi(&self) -> String {
        self.symbols(false)
            .into_iter()
            .flat_map(|row| row.into_iter().flat_map(|c| [c, ' ']).chain(['\n']))
            .collect()
    }

    fn human_lines(&self) -> Vec<String> {
        self.symbols(true)
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(String::from)
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect()
    }

    fn rgb_array(&self) -> RgbArray {
        let mut img = RgbArray::new(self.rows, self.cols);
        img.set(self.position, AGENT_RGB);
        img.set(self.goal, GOAL_RGB);
        img
    }

    /// Heatmap values: empty `0.0`, agent `0.5`, goal `1.0`
    #[cfg_attr(not(feature = "viz"), allow(dead_code))]
    fn intensities(&self) -> Vec<Vec<f64>> {
        let mut grid = vec![vec![0.0; self.cols]; self.rows];
        grid[self.position.0][self.position.1] = 0.5;
        grid[self.goal.0][self.goal.1] = 1.0;
        grid
    }

    #[cfg(feature = "viz")]
    fn show_heatmap(&mut self) -> Result<Rendered> {
        let intensities = self.intensities();
        if self.surface.is_none() {
            self.surface = Some(Surface::acquire()?);
        }
        if let Some(surface) = self.surface.as_mut() {
            surface.draw_heatmap(&intensities)?;
        }
        Ok(Rendered::Shown)
    }

    #[cfg(not(feature = "viz"))]
    fn show_heatmap(&mut self) -> Result<Rendered> {
        Err(Error::RenderBackendUnavailable(RenderMode::Human2))
    }
}

impl Environment for GridWorld {
    type State = Observation;
    type Action = Action;

    fn step(&mut self, action: Self::Action) -> Step<Self::State> {
        if self.phase == Phase::Terminal {
            warn!("step({action}) on a finished episode, call reset first");
            return Step {
                observation: self.observation(),
                reward: 0.0,
                done: true,
                info: (*self.report).clone(),
            };
        }

        if let Some(next) = self.translate(action) {
            self.position = next;
        }

        let done = self.position == self.goal;
        if done {
            self.phase = Phase::Terminal;
        }

        self.report.entry("steps").and_modify(|x| *x += 1.0);
        self.report.entry("reward").and_modify(|x| *x += STEP_REWARD);
        trace!("{action} -> {:?}, done: {done}", self.position);

        Step {
            observation: self.observation(),
            reward: STEP_REWARD,
            done,
            info: (*self.report).clone(),
        }
    }

    fn reset(&mut self) -> Self::State {
        self.position = (0, 0);
        self.phase = Phase::Active;
        self.report.reset();
        self.observation()
    }

    fn is_active(&self) -> bool {
        self.phase == Phase::Active
    }
}

impl DiscreteActionSpace for GridWorld {
    fn action_space(&self) -> ActionSpace {
        ActionSpace::default()
    }
}

impl Render for GridWorld {
    fn render(&mut self, mode: RenderMode) -> Result<Rendered> {
        match mode {
            RenderMode::Ansi => Ok(Rendered::Text(self.ansi())),
            RenderMode::RgbArray => Ok(Rendered::Rgb(self.rgb_array())),
            RenderMode::Human => {
                for line in self.human_lines() {
                    println!("{line}");
                }
                Ok(Rendered::Shown)
            }
            RenderMode::Human2 => self.show_heatmap(),
        }
    }
}
