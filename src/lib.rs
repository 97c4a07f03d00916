/// Grid actions and action spaces
pub mod action;

/// Agents and the agent interface
pub mod agent;

/// Implemented RL algorithms
pub mod algo;

/// Implementations of strategies for time-decaying hyperparameters
pub mod decay;

/// Environment
pub mod env;

/// Crate error type
pub mod error;

/// Exploration policies
pub mod exploration;

/// Environments
pub mod gym;

/// Transitions
pub mod memory;

/// Running agents in environments
pub mod task;

/// Terminal rendering surface
#[cfg(feature = "viz")]
pub mod viz;

mod util;

pub use action::{Action, ActionSpace};
pub use agent::Agent;
pub use error::{Error, Result};
pub use task::{RLTask, VisualizeConfig};
