/// Tabular action-value learners
pub mod tabular;

pub use tabular::{Method, TabularAgent, TabularAgentConfig};
