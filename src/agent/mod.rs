use crate::{action::Action, memory::Exp};

mod fixed;
mod random;

pub use fixed::{DownSignal, FixedAgent};
pub use random::RandomAgent;

/// A decision maker that maps states of type `S` to actions
pub trait Agent<S> {
    /// Choose an action in `state`
    ///
    /// `reward` is the reward that came with `state`, i.e. the reward for the previous
    /// action, or `None` at the start of an episode.
    fn act(&mut self, state: &S, reward: Option<f64>) -> Action;

    /// Learn from a transition that followed the last call to [`act`](Agent::act)
    ///
    /// Agents that don't learn ignore this.
    fn observe(&mut self, _exp: Exp<S>) {}

    fn id(&self) -> usize;

    /// Whether the agent is training (exploring and updating) or being evaluated
    fn learning(&self) -> bool;

    fn set_learning(&mut self, learning: bool);
}
