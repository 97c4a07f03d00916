use log::trace;
use rand::{rngs::StdRng, SeedableRng};

use crate::action::{Action, ActionSpace};

use super::Agent;

/// Picks a uniformly random action regardless of state or reward
#[derive(Debug, Clone)]
pub struct RandomAgent {
    id: usize,
    action_space: ActionSpace,
    learning: bool,
    rng: StdRng,
}

impl RandomAgent {
    pub fn new(id: usize, action_space: ActionSpace) -> Self {
        Self::with_rng(id, action_space, StdRng::from_entropy())
    }

    /// A reproducible agent
    pub fn with_seed(id: usize, action_space: ActionSpace, seed: u64) -> Self {
        Self::with_rng(id, action_space, StdRng::seed_from_u64(seed))
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn learning(&self) -> bool {
        self.learning
    }

    pub fn set_learning(&mut self, learning: bool) {
        self.learning = learning;
    }

    fn with_rng(id: usize, action_space: ActionSpace, rng: StdRng) -> Self {
        Self {
            id,
            action_space,
            learning: true,
            rng,
        }
    }
}

impl<S> Agent<S> for RandomAgent {
    fn act(&mut self, _state: &S, _reward: Option<f64>) -> Action {
        let action = self.action_space.sample(&mut self.rng);
        trace!("agent {} picked {action} at random", self.id);
        action
    }

    fn id(&self) -> usize {
        self.id
    }

    fn learning(&self) -> bool {
        self.learning
    }

    fn set_learning(&mut self, learning: bool) {
        self.learning = learning;
    }
}
