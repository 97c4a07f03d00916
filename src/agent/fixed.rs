use log::trace;

use crate::{
    action::{Action, ActionSpace},
    gym::Observation,
};

use super::Agent;

/// The scalar cue a [`FixedAgent`] reacts to: `1` means the agent can move down
pub trait DownSignal {
    fn down_signal(&self) -> i64;
}

impl DownSignal for i64 {
    fn down_signal(&self) -> i64 {
        *self
    }
}

impl DownSignal for Observation {
    /// `1` while the agent is above the goal row
    fn down_signal(&self) -> i64 {
        (self.position.0 < self.goal.0) as i64
    }
}

/// A hard-coded policy: go down when possible, otherwise go right
#[derive(Debug, Clone)]
pub struct FixedAgent {
    id: usize,
    action_space: ActionSpace,
    learning: bool,
}

impl FixedAgent {
    pub fn new(id: usize, action_space: ActionSpace) -> Self {
        Self {
            id,
            action_space,
            learning: true,
        }
    }

    pub fn action_space(&self) -> &ActionSpace {
        &self.action_space
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
}

impl<S: DownSignal> Agent<S> for FixedAgent {
    fn act(&mut self, state: &S, _reward: Option<f64>) -> Action {
        let signal = state.down_signal();
        trace!("agent {} got signal {signal}", self.id);
        if signal == 1 {
            Action::Down
        } else {
            Action::Right
        }
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_signal() {
        let mut agent = FixedAgent::new(0, ActionSpace::default());
        assert_eq!(agent.act(&1i64, None), Action::Down);
        assert_eq!(agent.act(&1i64, Some(-1.0)), Action::Down);
        for x in [-3i64, 0, 2, 100] {
            assert_eq!(agent.act(&x, Some(-1.0)), Action::Right, "signal {x}");
        }
    }

    #[test]
    fn grid_observation_goes_down_then_right() {
        let mut agent = FixedAgent::new(0, ActionSpace::default());
        let above = Observation {
            position: (0, 0),
            goal: (2, 2),
        };
        let bottom = Observation {
            position: (2, 0),
            goal: (2, 2),
        };
        assert_eq!(agent.act(&above, None), Action::Down);
        assert_eq!(agent.act(&bottom, None), Action::Right);
    }
}
