use crate::memory::Exp;

use super::{Hashable, QTable};

/// The transitions of the episode in progress
#[derive(Debug, Clone)]
pub(super) struct Trajectory<S> {
    steps: Vec<Exp<S>>,
}

impl<S: Hashable> Trajectory<S> {
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    pub fn push(&mut self, exp: Exp<S>) {
        self.steps.push(exp);
    }

    pub fn clear(&mut self) {
        self.steps.clear();
    }

    /// Walk the finished episode backwards, moving every visited `Q(s, a)` towards
    /// the discounted return that followed it
    pub fn flush(&mut self, table: &mut QTable<S>, alpha: f64, gamma: f64) {
        let mut ret = 0.0;
        for exp in self.steps.drain(..).rev() {
            ret = exp.reward + gamma * ret;
            table.nudge(exp.state, exp.action, ret, alpha);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::action::Action;

    use super::*;

    #[test]
    fn returns_are_discounted_backwards() {
        let mut table = QTable::new();
        let mut trajectory = Trajectory::new();
        trajectory.push(Exp {
            state: 0u8,
            action: Action::Right,
            next_state: Some(1),
            reward: -1.0,
        });
        trajectory.push(Exp {
            state: 1u8,
            action: Action::Down,
            next_state: None,
            reward: -1.0,
        });

        trajectory.flush(&mut table, 1.0, 0.5);
        assert_eq!(table.value(1, Action::Down), -1.0);
        assert_eq!(table.value(0, Action::Right), -1.5);

        trajectory.flush(&mut table, 1.0, 0.5);
        assert_eq!(table.visits(0, Action::Right), 1, "Flushing drains the episode");
    }
}
