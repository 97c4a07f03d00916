use crate::action::Action;

/// Represents a single experience or transition in the environment
#[derive(Debug, Clone, PartialEq)]
pub struct Exp<S> {
    /// The state of the environment before taking the action
    pub state: S,
    /// The action taken in the given state
    pub action: Action,
    /// The state of the environment after the action is taken, or if terminal, `None`
    pub next_state: Option<S>,
    /// The reward received after taking the action
    pub reward: f64,
}

impl<S> Exp<S> {
    /// Whether this transition ended the episode
    pub fn is_terminal(&self) -> bool {
        self.next_state.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_iff_no_next_state() {
        let exp = Exp {
            state: 0,
            action: Action::Down,
            next_state: Some(1),
            reward: -1.0,
        };
        assert!(!exp.is_terminal());

        let last = Exp {
            next_state: None,
            ..exp
        };
        assert!(last.is_terminal());
    }
}
