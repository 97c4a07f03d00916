//! One-step temporal difference updates

use crate::{
    action::{Action, ActionSpace},
    memory::Exp,
};

use super::{Hashable, QTable};

/// SARSA: bootstrap from the action actually chosen next, `None` when terminal
pub(super) fn sarsa<S: Hashable>(
    table: &mut QTable<S>,
    exp: &Exp<S>,
    next_action: Option<Action>,
    alpha: f64,
    gamma: f64,
) {
    let next_q = match (exp.next_state, next_action) {
        (Some(s), Some(a)) => table.value(s, a),
        _ => 0.0,
    };
    table.nudge(exp.state, exp.action, exp.reward + gamma * next_q, alpha);
}

/// Q-learning: bootstrap from the best action in the next state
pub(super) fn q_learning<S: Hashable>(
    table: &mut QTable<S>,
    exp: &Exp<S>,
    actions: &ActionSpace,
    alpha: f64,
    gamma: f64,
) {
    let max_next_q = exp
        .next_state
        .map_or(0.0, |s| table.max_value(s, actions));
    table.nudge(exp.state, exp.action, exp.reward + gamma * max_next_q, alpha);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded_table() -> QTable<u8> {
        let mut table = QTable::new();
        table.nudge(1, Action::Up, -4.0, 1.0);
        table.nudge(1, Action::Down, -2.0, 1.0);
        table.nudge(1, Action::Right, -2.0, 1.0);
        table.nudge(1, Action::Left, -6.0, 1.0);
        table
    }

    fn exp() -> Exp<u8> {
        Exp {
            state: 0,
            action: Action::Right,
            next_state: Some(1),
            reward: -1.0,
        }
    }

    #[test]
    fn sarsa_uses_chosen_action() {
        let mut table = seeded_table();
        sarsa(&mut table, &exp(), Some(Action::Up), 0.5, 1.0);
        assert_eq!(table.value(0, Action::Right), -2.5);
    }

    #[test]
    fn q_learning_uses_best_action() {
        let mut table = seeded_table();
        q_learning(&mut table, &exp(), &ActionSpace::default(), 0.5, 1.0);
        assert_eq!(table.value(0, Action::Right), -1.5);
    }

    #[test]
    fn terminal_targets_are_the_reward() {
        let mut table = seeded_table();
        let last = Exp {
            next_state: None,
            ..exp()
        };
        sarsa(&mut table, &last, None, 1.0, 1.0);
        assert_eq!(table.value(0, Action::Right), -1.0);

        q_learning(&mut table, &last, &ActionSpace::default(), 0.5, 0.9);
        assert_eq!(table.value(0, Action::Right), -1.0);
    }
}
