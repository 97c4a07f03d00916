use std::collections::HashMap;

use rand::{seq::SliceRandom, Rng};

use crate::{action::Action, memory::Exp};

use super::Hashable;

/// A deterministic model of the environment learned from real transitions
#[derive(Debug, Clone)]
pub(super) struct Model<S: Hashable> {
    transitions: HashMap<(S, Action), (f64, Option<S>)>,
    /// Observed pairs in first-seen order, for uniform sampling
    seen: Vec<(S, Action)>,
}

impl<S: Hashable> Model<S> {
    pub fn new() -> Self {
        Self {
            transitions: HashMap::new(),
            seen: Vec::new(),
        }
    }

    /// Remember the latest outcome of `(state, action)`
    pub fn record(&mut self, exp: Exp<S>) {
        let key = (exp.state, exp.action);
        if self
            .transitions
            .insert(key, (exp.reward, exp.next_state))
            .is_none()
        {
            self.seen.push(key);
        }
    }

    /// Replay a uniformly chosen previously observed pair, `None` if nothing was observed
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Exp<S>> {
        let &(state, action) = self.seen.choose(rng)?;
        let &(reward, next_state) = self.transitions.get(&(state, action))?;
        Some(Exp {
            state,
            action,
            next_state,
            reward,
        })
    }
}
