use std::{collections::HashMap, hash::Hash};

use log::{debug, trace};
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

use crate::{
    action::{Action, ActionSpace},
    agent::Agent,
    assert_interval,
    decay::{self, Decay},
    exploration::{Choice, EpsilonGreedy},
    memory::Exp,
};

use self::{dyna_q::Model, monte_carlo::Trajectory};

mod dyna_q;
mod monte_carlo;
mod td;

/// A trait for state and action types that can be used as keys in a [`HashMap`]
pub trait Hashable: Copy + Eq + Hash {}

impl<T> Hashable for T where T: Copy + Eq + Hash {}

/// The update rule a [`TabularAgent`] learns with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// Every-visit constant-α Monte Carlo
    MonteCarlo,
    /// SARSA
    OnPolicyTd,
    /// Q-learning
    OffPolicyTd,
    /// Q-learning plus `planning_steps` simulated updates per real step
    DynaQ { planning_steps: usize },
}

/// Configuration for the [`TabularAgent`]
#[derive(Debug, Clone)]
pub struct TabularAgentConfig<D: Decay> {
    pub exploration: EpsilonGreedy<D>,
    /// Step size
    pub alpha: f64,
    pub gamma: f64,
    /// Seed for exploration and planning, or `None` for entropy
    pub seed: Option<u64>,
}

impl Default for TabularAgentConfig<decay::Exponential> {
    fn default() -> Self {
        Self {
            exploration: EpsilonGreedy::new(decay::Exponential::new(0.01, 1.0, 0.05).unwrap()),
            alpha: 0.5,
            gamma: 0.99,
            seed: None,
        }
    }
}

/// An entry in the table
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Entry {
    value: f64,
    count: u32,
}

/// Action values keyed by `(state, action)`, zero when unvisited
#[derive(Debug, Clone)]
pub struct QTable<S: Hashable> {
    entries: HashMap<(S, Action), Entry>,
}

impl<S: Hashable> QTable<S> {
    fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    pub fn value(&self, state: S, action: Action) -> f64 {
        self.entries
            .get(&(state, action))
            .copied()
            .unwrap_or_default()
            .value
    }

    /// How many updates `Q(s, a)` has received
    pub fn visits(&self, state: S, action: Action) -> u32 {
        self.entries
            .get(&(state, action))
            .map_or(0, |e| e.count)
    }

    /// Largest action value in `state`
    pub fn max_value(&self, state: S, actions: &ActionSpace) -> f64 {
        actions
            .iter()
            .map(|a| self.value(state, a))
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Number of visited state-action pairs
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Best action in `state`, ties broken uniformly at random
    fn greedy<R: Rng + ?Sized>(&self, state: S, actions: &ActionSpace, rng: &mut R) -> Action {
        let best = self.max_value(state, actions);
        let ties = actions
            .iter()
            .filter(|&a| self.value(state, a) == best)
            .collect::<Vec<_>>();
        *ties.choose(rng).expect("the best action is among the actions")
    }

    fn entry(&mut self, state: S, action: Action) -> &mut Entry {
        self.entries.entry((state, action)).or_default()
    }

    /// Move `Q(s, a)` a fraction `alpha` of the way towards `target`
    fn nudge(&mut self, state: S, action: Action, target: f64, alpha: f64) {
        let entry = self.entry(state, action);
        entry.count += 1;
        entry.value += alpha * (target - entry.value);
    }
}

/// Per-method learning state
#[derive(Debug, Clone)]
enum Learner<S: Hashable> {
    MonteCarlo(Trajectory<S>),
    OnPolicyTd { pending: Option<Exp<S>> },
    OffPolicyTd,
    DynaQ { model: Model<S>, planning_steps: usize },
}

impl<S: Hashable> Learner<S> {
    fn new(method: Method) -> Self {
        match method {
            Method::MonteCarlo => Learner::MonteCarlo(Trajectory::new()),
            Method::OnPolicyTd => Learner::OnPolicyTd { pending: None },
            Method::OffPolicyTd => Learner::OffPolicyTd,
            Method::DynaQ { planning_steps } => Learner::DynaQ {
                model: Model::new(),
                planning_steps,
            },
        }
    }

    /// Drop the leftovers of an episode that was cut short
    fn discard_partial(&mut self) {
        match self {
            Learner::MonteCarlo(trajectory) => trajectory.clear(),
            Learner::OnPolicyTd { pending } => *pending = None,
            Learner::OffPolicyTd | Learner::DynaQ { .. } => {}
        }
    }
}

/// A tabular learning agent with epsilon-greedy exploration
///
/// The [`Method`] picks the update rule. While [`learning`](Agent::learning) is `false`
/// the agent acts greedily and its table is left untouched.
///
/// Unvisited pairs keep the value 0 while visited ones drift negative, so a greedy
/// agent that never tried a wall-bumping move picks it forever and an episode run by
/// [`RLTask::interact`](crate::RLTask::interact) never ends. Evaluate an undertrained
/// agent with [`RLTask::visualize_episode`](crate::RLTask::visualize_episode) and a
/// step limit instead.
///
/// ### Generics
/// - `S` - The state type; states are table keys so they must be [`Hashable`]
/// - `D` - The [`Decay`] schedule of the exploration rate, evaluated per finished episode
#[derive(Debug, Clone)]
pub struct TabularAgent<S: Hashable, D: Decay = decay::Exponential> {
    id: usize,
    action_space: ActionSpace,
    method: Method,
    learning: bool,
    table: QTable<S>,
    learner: Learner<S>,
    exploration: EpsilonGreedy<D>,
    alpha: f64, // learning rate
    gamma: f64, // discount factor
    episode: u32,
    rng: StdRng,
}

impl<S: Hashable> TabularAgent<S> {
    pub fn monte_carlo(id: usize, action_space: ActionSpace) -> Self {
        Self::new(id, action_space, Method::MonteCarlo, Default::default())
    }

    pub fn sarsa(id: usize, action_space: ActionSpace) -> Self {
        Self::new(id, action_space, Method::OnPolicyTd, Default::default())
    }

    pub fn q_learning(id: usize, action_space: ActionSpace) -> Self {
        Self::new(id, action_space, Method::OffPolicyTd, Default::default())
    }

    pub fn dyna_q(id: usize, action_space: ActionSpace, planning_steps: usize) -> Self {
        Self::new(
            id,
            action_space,
            Method::DynaQ { planning_steps },
            Default::default(),
        )
    }
}

impl<S: Hashable, D: Decay> TabularAgent<S, D> {
    /// **Panics** if `alpha` or `gamma` is not in the interval `[0,1]`
    pub fn new(
        id: usize,
        action_space: ActionSpace,
        method: Method,
        config: TabularAgentConfig<D>,
    ) -> Self {
        assert_interval!(config.alpha, 0.0, 1.0);
        assert_interval!(config.gamma, 0.0, 1.0);
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            id,
            action_space,
            method,
            learning: true,
            table: QTable::new(),
            learner: Learner::new(method),
            exploration: config.exploration,
            alpha: config.alpha,
            gamma: config.gamma,
            episode: 0,
            rng,
        }
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn q_table(&self) -> &QTable<S> {
        &self.table
    }

    /// Number of episodes learned from
    pub fn episodes(&self) -> u32 {
        self.episode
    }

    fn finish_episode(&mut self) {
        self.episode += 1;
        debug!(
            "agent {} finished episode {}, epsilon now {:.3}, {} entries",
            self.id,
            self.episode,
            self.exploration.epsilon(self.episode),
            self.table.len()
        );
    }
}

impl<S: Hashable, D: Decay> Agent<S> for TabularAgent<S, D> {
    /// A `None` reward marks the start of an episode
    fn act(&mut self, state: &S, reward: Option<f64>) -> Action {
        if reward.is_none() {
            self.learner.discard_partial();
        }

        let explore =
            self.learning && self.exploration.choose(self.episode, &mut self.rng) == Choice::Explore;
        let action = if explore {
            self.action_space.sample(&mut self.rng)
        } else {
            self.table.greedy(*state, &self.action_space, &mut self.rng)
        };
        trace!(
            "agent {} {} {action}",
            self.id,
            if explore { "explored" } else { "exploited" }
        );

        if self.learning {
            if let Learner::OnPolicyTd { pending } = &mut self.learner {
                if let Some(exp) = pending.take() {
                    td::sarsa(&mut self.table, &exp, Some(action), self.alpha, self.gamma);
                }
            }
        }

        action
    }

    fn observe(&mut self, exp: Exp<S>) {
        if !self.learning {
            return;
        }

        let terminal = exp.is_terminal();
        match &mut self.learner {
            Learner::MonteCarlo(trajectory) => {
                trajectory.push(exp);
                if terminal {
                    trajectory.flush(&mut self.table, self.alpha, self.gamma);
                }
            }
            Learner::OnPolicyTd { pending } => {
                if terminal {
                    td::sarsa(&mut self.table, &exp, None, self.alpha, self.gamma);
                } else {
                    *pending = Some(exp);
                }
            }
            Learner::OffPolicyTd => {
                td::q_learning(&mut self.table, &exp, &self.action_space, self.alpha, self.gamma);
            }
            Learner::DynaQ {
                model,
                planning_steps,
            } => {
                td::q_learning(&mut self.table, &exp, &self.action_space, self.alpha, self.gamma);
                model.record(exp);
                for _ in 0..*planning_steps {
                    if let Some(simulated) = model.sample(&mut self.rng) {
                        td::q_learning(
                            &mut self.table,
                            &simulated,
                            &self.action_space,
                            self.alpha,
                            self.gamma,
                        );
                    }
                }
            }
        }

        if terminal {
            self.finish_episode();
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
    use crate::{
        env::Environment,
        gym::{GridWorld, Observation},
    };

    use super::*;

    fn config(seed: u64) -> TabularAgentConfig<decay::Exponential> {
        TabularAgentConfig {
            exploration: EpsilonGreedy::new(decay::Exponential::new(0.02, 0.5, 0.0).unwrap()),
            alpha: 0.5,
            gamma: 1.0,
            seed: Some(seed),
        }
    }

    /// Train for `episodes` episodes, then count the steps of a greedy rollout
    fn train_and_rollout(method: Method, episodes: usize) -> usize {
        let mut env = GridWorld::new(3, 4).unwrap();
        let mut agent = TabularAgent::new(0, ActionSpace::default(), method, config(17));

        for _ in 0..episodes {
            let mut state = env.reset();
            let mut reward = None;
            loop {
                let action = agent.act(&state, reward);
                let step = env.step(action);
                agent.observe(Exp {
                    state,
                    action,
                    next_state: (!step.done).then_some(step.observation),
                    reward: step.reward,
                });
                if step.done {
                    break;
                }
                state = step.observation;
                reward = Some(step.reward);
            }
        }
        assert_eq!(agent.episodes() as usize, episodes);

        agent.set_learning(false);
        let mut state = env.reset();
        for steps in 1..=50 {
            let step = env.step(agent.act(&state, None));
            if step.done {
                return steps;
            }
            state = step.observation;
        }
        panic!("{method:?} did not reach the goal greedily");
    }

    #[test]
    fn q_learning_finds_shortest_path() {
        assert_eq!(train_and_rollout(Method::OffPolicyTd, 300), 5);
    }

    #[test]
    fn sarsa_finds_shortest_path() {
        assert_eq!(train_and_rollout(Method::OnPolicyTd, 500), 5);
    }

    #[test]
    fn dyna_q_finds_shortest_path() {
        assert_eq!(
            train_and_rollout(Method::DynaQ { planning_steps: 10 }, 100),
            5
        );
    }

    #[test]
    fn monte_carlo_reaches_goal() {
        assert!(train_and_rollout(Method::MonteCarlo, 2000) <= 50);
    }

    #[test]
    fn q_learning_update_rule() {
        let mut agent = TabularAgent::new(0, ActionSpace::default(), Method::OffPolicyTd, config(1));
        agent.observe(Exp {
            state: 0u8,
            action: Action::Down,
            next_state: Some(1),
            reward: -1.0,
        });
        assert_eq!(agent.q_table().value(0, Action::Down), -0.5);

        agent.observe(Exp {
            state: 1u8,
            action: Action::Right,
            next_state: None,
            reward: -1.0,
        });
        assert_eq!(agent.q_table().value(1, Action::Right), -0.5);
        assert_eq!(agent.q_table().visits(1, Action::Right), 1);
        assert_eq!(agent.q_table().visits(1, Action::Up), 0);
        assert_eq!(agent.episodes(), 1);
    }

    #[test]
    fn evaluation_mode_leaves_table_untouched() {
        for method in [
            Method::MonteCarlo,
            Method::OnPolicyTd,
            Method::OffPolicyTd,
            Method::DynaQ { planning_steps: 5 },
        ] {
            let mut agent = TabularAgent::new(0, ActionSpace::default(), method, config(2));
            agent.set_learning(false);
            let state = Observation {
                position: (0, 0),
                goal: (1, 1),
            };
            let action = agent.act(&state, None);
            agent.observe(Exp {
                state,
                action,
                next_state: None,
                reward: -1.0,
            });
            assert!(agent.q_table().is_empty(), "{method:?} updated while evaluating");
            assert_eq!(agent.episodes(), 0);
        }
    }

    #[test]
    fn greedy_breaks_ties_among_best_only() {
        let mut table = QTable::new();
        table.nudge(0u8, Action::Up, -1.0, 1.0);
        table.nudge(0u8, Action::Left, -1.0, 1.0);
        let mut rng = StdRng::seed_from_u64(4);
        let space = ActionSpace::default();
        let picks = (0..100)
            .map(|_| table.greedy(0, &space, &mut rng))
            .collect::<Vec<_>>();
        assert!(picks.iter().all(|&a| a == Action::Down || a == Action::Right));
        assert!(picks.contains(&Action::Down) && picks.contains(&Action::Right));
    }

    #[test]
    #[should_panic(expected = "Invalid value for `config.alpha`")]
    fn alpha_out_of_range_panics() {
        let config = TabularAgentConfig {
            alpha: 1.5,
            ..TabularAgentConfig::default()
        };
        TabularAgent::<u8>::new(0, ActionSpace::default(), Method::OffPolicyTd, config);
    }

    #[test]
    fn constructors_pick_methods() {
        let space = ActionSpace::default();
        assert_eq!(TabularAgent::<u8>::monte_carlo(1, space.clone()).method(), Method::MonteCarlo);
        assert_eq!(TabularAgent::<u8>::sarsa(2, space.clone()).method(), Method::OnPolicyTd);
        assert_eq!(TabularAgent::<u8>::q_learning(3, space.clone()).method(), Method::OffPolicyTd);
        let dyna = TabularAgent::<u8>::dyna_q(4, space, 7);
        assert_eq!(dyna.method(), Method::DynaQ { planning_steps: 7 });
        assert_eq!(Agent::id(&dyna), 4);
        assert!(Agent::learning(&dyna));
    }
}
