use std::{thread, time::Duration};

use log::{debug, info};

use crate::{
    action::Action,
    agent::Agent,
    env::{Environment, Render, RenderMode, Rendered},
    error::Result,
    memory::Exp,
};

/// Configuration for [`RLTask::visualize_episode`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisualizeConfig {
    pub mode: RenderMode,
    /// Pause after each rendered frame
    pub frame_delay: Duration,
}

impl Default for VisualizeConfig {
    fn default() -> Self {
        Self {
            mode: RenderMode::Human,
            frame_delay: Duration::from_millis(10),
        }
    }
}

/// An agent interacting with an environment, episode after episode
pub struct RLTask<E, A> {
    env: E,
    agent: A,
    history: Vec<f64>,
    visualize: VisualizeConfig,
}

impl<E, A> RLTask<E, A>
where
    E: Environment<Action = Action>,
    E::State: Clone,
    A: Agent<E::State>,
{
    pub fn new(env: E, agent: A) -> Self {
        Self {
            env,
            agent,
            history: Vec::new(),
            visualize: VisualizeConfig::default(),
        }
    }

    pub fn with_visualize_config(mut self, config: VisualizeConfig) -> Self {
        self.visualize = config;
        self
    }

    /// Run one episode to completion and return its return
    fn run_episode(&mut self) -> f64 {
        let mut state = self.env.reset();
        let mut reward = None;
        let mut episode_return = 0.0;

        loop {
            let action = self.agent.act(&state, reward);
            let step = self.env.step(action);
            episode_return += step.reward;

            let next_state = (!step.done).then(|| step.observation.clone());
            self.agent.observe(Exp {
                state,
                action,
                next_state,
                reward: step.reward,
            });

            if step.done {
                return episode_return;
            }
            state = step.observation;
            reward = Some(step.reward);
        }
    }

    /// Run `n_episodes` episodes and return their returns in episode order
    ///
    /// The returns are also appended to [`history`](RLTask::history).
    pub fn interact(&mut self, n_episodes: usize) -> Vec<f64> {
        let returns = (0..n_episodes)
            .map(|i| {
                let episode_return = self.run_episode();
                debug!("agent {} episode {i}: return {episode_return}", self.agent.id());
                episode_return
            })
            .collect::<Vec<_>>();

        if let Some(mean) = mean(&returns) {
            info!(
                "agent {} ran {n_episodes} episodes, mean return {mean:.2}",
                self.agent.id()
            );
        }
        self.history.extend_from_slice(&returns);
        returns
    }

    /// Every return recorded by [`interact`](RLTask::interact), oldest first
    pub fn history(&self) -> &[f64] {
        &self.history
    }

    /// Mean of [`history`](RLTask::history), `None` before any episode
    pub fn mean_return(&self) -> Option<f64> {
        mean(&self.history)
    }

    pub fn env(&self) -> &E {
        &self.env
    }

    pub fn env_mut(&mut self) -> &mut E {
        &mut self.env
    }

    pub fn agent(&self) -> &A {
        &self.agent
    }

    pub fn agent_mut(&mut self) -> &mut A {
        &mut self.agent
    }

    pub fn into_parts(self) -> (E, A) {
        (self.env, self.agent)
    }
}

impl<E, A> RLTask<E, A>
where
    E: Environment<Action = Action> + Render,
    E::State: Clone,
    A: Agent<E::State>,
{
    /// Run one episode, rendering after every step
    ///
    /// Stops at the terminal state or after `max_steps` steps, whichever comes first.
    /// The agent acts as it is configured; switch [`learning`](Agent::set_learning) off
    /// beforehand to watch the greedy policy. Learning is switched back on afterwards,
    /// even if rendering fails.
    ///
    /// **Returns** the rendered frames
    pub fn visualize_episode(&mut self, max_steps: Option<usize>) -> Result<Vec<Rendered>> {
        let frames = self.render_episode(max_steps);
        self.agent.set_learning(true);
        frames
    }

    fn render_episode(&mut self, max_steps: Option<usize>) -> Result<Vec<Rendered>> {
        let VisualizeConfig { mode, frame_delay } = self.visualize;
        let mut frames = Vec::new();
        let mut state = self.env.reset();
        let mut reward = None;
        let mut steps = 0;

        while max_steps.map_or(true, |max| steps < max) {
            let action = self.agent.act(&state, reward);
            let step = self.env.step(action);
            steps += 1;

            if matches!(mode, RenderMode::Human | RenderMode::Ansi) {
                println!("\n\n\n\n\n\n\n");
            }
            let frame = self.env.render(mode)?;
            if let Rendered::Text(text) = &frame {
                print!("{text}");
            }
            frames.push(frame);
            thread::sleep(frame_delay);

            if step.done {
                break;
            }
            state = step.observation;
            reward = Some(step.reward);
        }

        debug!("visualized {steps} steps");
        Ok(frames)
    }
}

fn mean(values: &[f64]) -> Option<f64> {
    (!values.is_empty()).then(|| values.iter().sum::<f64>() / values.len() as f64)
}
