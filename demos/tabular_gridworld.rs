use std::{error::Error, fs, path::Path};

use rl_gridworld::{
    algo::{Method, TabularAgent, TabularAgentConfig},
    decay,
    env::{DiscreteActionSpace, RenderMode, Rendered},
    exploration::EpsilonGreedy,
    gym::{GridWorld, GridWorldConfig},
    Agent, RLTask, VisualizeConfig,
};

const NUM_EPISODES: usize = 500;
const METHODS: [(&str, Method); 4] = [
    ("monte_carlo", Method::MonteCarlo),
    ("sarsa", Method::OnPolicyTd),
    ("q_learning", Method::OffPolicyTd),
    ("dyna_q", Method::DynaQ { planning_steps: 10 }),
];

fn main() -> Result<(), Box<dyn Error>> {
    let path = Path::new("demos/out");
    fs::create_dir_all(path)?;

    let mut wtr = csv::Writer::from_path(path.join("returns.csv"))?;
    wtr.write_record(["method", "episode", "return"])?;

    for (id, (name, method)) in METHODS.into_iter().enumerate() {
        let env = GridWorld::from_config(GridWorldConfig { rows: 6, cols: 8 })?;
        let config = TabularAgentConfig {
            exploration: EpsilonGreedy::new(decay::Exponential::new(0.01, 0.5, 0.01)?),
            gamma: 1.0,
            ..Default::default()
        };
        let agent = TabularAgent::new(id, env.action_space(), method, config);
        let mut task = RLTask::new(env, agent).with_visualize_config(VisualizeConfig {
            mode: RenderMode::Ansi,
            ..Default::default()
        });

        for (episode, ret) in task.interact(NUM_EPISODES).into_iter().enumerate() {
            wtr.write_record([name, episode.to_string().as_str(), ret.to_string().as_str()])?;
        }

        let tail = &task.history()[NUM_EPISODES - 50..];
        println!(
            "{name}: mean return over the last 50 episodes {:.2}",
            tail.iter().sum::<f64>() / tail.len() as f64
        );

        task.agent_mut().set_learning(false);
        let frames = task.visualize_episode(Some(40))?;
        if let Some(Rendered::Text(last)) = frames.last() {
            println!("{name} greedy rollout: {} steps, final frame:\n{last}", frames.len());
        }
    }

    wtr.flush()?;
    Ok(())
}
