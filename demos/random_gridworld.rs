use std::{error::Error, time::Duration};

use rl_gridworld::{
    agent::{FixedAgent, RandomAgent},
    env::{DiscreteActionSpace, RenderMode},
    gym::{GridWorld, GridWorldConfig},
    RLTask, VisualizeConfig,
};

const NUM_EPISODES: usize = 20;

fn main() -> Result<(), Box<dyn Error>> {
    let env = GridWorld::from_config(GridWorldConfig::default())?;
    let agent = RandomAgent::new(0, env.action_space());
    let mut task = RLTask::new(env, agent).with_visualize_config(VisualizeConfig {
        mode: RenderMode::Human,
        frame_delay: Duration::from_millis(50),
    });

    let returns = task.interact(NUM_EPISODES);
    println!("random agent returns: {returns:?}");
    println!("mean return: {:.2}", task.mean_return().unwrap_or_default());

    task.agent_mut().set_learning(false);
    task.visualize_episode(Some(30))?;

    let env = GridWorld::from_config(GridWorldConfig::default())?;
    let agent = FixedAgent::new(1, env.action_space());
    let mut task = RLTask::new(env, agent);
    println!("fixed agent returns: {:?}", task.interact(3));
    println!("fixed agent learning: {}", task.agent().learning());

    Ok(())
}
