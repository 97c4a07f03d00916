use std::{error::Error, time::Duration};

use log::{info, LevelFilter};
use rl_gridworld::{
    algo::TabularAgent,
    env::{DiscreteActionSpace, RenderMode},
    gym::GridWorld,
    Agent, RLTask, VisualizeConfig,
};

fn main() -> Result<(), Box<dyn Error>> {
    tui_logger::init_logger(LevelFilter::Debug)?;
    tui_logger::set_default_level(LevelFilter::Debug);

    let env = GridWorld::new(8, 12)?;
    let agent = TabularAgent::dyna_q(0, env.action_space(), 20);
    let mut task = RLTask::new(env, agent).with_visualize_config(VisualizeConfig {
        mode: RenderMode::Human2,
        frame_delay: Duration::from_millis(250),
    });

    task.interact(300);
    info!("trained, mean return {:.2}", task.mean_return().unwrap_or_default());

    task.agent_mut().set_learning(false);
    task.visualize_episode(Some(100))?;
    std::thread::sleep(Duration::from_secs(2));

    Ok(())
}
