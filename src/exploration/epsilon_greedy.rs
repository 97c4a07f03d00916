use rand::Rng;

use crate::decay::Decay;

use super::Choice;

/// Epsilon greedy exploration policy with an episode-decaying epsilon threshold
#[derive(Debug, Clone)]
pub struct EpsilonGreedy<D: Decay> {
    epsilon: D,
}

impl<D: Decay> EpsilonGreedy<D> {
    /// Initialize epsilon greedy policy with a decay strategy
    pub fn new(decay: D) -> Self {
        Self { epsilon: decay }
    }

    /// Epsilon after `episode` finished episodes
    pub fn epsilon(&self, episode: u32) -> f64 {
        self.epsilon.evaluate(episode as f64)
    }

    /// Invoke epsilon greedy policy for current episode
    pub fn choose<R: Rng + ?Sized>(&self, episode: u32, rng: &mut R) -> Choice {
        if rng.gen::<f64>() >= self.epsilon(episode) {
            Choice::Exploit
        } else {
            Choice::Explore
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use crate::decay;

    use super::*;

    #[test]
    fn zero_epsilon_always_exploits() {
        let policy = EpsilonGreedy::new(decay::Constant::new(0.0));
        let mut rng = StdRng::seed_from_u64(7);
        assert!((0..1000).all(|_| policy.choose(0, &mut rng) == Choice::Exploit));
    }

    #[test]
    fn full_epsilon_always_explores() {
        let policy = EpsilonGreedy::new(decay::Constant::new(1.0));
        let mut rng = StdRng::seed_from_u64(7);
        assert!((0..1000).all(|_| policy.choose(0, &mut rng) == Choice::Explore));
    }

    #[test]
    fn epsilon_follows_decay() {
        let policy = EpsilonGreedy::new(decay::Linear::new(0.1, 1.0, 0.2).unwrap());
        assert_eq!(policy.epsilon(0), 1.0);
        assert!((policy.epsilon(5) - 0.5).abs() < 1e-12);
        assert_eq!(policy.epsilon(100), 0.2);
    }
}
