use rand::{seq::SliceRandom, Rng};
use strum::{Display, FromRepr, VariantArray};

use crate::error::Error;

/// A move on the grid
///
/// The discriminants are the action indices exposed to agents.
#[derive(VariantArray, FromRepr, Display, Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Action {
    Up = 0,
    Down = 1,
    Right = 2,
    Left = 3,
}

impl Action {
    /// Unit movement vector as `(d_row, d_col)`
    pub fn delta(self) -> (isize, isize) {
        match self {
            Action::Up => (-1, 0),
            Action::Down => (1, 0),
            Action::Right => (0, 1),
            Action::Left => (0, -1),
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

impl TryFrom<usize> for Action {
    type Error = Error;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        Action::from_repr(index).ok_or(Error::InvalidAction(index))
    }
}

impl From<Action> for usize {
    fn from(action: Action) -> Self {
        action.index()
    }
}

/// A finite, ordered set of permissible actions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionSpace {
    actions: Vec<Action>,
}

impl ActionSpace {
    /// **Panics** if `actions` is empty
    pub fn new(actions: Vec<Action>) -> Self {
        assert!(!actions.is_empty(), "Action space must not be empty.");
        Self { actions }
    }

    /// Uniformly sample an action
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Action {
        *self
            .actions
            .choose(rng)
            .expect("action space is not empty")
    }

    pub fn contains(&self, action: Action) -> bool {
        self.actions.contains(&action)
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Action> + '_ {
        self.actions.iter().copied()
    }

    pub fn as_slice(&self) -> &[Action] {
        &self.actions
    }
}

impl Default for ActionSpace {
    fn default() -> Self {
        Self::new(Action::VARIANTS.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    #[test]
    fn indices_match_movement_table() {
        assert_eq!(Action::try_from(0).unwrap(), Action::Up);
        assert_eq!(Action::try_from(1).unwrap(), Action::Down);
        assert_eq!(Action::try_from(2).unwrap(), Action::Right);
        assert_eq!(Action::try_from(3).unwrap(), Action::Left);
        assert_eq!(Action::Down.delta(), (1, 0));
        assert_eq!(Action::Left.delta(), (0, -1));
    }

    #[test]
    fn malformed_action_index_is_rejected() {
        assert!(matches!(Action::try_from(4), Err(Error::InvalidAction(4))));
    }

    #[test]
    fn sample_stays_in_space() {
        let space = ActionSpace::new(vec![Action::Down, Action::Right]);
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..200 {
            let a = space.sample(&mut rng);
            assert!(space.contains(a), "{a} sampled outside the space");
        }
        assert_eq!(ActionSpace::default().len(), 4);
    }

    #[test]
    #[should_panic]
    fn empty_space_panics() {
        ActionSpace::new(Vec::new());
    }
}
