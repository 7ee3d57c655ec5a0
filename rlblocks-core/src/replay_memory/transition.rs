//! Transitions and batches of transitions.
use super::ReplayMemory;
use crate::{error::MemoryError, BatchMemory};
use serde::{Deserialize, Serialize};

/// A transition observed in an environment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transition<S, A> {
    /// State before the action.
    pub state: S,

    /// Action taken in `state`.
    pub action: A,

    /// State after the action.
    pub next_state: S,

    /// Reward for the action.
    pub reward: f32,

    /// `true` if the episode ended with this transition.
    pub is_done: bool,
}

impl<S, A> Transition<S, A> {
    /// Creates a transition.
    pub fn new(state: S, action: A, next_state: S, reward: f32, is_done: bool) -> Self {
        Self {
            state,
            action,
            next_state,
            reward,
            is_done,
        }
    }
}

/// A batch of transitions, stored field by field.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionBatch<S, A> {
    /// States.
    pub states: Vec<S>,

    /// Actions.
    pub actions: Vec<A>,

    /// Next states.
    pub next_states: Vec<S>,

    /// Rewards.
    pub rewards: Vec<f32>,

    /// Episode end flags.
    pub is_done: Vec<bool>,
}

impl<S, A> TransitionBatch<S, A> {
    /// Creates an empty batch with room for `capacity` transitions.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            states: Vec::with_capacity(capacity),
            actions: Vec::with_capacity(capacity),
            next_states: Vec::with_capacity(capacity),
            rewards: Vec::with_capacity(capacity),
            is_done: Vec::with_capacity(capacity),
        }
    }

    /// Appends a transition to the batch.
    pub fn push(&mut self, tr: Transition<S, A>) {
        self.states.push(tr.state);
        self.actions.push(tr.action);
        self.next_states.push(tr.next_state);
        self.rewards.push(tr.reward);
        self.is_done.push(tr.is_done);
    }

    /// Returns the number of transitions in the batch.
    pub fn len(&self) -> usize {
        self.rewards.len()
    }

    /// Returns `true` if the batch has no transitions.
    pub fn is_empty(&self) -> bool {
        self.rewards.is_empty()
    }
}

impl<S, A> From<Vec<Transition<S, A>>> for TransitionBatch<S, A> {
    fn from(trs: Vec<Transition<S, A>>) -> Self {
        let mut batch = Self::with_capacity(trs.len());
        trs.into_iter().for_each(|tr| batch.push(tr));
        batch
    }
}

impl<S: Clone, A: Clone> ReplayMemory<Transition<S, A>> {
    /// Samples `size` distinct transitions and returns them as a batch.
    pub fn sample_transitions(&mut self, size: usize) -> Result<TransitionBatch<S, A>, MemoryError> {
        Ok(self.sample_batch(size)?.into())
    }

    /// Returns the sum of rewards over the stored transitions.
    pub fn sum_rewards(&self) -> f32 {
        self.iter().map(|tr| tr.reward).sum()
    }

    /// Returns the number of stored transitions that ended an episode.
    pub fn num_done(&self) -> usize {
        self.iter().filter(|tr| tr.is_done).count()
    }
}
