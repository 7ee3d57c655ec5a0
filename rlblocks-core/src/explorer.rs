//! Exploration strategies for discrete actions.
//!
//! An explorer takes a slice of action values, one per discrete action, and
//! returns the index of the action to take.
use crate::error::ExplorerError;
use rand::{distributions::WeightedIndex, Rng};
use serde::{Deserialize, Serialize};

/// Explorers for discrete actions.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub enum Explorer {
    /// Softmax action selection.
    Softmax(Softmax),

    /// Epsilon-greedy action selection.
    EpsilonGreedy(EpsilonGreedy),
}

impl Explorer {
    /// Takes an action based on action values.
    pub fn action(&mut self, values: &[f32], rng: &mut impl Rng) -> Result<usize, ExplorerError> {
        match self {
            Self::Softmax(softmax) => softmax.action(values, rng),
            Self::EpsilonGreedy(egreedy) => egreedy.action(values, rng),
        }
    }
}

fn check_values(values: &[f32]) -> Result<(), ExplorerError> {
    if values.is_empty() {
        return Err(ExplorerError::EmptyActionValues);
    }
    if let Some(v) = values.iter().find(|v| !v.is_finite()) {
        return Err(ExplorerError::InvalidActionValues(format!(
            "non-finite action value {}",
            v
        )));
    }
    Ok(())
}

/// Index of the largest value; the first one wins ties.
fn argmax(values: &[f32]) -> usize {
    values
        .iter()
        .enumerate()
        .fold((0, f32::NEG_INFINITY), |(ix_max, v_max), (ix, &v)| {
            if v > v_max {
                (ix, v)
            } else {
                (ix_max, v_max)
            }
        })
        .0
}

/// Softmax explorer.
///
/// Samples action `i` with probability `exp(v_i) / sum_j exp(v_j)`.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct Softmax {}

#[allow(clippy::new_without_default)]
impl Softmax {
    /// Constructs softmax explorer.
    pub fn new() -> Self {
        Self {}
    }

    /// Returns the action probabilities for the given values.
    pub fn probs(&self, values: &[f32]) -> Result<Vec<f32>, ExplorerError> {
        check_values(values)?;
        let max = values[argmax(values)];
        let exps = values
            .iter()
            .map(|v| (v - max).exp())
            .collect::<Vec<_>>();
        let sum: f32 = exps.iter().sum();
        Ok(exps.into_iter().map(|e| e / sum).collect())
    }

    /// Takes an action based on action values.
    ///
    /// * `values` - action values.
    pub fn action(&mut self, values: &[f32], rng: &mut impl Rng) -> Result<usize, ExplorerError> {
        let probs = self.probs(values)?;
        let dist = WeightedIndex::new(&probs)
            .map_err(|e| ExplorerError::InvalidActionValues(e.to_string()))?;
        Ok(rng.sample(dist))
    }
}

/// Epsilon-greedy explorer.
///
/// Epsilon decays linearly from `eps_start` to `eps_final` in `final_step`
/// calls of [`EpsilonGreedy::action`].
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct EpsilonGreedy {
    /// Number of actions taken so far.
    pub n_opts: usize,

    /// Epsilon at the start.
    pub eps_start: f64,

    /// Epsilon at and after `final_step`.
    pub eps_final: f64,

    /// Step at which epsilon reaches `eps_final`.
    pub final_step: usize,
}

#[allow(clippy::new_without_default)]
impl EpsilonGreedy {
    /// Constructs epsilon-greedy explorer.
    pub fn new() -> Self {
        Self {
            n_opts: 0,
            eps_start: 1.0,
            eps_final: 0.02,
            final_step: 100_000,
        }
    }

    /// Constructs epsilon-greedy explorer wrapped in [`Explorer`].
    pub fn with_final_step(final_step: usize) -> Explorer {
        Explorer::EpsilonGreedy(Self::new().final_step(final_step))
    }

    /// Returns the current epsilon.
    pub fn eps(&self) -> f64 {
        if self.final_step == 0 || self.n_opts >= self.final_step {
            return self.eps_final;
        }
        let d = (self.eps_start - self.eps_final) / (self.final_step as f64);
        self.eps_start - d * self.n_opts as f64
    }

    /// Takes an action based on action values.
    ///
    /// * `values` - action values.
    pub fn action(&mut self, values: &[f32], rng: &mut impl Rng) -> Result<usize, ExplorerError> {
        check_values(values)?;
        let eps = self.eps();
        self.n_opts += 1;

        if rng.gen::<f64>() < eps {
            Ok(rng.gen_range(0..values.len()))
        } else {
            Ok(argmax(values))
        }
    }

    /// Set the epsilon value at the final step.
    pub fn eps_final(self, v: f64) -> Self {
        let mut s = self;
        s.eps_final = v;
        s
    }

    /// Set the epsilon value at the start.
    pub fn eps_start(self, v: f64) -> Self {
        let mut s = self;
        s.eps_start = v;
        s
    }

    /// Set the step at which epsilon reaches its final value.
    pub fn final_step(self, v: usize) -> Self {
        let mut s = self;
        s.final_step = v;
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_softmax_picks_dominant_action() {
        let mut explorer = Explorer::Softmax(Softmax::new());
        let mut rng = StdRng::seed_from_u64(42);
        let values = [0.0, 0.0, 0.0, 0.0, 0.0, 100.0];
        for _ in 0..100 {
            assert_eq!(explorer.action(&values, &mut rng).unwrap(), 5);
        }
    }

    #[test]
    fn test_softmax_probs() {
        let probs = Softmax::new().probs(&[1.0, 1.0, 1.0, 1.0]).unwrap();
        assert!(probs.iter().all(|p| (p - 0.25).abs() < 1e-6));

        let probs = Softmax::new().probs(&[0.0, 2.0f32.ln()]).unwrap();
        assert!((probs[0] - 1.0 / 3.0).abs() < 1e-6);
        assert!((probs[1] - 2.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_softmax_covers_all_actions() {
        let mut softmax = Softmax::new();
        let mut rng = StdRng::seed_from_u64(0);
        let mut counts = [0usize; 3];
        for _ in 0..3000 {
            counts[softmax.action(&[0.0, 0.0, 0.0], &mut rng).unwrap()] += 1;
        }
        assert!(counts.iter().all(|&c| c > 800));
    }

    #[test]
    fn test_greedy_without_exploration() {
        let mut egreedy = EpsilonGreedy::new().eps_start(0.0).eps_final(0.0);
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..100 {
            assert_eq!(egreedy.action(&[0.3, 2.0, -1.0, 2.0], &mut rng).unwrap(), 1);
        }
        assert_eq!(egreedy.n_opts, 100);
    }

    #[test]
    fn test_eps_schedule() {
        let mut egreedy = EpsilonGreedy::new()
            .eps_start(1.0)
            .eps_final(0.1)
            .final_step(10);
        let mut rng = StdRng::seed_from_u64(2);
        assert_eq!(egreedy.eps(), 1.0);

        for _ in 0..5 {
            egreedy.action(&[0.0, 1.0], &mut rng).unwrap();
        }
        assert!((egreedy.eps() - 0.55).abs() < 1e-9);

        for _ in 0..20 {
            egreedy.action(&[0.0, 1.0], &mut rng).unwrap();
        }
        assert_eq!(egreedy.eps(), 0.1);
    }

    #[test]
    fn test_invalid_values() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut explorer = EpsilonGreedy::with_final_step(10);
        assert_eq!(
            explorer.action(&[], &mut rng),
            Err(ExplorerError::EmptyActionValues)
        );

        let mut explorer = Explorer::Softmax(Softmax::new());
        assert!(matches!(
            explorer.action(&[0.0, f32::NAN], &mut rng),
            Err(ExplorerError::InvalidActionValues(_))
        ));
    }

    #[test]
    fn test_serde_explorer() {
        let explorer = EpsilonGreedy::with_final_step(500);
        let yaml = serde_yaml::to_string(&explorer).unwrap();
        let explorer_: Explorer = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(explorer, explorer_);
    }
}
