use anyhow::{bail, Result};
use clap::Parser;
use log::info;
use rand::{rngs::StdRng, Rng, SeedableRng};
use rlblocks::{
    explorer::{EpsilonGreedy, Explorer},
    replay_memory::{ReplayMemory, ReplayMemoryConfig, Transition},
    Memory,
};
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

const N_STATES: usize = 7;
const MIN_STATES: usize = 3;
const MAX_EPISODE_STEPS: usize = 50;
const WARMUP_PERIOD: usize = 100;
const LR: f32 = 0.1;
const DISCOUNT_FACTOR: f32 = 0.9;
const RECORD_INTERVAL: usize = 1000;

const LEFT: usize = 0;
const RIGHT: usize = 1;

/// A chain of states; the episode ends at either end, with reward 1 on the right.
struct RandomWalk {
    n_states: usize,
    state: usize,
    n_steps: usize,
}

impl RandomWalk {
    fn new(n_states: usize) -> Self {
        Self {
            n_states,
            state: n_states / 2,
            n_steps: 0,
        }
    }

    fn reset(&mut self) -> usize {
        self.state = self.n_states / 2;
        self.n_steps = 0;
        self.state
    }

    /// Returns the next state, the reward and the episode end flag.
    fn step(&mut self, act: usize) -> (usize, f32, bool) {
        self.state = match act {
            LEFT => self.state - 1,
            _ => self.state + 1,
        };
        self.n_steps += 1;

        let reward = if self.state == self.n_states - 1 { 1.0 } else { 0.0 };
        let is_done =
            self.state == 0 || self.state == self.n_states - 1 || self.n_steps >= MAX_EPISODE_STEPS;
        (self.state, reward, is_done)
    }
}

#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
struct RandomWalkConfig {
    n_states: usize,
    steps: usize,
    batch_size: usize,
    memory: ReplayMemoryConfig,
    explorer: Explorer,
}

impl RandomWalkConfig {
    fn new(args: &Args) -> Self {
        Self {
            n_states: N_STATES,
            steps: args.steps,
            batch_size: args.batch_size,
            memory: ReplayMemoryConfig::default()
                .capacity(args.capacity)
                .seed(args.seed),
            explorer: Explorer::EpsilonGreedy(
                EpsilonGreedy::new()
                    .eps_final(0.1)
                    .final_step(args.steps / 2),
            ),
        }
    }

    fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b: Self = serde_yaml::from_reader(rdr)?;
        if b.n_states < MIN_STATES {
            bail!(
                "n_states must be at least {}, got {}",
                MIN_STATES,
                b.n_states
            );
        }
        Ok(b)
    }

    fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Capacity of the replay memory
    #[arg(long, default_value_t = 1000)]
    capacity: usize,

    /// Number of environment steps
    #[arg(long, default_value_t = 5000)]
    steps: usize,

    /// Number of transitions sampled per step
    #[arg(long, default_value_t = 32)]
    batch_size: usize,

    /// Random seed
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// YAML file with the configuration; overrides the other arguments
    #[arg(long)]
    config: Option<String>,

    /// Saves the configuration used for the run to this YAML file
    #[arg(long)]
    save_config: Option<String>,
}

type QTable = Vec<[f32; 2]>;

/// One Q-learning update per transition in a sampled batch.
fn update(
    q: &mut QTable,
    memory: &mut ReplayMemory<Transition<usize, usize>>,
    batch_size: usize,
) -> Result<()> {
    let batch = memory.sample_transitions(batch_size)?;
    for k in 0..batch.len() {
        let (s, a, s_next) = (batch.states[k], batch.actions[k], batch.next_states[k]);
        let not_done = if batch.is_done[k] { 0.0 } else { 1.0 };
        let q_next = q[s_next][LEFT].max(q[s_next][RIGHT]);
        let target = batch.rewards[k] + DISCOUNT_FACTOR * not_done * q_next;
        q[s][a] += LR * (target - q[s][a]);
    }
    Ok(())
}

fn train(config: &RandomWalkConfig) -> Result<QTable> {
    let mut rng = StdRng::seed_from_u64(config.memory.seed);
    let mut env = RandomWalk::new(config.n_states);
    let mut explorer = config.explorer.clone();
    let mut memory: ReplayMemory<Transition<usize, usize>> = ReplayMemory::build(&config.memory)?;
    let mut q: QTable = vec![[0.0; 2]; config.n_states];

    let mut state = env.reset();
    let mut n_episodes = 0;
    for step in 1..=config.steps {
        // Small noise breaks ties between untrained action values.
        let values = [
            q[state][LEFT] + rng.gen::<f32>() * 1e-3,
            q[state][RIGHT] + rng.gen::<f32>() * 1e-3,
        ];
        let act = explorer.action(&values, &mut rng)?;
        let (next_state, reward, is_done) = env.step(act);
        memory.push(Transition::new(state, act, next_state, reward, is_done), true)?;

        state = if is_done {
            n_episodes += 1;
            env.reset()
        } else {
            next_state
        };

        if step > WARMUP_PERIOD {
            let batch_size = config.batch_size.min(memory.len());
            update(&mut q, &mut memory, batch_size)?;
        }

        if step % RECORD_INTERVAL == 0 {
            info!(
                "step = {}, episodes = {}, memory used = {}/{}, sum of rewards = {}, done = {}",
                step,
                n_episodes,
                memory.used(),
                memory.capacity(),
                memory.sum_rewards(),
                memory.num_done()
            );
        }
    }

    Ok(q)
}

/// Trains tabular Q-learning with a replay memory in a random walk
fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => RandomWalkConfig::load(path)?,
        None => RandomWalkConfig::new(&args),
    };
    if let Some(path) = &args.save_config {
        config.save(path)?;
        info!("Saved the configuration in {:?}", path);
    }

    let q = train(&config)?;
    for (s, v) in q.iter().enumerate() {
        info!("Q[{}] = {:?}", s, v);
    }

    Ok(())
}
