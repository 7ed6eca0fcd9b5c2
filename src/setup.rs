//! Population Setup
//!
//! Spawns the five role populations at world construction: role-partitioned
//! ids, random grid placement, and per-role initial belief state. Creation
//! order (scientists, journalists, propagandists, citizens, policymakers)
//! matters for reproducibility because every draw comes from the shared RNG.

use rand::Rng;

use crate::agents::{Agent, AgentId, Role};
use crate::belief::{BeliefState, BetaParams};
use crate::config::Config;
use crate::error::SimError;
use crate::grid::SpatialGrid;
use crate::SimRng;

pub(crate) fn spawn_population(
    config: &Config,
    rng: &mut SimRng,
    grid: &mut SpatialGrid,
) -> Result<Vec<Agent>, SimError> {
    let mut agents = Vec::with_capacity(config.total_agents() as usize);

    for index in 0..config.population.scientists {
        let state = scientist_state(config, rng)?;
        let sample_size = rng.gen_range(
            config.scientist.sample_size_low..=config.scientist.sample_size_high,
        );
        spawn(
            &mut agents,
            grid,
            rng,
            Role::Scientist,
            index,
            state,
            Some(sample_size),
        );
    }

    for index in 0..config.population.journalists {
        let bias = rng.gen_range(0.0..1.0);
        let state = BeliefState {
            belief: bias,
            // The first story is maximally uncertain
            story: Some(0.5),
            beliefs_encountered: Some(Vec::new()),
            ..Default::default()
        };
        spawn(&mut agents, grid, rng, Role::Journalist, index, state, None);
    }

    for index in 0..config.population.propagandists {
        // Ideological bias: firmly on the doubt-mongering end
        let bias = rng.gen_range(0.0..0.2);
        let state = BeliefState {
            belief: bias,
            story: Some(bias),
            beliefs_encountered: None,
            ..Default::default()
        };
        spawn(&mut agents, grid, rng, Role::Propagandist, index, state, None);
    }

    for index in 0..config.population.citizens {
        let state = consumer_state(rng);
        spawn(&mut agents, grid, rng, Role::Citizen, index, state, None);
    }

    for index in 0..config.population.policymakers {
        let state = consumer_state(rng);
        spawn(&mut agents, grid, rng, Role::Policymaker, index, state, None);
    }

    Ok(agents)
}

/// Integer-valued Beta prior drawn from the configured hyperparameter
/// ranges; prior, posterior, and discussed belief all start equal.
fn scientist_state(config: &Config, rng: &mut SimRng) -> Result<BeliefState, SimError> {
    let s = &config.scientist;
    let alpha = rng.gen_range(s.prior_alpha_low..=s.prior_alpha_high) as f64;
    let beta = rng.gen_range(s.prior_beta_low..=s.prior_beta_high) as f64;
    let params = BetaParams::new(alpha, beta)?;
    Ok(BeliefState {
        belief: params.mean(),
        prior: Some(params),
        posterior: Some(params),
        discussed_belief: Some(params),
        beliefs_encountered: Some(Vec::new()),
        ..Default::default()
    })
}

/// Citizens and policymakers start with heterogeneous uniform beliefs.
fn consumer_state(rng: &mut SimRng) -> BeliefState {
    BeliefState {
        belief: rng.gen_range(0.0..1.0),
        beliefs_encountered: Some(Vec::new()),
        ..Default::default()
    }
}

fn spawn(
    agents: &mut Vec<Agent>,
    grid: &mut SpatialGrid,
    rng: &mut SimRng,
    role: Role,
    index: u32,
    state: BeliefState,
    study_sample_size: Option<u32>,
) {
    let x = rng.gen_range(0..grid.width());
    let y = rng.gen_range(0..grid.height());
    let agent_index = agents.len();
    grid.place(agent_index, (x, y));
    agents.push(Agent {
        id: AgentId::new(role, index),
        role,
        pos: (x, y),
        state,
        study_sample_size,
    });
}
