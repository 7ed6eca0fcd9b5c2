//! Scientist Pipeline
//!
//! The Bayesian evidence-accumulation loop: carry forward the peer-pooled
//! belief as the new prior, run a batch of Bernoulli trials, perform the
//! conjugate Beta update, then pool with credible peers.

use rand::Rng;
use rand_distr::{Beta, Distribution};

use crate::agents::Role;
use crate::belief::BetaParams;
use crate::error::SimError;
use crate::events::InteractionRecord;
use crate::world::World;

/// Discussion partner count range per step
const PARTNERS_LOW: usize = 2;
const PARTNERS_HIGH: usize = 4;

pub(crate) fn step(world: &mut World, idx: usize) -> Result<(), SimError> {
    conduct_research(world, idx)?;
    discuss_with_peers(world, idx)?;
    Ok(())
}

/// Evidence generation and conjugate update.
///
/// The trial probability comes from the configured ground truth when one is
/// set. When it is absent, each scientist draws the probability from its own
/// prior, so the evidence conforms to its expectations. That self-confirming
/// mode is a deliberate configuration choice for exploring closed epistemic
/// loops, not a fallback.
fn conduct_research(world: &mut World, idx: usize) -> Result<(), SimError> {
    let ground_truth = world.config.scientist.ground_truth_probability;

    // Last round's peer-pooled belief becomes this round's prior.
    let prior = world.agents[idx].state.discussed()?;
    world.agents[idx].state.prior = Some(prior);

    let study_probability = match ground_truth {
        Some(p) => p,
        None => Beta::new(prior.alpha, prior.beta)
            .map_err(|e| {
                SimError::InvariantViolation(format!(
                    "prior unusable as a sampling distribution: {e}"
                ))
            })?
            .sample(&mut world.rng),
    };

    let batch_size = world.agents[idx].study_sample_size.ok_or_else(|| {
        SimError::InvariantViolation("scientist has no study sample size".into())
    })?;
    let mut successes = 0u64;
    for _ in 0..batch_size {
        if world.rng.gen_bool(study_probability) {
            successes += 1;
        }
    }
    let failures = batch_size as u64 - successes;

    let posterior = prior.observe(successes, failures);
    let me = &mut world.agents[idx];
    me.state.posterior = Some(posterior);
    me.state.belief = posterior.mean();
    Ok(())
}

/// Peer interaction and belief pooling.
///
/// Every sampled peer is logged against the post-research posterior mean.
/// Credible peers (difference below the scientist threshold) are then pooled
/// sequentially, each against the step's original prior: later peers
/// overwrite earlier ones rather than compounding. The pooled result lands
/// in both the posterior and the separately tracked discussed belief.
fn discuss_with_peers(world: &mut World, idx: usize) -> Result<(), SimError> {
    let step = world.scheduler.steps();
    let threshold = world.config.scientist.difference_threshold;

    let peers: Vec<usize> = world
        .registry
        .indices(Role::Scientist)
        .iter()
        .copied()
        .filter(|&i| i != idx)
        .collect();
    // Too few colleagues to hold a discussion round.
    if peers.len() < 2 {
        return Ok(());
    }

    let drawn = world.rng.gen_range(PARTNERS_LOW..=PARTNERS_HIGH);
    let count = drawn.min(peers.len());
    let chosen = rand::seq::index::sample(&mut world.rng, peers.len(), count);
    let sampled: Vec<(u64, BetaParams)> = chosen
        .iter()
        .map(|j| {
            let peer = &world.agents[peers[j]];
            Ok((peer.id.0, peer.state.posterior()?))
        })
        .collect::<Result<_, SimError>>()?;

    let me = &mut world.agents[idx];
    let prior = me.state.prior()?;
    let own_mean = me.state.posterior()?.mean();

    for (peer_id, peer_posterior) in &sampled {
        let peer_mean = peer_posterior.mean();
        me.state.push_encountered(peer_mean);
        let difference = own_mean - peer_mean;
        world.events.scientist_interactions.push(InteractionRecord {
            self_id: me.id.0,
            other_id: *peer_id,
            belief_difference: difference,
            updated: difference.abs() < threshold,
            step,
        });
    }

    for (_, peer_posterior) in &sampled {
        if (own_mean - peer_posterior.mean()).abs() >= threshold {
            continue;
        }
        let pooled = prior.pooled_with(peer_posterior)?;
        me.state.posterior = Some(pooled);
        me.state.discussed_belief = Some(pooled);
    }

    if let Some(posterior) = me.state.posterior {
        me.state.belief = posterior.mean();
    }
    Ok(())
}
