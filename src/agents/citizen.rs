//! Citizen Pipeline
//!
//! Four stages per step, always in order: move on the grid, talk to
//! co-located citizens, consume news media, and (probably) encounter
//! propaganda.

use rand::Rng;

use crate::agents::Role;
use crate::belief::{ensure_unit_interval, weighted_pair};
use crate::error::SimError;
use crate::events::{InteractionRecord, TravelRecord};
use crate::world::World;

/// Weight on the agent's own prior-stage belief when mixing
const OWN_WEIGHT: f64 = 0.6;
/// Weight on a consumed story when mixing
const STORY_WEIGHT: f64 = 0.3;
/// Upper bound on discussion partners in one step
const MAX_PARTNERS: usize = 9;
/// Story sample count range for the media and propaganda stages
const STORIES_LOW: usize = 2;
const STORIES_HIGH: usize = 9;

pub(crate) fn step(world: &mut World, idx: usize) -> Result<(), SimError> {
    relocate(world, idx);
    interact_with_cellmates(world, idx)?;
    consume_news_media(world, idx)?;
    encounter_propaganda(world, idx)?;
    Ok(())
}

/// Move to a uniformly chosen neighbor cell and log the travel.
fn relocate(world: &mut World, idx: usize) {
    let step = world.scheduler.steps();
    let from = world.agents[idx].pos;
    let to = world.grid.random_neighbor(&mut world.rng, from);
    world.grid.relocate(idx, from, to);
    world.agents[idx].pos = to;
    world.events.citizen_travel.push(TravelRecord {
        agent_id: world.agents[idx].id.0,
        x: to.0,
        y: to.1,
        step,
    });
}

/// Talk to citizens standing on the same cell. A partner's view is adopted
/// (as the pairwise mean) only when the belief gap is below the citizen
/// threshold; either way the partner's belief is logged as encountered and
/// the interaction is recorded.
fn interact_with_cellmates(world: &mut World, idx: usize) -> Result<(), SimError> {
    let step = world.scheduler.steps();
    let threshold = world.config.citizen.difference_threshold;

    let others: Vec<usize> = world
        .grid
        .contents(world.agents[idx].pos)
        .iter()
        .copied()
        .filter(|&i| i != idx && world.agents[i].role == Role::Citizen)
        .collect();
    if others.is_empty() {
        return Ok(());
    }

    let cap = others.len().min(MAX_PARTNERS);
    let count = world.rng.gen_range(1..=cap);
    let chosen = rand::seq::index::sample(&mut world.rng, others.len(), count);
    let partners: Vec<(u64, f64)> = chosen
        .iter()
        .map(|j| {
            let partner = &world.agents[others[j]];
            (partner.id.0, partner.state.belief)
        })
        .collect();

    let me = &mut world.agents[idx];
    for (partner_id, partner_belief) in partners {
        me.state.push_encountered(partner_belief);
        if (me.state.belief - partner_belief).abs() < threshold {
            let mixed = (me.state.belief + partner_belief) / 2.0;
            me.state.belief_after_talk = Some(mixed);
            me.state.belief = mixed;
        } else {
            me.state.belief_after_talk = Some(me.state.belief);
        }
        // Logged after the (possible) update, so the signed difference uses
        // the already-averaged belief. Matches the source model.
        let difference = me.state.belief - partner_belief;
        world.events.citizen_interactions.push(InteractionRecord {
            self_id: me.id.0,
            other_id: partner_id,
            belief_difference: difference,
            updated: difference.abs() < threshold,
            step,
        });
    }
    Ok(())
}

/// Read a handful of journalist stories. Every sampled story is logged as
/// encountered, but only the final one enters the weighted mix; that
/// last-sample-only behavior is part of the modeled media dynamics and must
/// not be replaced with a batch mean.
fn consume_news_media(world: &mut World, idx: usize) -> Result<(), SimError> {
    let stories = sample_stories(world, Role::Journalist, STORIES_LOW, STORIES_HIGH)?;

    let me = &mut world.agents[idx];
    for &story in &stories {
        me.state.push_encountered(story);
    }
    let last = *stories.last().ok_or_else(|| {
        SimError::InvariantViolation("no journalist stories available".into())
    })?;

    let base = me.state.belief_after_talk.unwrap_or(me.state.belief);
    let mixed = ensure_unit_interval(
        weighted_pair(base, OWN_WEIGHT, last, STORY_WEIGHT),
        "citizen media-mixed belief",
    )?;
    me.state.belief_after_talk_media = Some(mixed);
    me.state.belief = mixed;
    Ok(())
}

/// Propaganda exposure, gated by a Bernoulli draw. Each sampled story is
/// mixed against the media-stage belief in sequence, overwriting the running
/// result, so the last story wins.
fn encounter_propaganda(world: &mut World, idx: usize) -> Result<(), SimError> {
    let exposure = world.config.citizen.propaganda_exposure_probability;
    if !world.rng.gen_bool(exposure) {
        return Ok(());
    }

    let stories = sample_stories(world, Role::Propagandist, STORIES_LOW, STORIES_HIGH)?;

    let me = &mut world.agents[idx];
    let media_belief = me.state.belief_after_talk_media.unwrap_or(me.state.belief);
    let mut mixed = media_belief;
    for &story in &stories {
        me.state.push_encountered(story);
        mixed = weighted_pair(media_belief, OWN_WEIGHT, story, STORY_WEIGHT);
    }
    let mixed = ensure_unit_interval(mixed, "citizen propaganda-mixed belief")?;
    me.state.belief_after_talk_media_propaganda = Some(mixed);
    me.state.belief = mixed;
    Ok(())
}

/// Sample story values from all agents of the given role, without
/// replacement. The requested count is capped at the number of available
/// broadcasters rather than failing.
pub(super) fn sample_stories(
    world: &mut World,
    role: Role,
    low: usize,
    high: usize,
) -> Result<Vec<f64>, SimError> {
    let stories: Vec<f64> = world
        .registry
        .indices(role)
        .iter()
        .map(|&i| world.agents[i].state.story())
        .collect::<Result<_, SimError>>()?;
    if stories.is_empty() {
        return Err(SimError::InvariantViolation(format!(
            "no {role:?} stories to sample"
        )));
    }
    let drawn = world.rng.gen_range(low..=high);
    let count = drawn.min(stories.len());
    let chosen = rand::seq::index::sample(&mut world.rng, stories.len(), count);
    Ok(chosen.iter().map(|j| stories[j]).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::world::World;

    fn town() -> Config {
        let mut config = Config::default();
        config.population.scientists = 4;
        config.population.journalists = 3;
        config.population.propagandists = 2;
        config.population.citizens = 12;
        config.population.policymakers = 0;
        // Small grid so citizens actually meet
        config.grid.width = 3;
        config.grid.height = 3;
        config
    }

    #[test]
    fn test_beliefs_stay_in_unit_interval() {
        let mut world = World::new(&town(), 42, 0).unwrap();
        for _ in 0..15 {
            world.step().unwrap();
        }
        for agent in world.agents() {
            assert!((0.0..=1.0).contains(&agent.state.belief));
        }
    }

    #[test]
    fn test_travel_logged_every_step() {
        let mut world = World::new(&town(), 42, 0).unwrap();
        world.step().unwrap();
        let events = world.drain_events();
        // Every citizen moves exactly once per step
        assert_eq!(events.citizen_travel.len(), 12);
        for record in &events.citizen_travel {
            assert!(record.x < 3 && record.y < 3);
            assert_eq!(record.step, 1);
        }
    }

    #[test]
    fn test_positions_match_grid_after_moves() {
        let mut world = World::new(&town(), 5, 0).unwrap();
        for _ in 0..5 {
            world.step().unwrap();
        }
        for (index, agent) in world.agents().iter().enumerate() {
            assert!(world.grid.contents(agent.pos).contains(&index));
        }
    }

    #[test]
    fn test_no_self_interaction() {
        let mut world = World::new(&town(), 42, 0).unwrap();
        for _ in 0..10 {
            world.step().unwrap();
        }
        let events = world.drain_events();
        for record in &events.citizen_interactions {
            assert_ne!(record.self_id, record.other_id);
        }
    }

    #[test]
    fn test_media_stage_always_records() {
        let mut world = World::new(&town(), 42, 0).unwrap();
        world.step().unwrap();
        for agent in world.agents() {
            if agent.role == Role::Citizen {
                assert!(agent.state.belief_after_talk_media.is_some());
            }
        }
    }

    #[test]
    fn test_story_sampling_caps_at_available() {
        // Only one journalist: a request for 2..=9 stories resolves to 1.
        let mut config = town();
        config.population.journalists = 1;
        let mut world = World::new(&config, 42, 0).unwrap();
        let stories = sample_stories(&mut world, Role::Journalist, 2, 9).unwrap();
        assert_eq!(stories.len(), 1);
    }
}
