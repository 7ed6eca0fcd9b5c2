//! Policymaker Pipeline
//!
//! Mirrors the citizen's interaction/media/propaganda stages without
//! movement. Policymakers talk to policymakers population-wide rather than
//! by grid cell, weight the policy community over journalists, and discount
//! propaganda more than citizens do.

use rand::Rng;

use crate::agents::{citizen::sample_stories, Role};
use crate::belief::{ensure_unit_interval, weighted_pair};
use crate::error::SimError;
use crate::events::InteractionRecord;
use crate::world::World;

/// Discussion partner count range per step
const PARTNERS_LOW: usize = 2;
const PARTNERS_HIGH: usize = 4;
/// Media stage weights: the policy community outweighs journalists
const MEDIA_OWN_WEIGHT: f64 = 0.7;
const MEDIA_STORY_WEIGHT: f64 = 0.2;
/// Propaganda stage weights: recognized for what it is, taken with salt
const PROPAGANDA_OWN_WEIGHT: f64 = 0.8;
const PROPAGANDA_MIX_WEIGHT: f64 = 0.5;
/// Journalist story sample count range
const MEDIA_STORIES_LOW: usize = 2;
const MEDIA_STORIES_HIGH: usize = 9;
/// Propagandist story sample count range
const PROPAGANDA_STORIES_LOW: usize = 5;
const PROPAGANDA_STORIES_HIGH: usize = 9;

pub(crate) fn step(world: &mut World, idx: usize) -> Result<(), SimError> {
    interact_with_peers(world, idx)?;
    consume_news_media(world, idx)?;
    encounter_propaganda(world, idx)?;
    Ok(())
}

/// Talk to other policymakers sampled from the whole population, not a grid
/// cell. Same adopt-if-close rule and logging as citizens.
fn interact_with_peers(world: &mut World, idx: usize) -> Result<(), SimError> {
    let step = world.scheduler.steps();
    let threshold = world.config.policymaker.difference_threshold;

    let others: Vec<usize> = world
        .registry
        .indices(Role::Policymaker)
        .iter()
        .copied()
        .filter(|&i| i != idx)
        .collect();
    if others.is_empty() {
        return Ok(());
    }

    let drawn = world.rng.gen_range(PARTNERS_LOW..=PARTNERS_HIGH);
    let count = drawn.min(others.len());
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
        let difference = me.state.belief - partner_belief;
        world.events.policymaker_interactions.push(InteractionRecord {
            self_id: me.id.0,
            other_id: partner_id,
            belief_difference: difference,
            updated: difference.abs() < threshold,
            step,
        });
    }
    Ok(())
}

/// Mix the interaction-stage belief with the mean of a sampled batch of
/// journalist stories. Unlike citizens, the whole batch enters the mix.
fn consume_news_media(world: &mut World, idx: usize) -> Result<(), SimError> {
    let stories = sample_stories(
        world,
        Role::Journalist,
        MEDIA_STORIES_LOW,
        MEDIA_STORIES_HIGH,
    )?;
    let batch_mean = stories.iter().sum::<f64>() / stories.len() as f64;

    let me = &mut world.agents[idx];
    let base = me.state.belief_after_talk.unwrap_or(me.state.belief);
    let mixed = ensure_unit_interval(
        weighted_pair(base, MEDIA_OWN_WEIGHT, batch_mean, MEDIA_STORY_WEIGHT),
        "policymaker media-mixed belief",
    )?;
    me.state.belief_after_talk_media = Some(mixed);
    me.state.belief = mixed;
    Ok(())
}

/// Propaganda exposure. The media-stage belief joins the sampled stories
/// before averaging, then the media-stage belief dominates the final mix.
fn encounter_propaganda(world: &mut World, idx: usize) -> Result<(), SimError> {
    let exposure = world.config.policymaker.propaganda_exposure_probability;
    if !world.rng.gen_bool(exposure) {
        return Ok(());
    }

    let stories = sample_stories(
        world,
        Role::Propagandist,
        PROPAGANDA_STORIES_LOW,
        PROPAGANDA_STORIES_HIGH,
    )?;

    let me = &mut world.agents[idx];
    let media_belief = me.state.belief_after_talk_media.unwrap_or(me.state.belief);
    let augmented_mean = (stories.iter().sum::<f64>() + media_belief)
        / (stories.len() as f64 + 1.0);
    let mixed = ensure_unit_interval(
        weighted_pair(
            media_belief,
            PROPAGANDA_OWN_WEIGHT,
            augmented_mean,
            PROPAGANDA_MIX_WEIGHT,
        ),
        "policymaker propaganda-mixed belief",
    )?;
    me.state.belief_after_talk_media_propaganda = Some(mixed);
    me.state.belief = mixed;
    Ok(())
}
