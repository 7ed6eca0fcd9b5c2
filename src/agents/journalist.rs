//! Journalist Pipeline
//!
//! "Both sides" story synthesis: every step the journalist interviews the
//! least and most confident scientists plus one chosen at random, folds in
//! its own fixed bias, and risks one propagandist story slipping into the
//! draft. The story is the plain mean of everything collected.

use rand::Rng;

use crate::agents::Role;
use crate::belief::ensure_unit_interval;
use crate::error::SimError;
use crate::events::ConsultRecord;
use crate::world::World;

pub(crate) fn step(world: &mut World, idx: usize) -> Result<(), SimError> {
    let step = world.scheduler.steps();

    let means: Vec<(u64, f64)> = world
        .registry
        .indices(Role::Scientist)
        .iter()
        .map(|&i| {
            let scientist = &world.agents[i];
            Ok((scientist.id.0, scientist.state.posterior()?.mean()))
        })
        .collect::<Result<_, SimError>>()?;
    if means.is_empty() {
        return Err(SimError::InvariantViolation(
            "no scientists available to consult".into(),
        ));
    }

    // First occurrence wins on ties, as in the source model.
    let &(min_id, min_mean) = means
        .iter()
        .reduce(|best, next| if next.1 < best.1 { next } else { best })
        .unwrap_or(&means[0]);
    let &(max_id, max_mean) = means
        .iter()
        .reduce(|best, next| if next.1 > best.1 { next } else { best })
        .unwrap_or(&means[0]);
    let (random_id, random_mean) = means[world.rng.gen_range(0..means.len())];

    let mut selection = vec![min_mean, max_mean, random_mean];
    let mut consulted = vec![min_id, max_id, random_id];

    // The journalist's own bias enters the story but is not an encounter.
    selection.push(world.agents[idx].state.belief);

    let exposure = world.config.journalist.propaganda_exposure_probability;
    if world.rng.gen_bool(exposure) {
        let propagandists = world.registry.indices(Role::Propagandist);
        let source = propagandists[world.rng.gen_range(0..propagandists.len())];
        selection.push(world.agents[source].state.story()?);
        consulted.push(world.agents[source].id.0);
    }

    let story = ensure_unit_interval(
        selection.iter().sum::<f64>() / selection.len() as f64,
        "journalist story",
    )?;

    let me = &mut world.agents[idx];
    me.state.push_encountered(min_mean);
    me.state.push_encountered(max_mean);
    me.state.push_encountered(random_mean);
    me.state.story = Some(story);

    for other_id in consulted {
        world.events.journalist_consults.push(ConsultRecord {
            self_id: me.id.0,
            other_id,
            step,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::world::World;

    fn newsroom(exposure: f64) -> Config {
        let mut config = Config::default();
        config.population.scientists = 5;
        config.population.journalists = 2;
        config.population.propagandists = 1;
        config.population.citizens = 0;
        config.population.policymakers = 0;
        config.journalist.propaganda_exposure_probability = exposure;
        config
    }

    #[test]
    fn test_consults_min_max_and_random_scientist() {
        let mut world = World::new(&newsroom(0.0), 42, 0).unwrap();
        world.step().unwrap();
        let events = world.drain_events();

        // Two journalists, three scientist consultations each, no
        // propagandist contamination at zero exposure.
        assert_eq!(events.journalist_consults.len(), 6);
        for record in &events.journalist_consults {
            assert!((20_000_000..30_000_000).contains(&record.self_id));
            assert!((10_000_000..20_000_000).contains(&record.other_id));
        }
    }

    #[test]
    fn test_contamination_consults_propagandist() {
        let mut world = World::new(&newsroom(1.0), 42, 0).unwrap();
        world.step().unwrap();
        let events = world.drain_events();

        // Guaranteed exposure: each journalist logs a fourth consultation
        // pointing at the propagandist id range.
        assert_eq!(events.journalist_consults.len(), 8);
        let contaminated = events
            .journalist_consults
            .iter()
            .filter(|r| (30_000_000..40_000_000).contains(&r.other_id))
            .count();
        assert_eq!(contaminated, 2);
    }

    #[test]
    fn test_story_stays_in_unit_interval() {
        let mut world = World::new(&newsroom(1.0), 7, 0).unwrap();
        for _ in 0..10 {
            world.step().unwrap();
        }
        for agent in world.agents() {
            if agent.role == Role::Journalist {
                let story = agent.state.story.unwrap();
                assert!((0.0..=1.0).contains(&story));
            }
        }
    }

    #[test]
    fn test_encounters_record_three_scientist_views() {
        let mut world = World::new(&newsroom(0.0), 42, 0).unwrap();
        world.step().unwrap();
        for agent in world.agents() {
            if agent.role == Role::Journalist {
                let log = agent.state.beliefs_encountered.as_ref().unwrap();
                assert_eq!(log.len(), 3);
            }
        }
    }
}
