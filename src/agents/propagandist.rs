//! Propagandist Pipeline
//!
//! No movement, no interactions. Each step the propagandist cherry-picks
//! the least confident scientific result and blends it with its own fixed
//! ideological bias, weighted heavily toward the bias.

use crate::agents::Role;
use crate::belief::{ensure_unit_interval, weighted_pair};
use crate::error::SimError;
use crate::world::World;

/// Weight on the propagandist's own ideological bias
const BIAS_WEIGHT: f64 = 0.8;
/// Weight on the cherry-picked scientific result
const SCIENCE_WEIGHT: f64 = 0.4;

pub(crate) fn step(world: &mut World, idx: usize) -> Result<(), SimError> {
    let mut doubt = f64::INFINITY;
    for &i in world.registry.indices(Role::Scientist) {
        let mean = world.agents[i].state.posterior()?.mean();
        if mean < doubt {
            doubt = mean;
        }
    }
    if !doubt.is_finite() {
        return Err(SimError::InvariantViolation(
            "no scientific results to cherry-pick".into(),
        ));
    }

    let me = &mut world.agents[idx];
    let story = ensure_unit_interval(
        weighted_pair(me.state.belief, BIAS_WEIGHT, doubt, SCIENCE_WEIGHT),
        "propagandist story",
    )?;
    me.state.story = Some(story);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::belief::BetaParams;
    use crate::config::Config;
    use crate::world::World;

    fn outlet() -> Config {
        let mut config = Config::default();
        config.population.scientists = 3;
        config.population.journalists = 0;
        config.population.propagandists = 1;
        config.population.citizens = 0;
        config.population.policymakers = 0;
        config
    }

    #[test]
    fn test_story_blends_bias_with_weakest_result() {
        let mut world = World::new(&outlet(), 42, 0).unwrap();

        // Pin the scientist posteriors so the minimum mean is 0.3, and the
        // propagandist bias to 0.1.
        let means = [0.3, 0.5, 0.8];
        let mut scientist = 0;
        for agent in world.agents.iter_mut() {
            match agent.role {
                Role::Scientist => {
                    let mean = means[scientist];
                    scientist += 1;
                    agent.state.posterior =
                        Some(BetaParams::new(mean * 10.0, (1.0 - mean) * 10.0).unwrap());
                }
                Role::Propagandist => agent.state.belief = 0.1,
                _ => {}
            }
        }

        let propagandist = world.registry.indices(Role::Propagandist)[0];
        step(&mut world, propagandist).unwrap();

        let story = world.agents()[propagandist].state.story.unwrap();
        let expected = (0.8 * 0.1 + 0.4 * 0.3) / 1.2;
        assert!((story - expected).abs() < 1e-12);
    }

    #[test]
    fn test_bias_never_drifts() {
        let mut world = World::new(&outlet(), 42, 0).unwrap();
        let propagandist = world.registry.indices(Role::Propagandist)[0];
        let bias = world.agents()[propagandist].state.belief;
        assert!((0.0..0.2).contains(&bias));

        for _ in 0..10 {
            world.step().unwrap();
        }
        assert_eq!(world.agents()[propagandist].state.belief, bias);
    }
}
